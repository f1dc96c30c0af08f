mod calendar;

use std::{
    cmp::Ordering,
    fmt::{Debug, Display, Formatter},
};

use crate::{
    bounds::Bounds,
    duration::Duration,
    error::{Error, Result},
    timestamp::Timestamp,
};

/// Immutable time span between two instants, `start < end`.
///
/// Every constructor and transformation re-checks the ordering, so an existing `Interval` is
/// always non-empty.
#[derive(Copy, Clone, Eq, Hash, PartialEq)]
#[must_use]
pub struct Interval {
    start: Timestamp,
    end: Timestamp,
    bounds: Bounds,
}

impl Interval {
    /// Exact interval with the default `[start, end)` bounds.
    pub fn try_new(start: impl Into<Timestamp>, end: impl Into<Timestamp>) -> Result<Self> {
        Self::try_from_instants(start, end, Bounds::default())
    }

    /// Exact interval, endpoints are kept at millisecond precision.
    pub fn try_from_instants(
        start: impl Into<Timestamp>,
        end: impl Into<Timestamp>,
        bounds: Bounds,
    ) -> Result<Self> {
        let (start, end) = (start.into(), end.into());
        if start < end { Ok(Self { start, end, bounds }) } else { Err(Error::InvalidRange { start, end }) }
    }

    /// Day-precision interval: both endpoints are truncated to midnight UTC.
    ///
    /// Any time-of-day is silently dropped. Two instants on the same UTC day collapse into
    /// the same midnight and therefore always fail with [`Error::InvalidRange`].
    pub fn try_from_calendar_dates(
        start: impl Into<Timestamp>,
        end: impl Into<Timestamp>,
        bounds: Bounds,
    ) -> Result<Self> {
        let (start, end) = (start.into(), end.into());
        match (start.floor_to_day(), end.floor_to_day()) {
            (Some(start), Some(end)) => Self::try_from_instants(start, end, bounds),
            _ => Err(Error::InvalidRange { start, end }),
        }
    }

    /// Build from endpoints computed with checked arithmetic.
    ///
    /// An overflowed endpoint is reported along with the endpoints it was computed from.
    fn try_moved(self, start: Option<Timestamp>, end: Option<Timestamp>) -> Result<Self> {
        match (start, end) {
            (Some(start), Some(end)) => Self::try_from_instants(start, end, self.bounds),
            _ => Err(Error::InvalidRange { start: self.start, end: self.end }),
        }
    }

    pub const fn start(self) -> Timestamp {
        self.start
    }

    pub const fn end(self) -> Timestamp {
        self.end
    }

    pub const fn bounds(self) -> Bounds {
        self.bounds
    }

    /// Distance between the endpoints, regardless of the bounds.
    pub const fn duration(self) -> Duration {
        self.end.abs_diff(self.start)
    }

    /// Order by the start instant only.
    #[must_use]
    pub fn cmp_start(&self, other: &Self) -> Ordering {
        self.start.cmp(&other.start)
    }
}

/// Relations.
impl Interval {
    /// Whether the intervals share at least one instant.
    ///
    /// At a touching point, the point is shared only when it is inclusive on both sides.
    #[must_use]
    pub const fn overlaps(self, other: Self) -> bool {
        if self.end.0 < other.start.0 || other.end.0 < self.start.0 {
            false
        } else if self.end.0 == other.start.0 {
            self.bounds.is_end_inclusive() && other.bounds.is_start_inclusive()
        } else if other.end.0 == self.start.0 {
            other.bounds.is_end_inclusive() && self.bounds.is_start_inclusive()
        } else {
            true
        }
    }

    /// Whether `other` lies entirely within this interval.
    ///
    /// Where the endpoints coincide, every inclusive endpoint of `other` must be inclusive in
    /// `self` as well, so that an exclusive endpoint of `self` only admits an exclusive one.
    #[must_use]
    pub fn contains(self, other: Self) -> bool {
        if other.start < self.start || self.end < other.end {
            return false;
        }
        let shared = Bounds::from_inclusivity(self.start == other.start, self.end == other.end);
        let required = other.bounds.intersect(shared);
        self.bounds.intersect(required) == required
    }

    #[must_use]
    pub fn contains_instant(self, instant: impl Into<Timestamp>) -> bool {
        let instant = instant.into();
        let is_after_start = if self.bounds.is_start_inclusive() {
            self.start <= instant
        } else {
            self.start < instant
        };
        let is_before_end =
            if self.bounds.is_end_inclusive() { instant <= self.end } else { instant < self.end };
        is_after_start && is_before_end
    }

    /// Whether one ends exactly where the other starts, regardless of the bounds.
    #[must_use]
    pub const fn touches(self, other: Self) -> bool {
        self.end.0 == other.start.0 || other.end.0 == self.start.0
    }

    /// Touching, but the touching point is not shared.
    #[must_use]
    pub const fn abuts(self, other: Self) -> bool {
        self.touches(other) && !self.overlaps(other)
    }

    #[must_use]
    pub const fn is_before(self, other: Self) -> bool {
        self.end.0 <= other.start.0
    }

    #[must_use]
    pub const fn is_after(self, other: Self) -> bool {
        self.start.0 >= other.end.0
    }

    /// Looser than [`Interval::overlaps`]: touching intervals fuse when the touching point is
    /// inclusive on either side, so that `[Jan 1, Jan 2)` and `[Jan 2, Jan 3)` become one.
    #[must_use]
    pub const fn can_merge_consecutive_days(self, other: Self) -> bool {
        if self.end.0 == other.start.0 {
            self.bounds.is_end_inclusive() || other.bounds.is_start_inclusive()
        } else if other.end.0 == self.start.0 {
            other.bounds.is_end_inclusive() || self.bounds.is_start_inclusive()
        } else {
            false
        }
    }

    /// Span between two separate intervals, with the bounds of `self`.
    ///
    /// [`None`] when they overlap or touch.
    #[must_use]
    pub fn gap(self, other: Self) -> Option<Self> {
        if self.overlaps(other) || self.touches(other) {
            None
        } else if self.end < other.start {
            Self::try_from_instants(self.end, other.start, self.bounds).ok()
        } else {
            Self::try_from_instants(other.end, self.start, self.bounds).ok()
        }
    }

    /// Common part `[max(starts), min(ends))` with the bounds of `self`.
    ///
    /// [`None`] when there is no overlap, or when the overlap is a single shared instant.
    #[must_use]
    pub fn intersection(self, other: Self) -> Option<Self> {
        if !self.overlaps(other) {
            return None;
        }
        Self::try_from_instants(self.start.max(other.start), self.end.min(other.end), self.bounds)
            .ok()
    }

    /// Hull of two overlapping or consecutive intervals.
    ///
    /// Each endpoint keeps the inclusivity of the interval it was taken from. When both
    /// intervals share an endpoint, it is inclusive if either side is.
    #[must_use]
    pub fn union(self, other: Self) -> Option<Self> {
        if !(self.overlaps(other) || self.can_merge_consecutive_days(other)) {
            return None;
        }
        let (start, is_start_inclusive) = match self.start.cmp(&other.start) {
            Ordering::Less => (self.start, self.bounds.is_start_inclusive()),
            Ordering::Greater => (other.start, other.bounds.is_start_inclusive()),
            Ordering::Equal => (
                self.start,
                self.bounds.is_start_inclusive() || other.bounds.is_start_inclusive(),
            ),
        };
        let (end, is_end_inclusive) = match self.end.cmp(&other.end) {
            Ordering::Greater => (self.end, self.bounds.is_end_inclusive()),
            Ordering::Less => (other.end, other.bounds.is_end_inclusive()),
            Ordering::Equal => {
                (self.end, self.bounds.is_end_inclusive() || other.bounds.is_end_inclusive())
            }
        };
        Some(Self { start, end, bounds: Bounds::from_inclusivity(is_start_inclusive, is_end_inclusive) })
    }
}

/// Transformations.
impl Interval {
    pub fn with_start(self, start: impl Into<Timestamp>) -> Result<Self> {
        Self::try_from_instants(start, self.end, self.bounds)
    }

    pub fn with_end(self, end: impl Into<Timestamp>) -> Result<Self> {
        Self::try_from_instants(self.start, end, self.bounds)
    }

    pub const fn with_bounds(mut self, bounds: Bounds) -> Self {
        self.bounds = bounds;
        self
    }

    /// Keep the start, move the end to `start + duration`.
    pub fn with_duration(self, duration: Duration) -> Result<Self> {
        self.try_moved(Some(self.start), self.start.checked_add(duration))
    }

    pub fn shift_forward(self, by: Duration) -> Result<Self> {
        self.try_moved(self.start.checked_add(by), self.end.checked_add(by))
    }

    pub fn shift_backward(self, by: Duration) -> Result<Self> {
        self.try_moved(self.start.checked_sub(by), self.end.checked_sub(by))
    }

    /// Expand by half of the `duration` on each side.
    pub fn grow(self, duration: Duration) -> Result<Self> {
        let half = duration.half();
        self.try_moved(self.start.checked_sub(half), self.end.checked_add(half))
    }

    /// Contract by half of the `duration` on each side.
    pub fn shrink(self, duration: Duration) -> Result<Self> {
        let half = duration.half();
        self.try_moved(self.start.checked_add(half), self.end.checked_sub(half))
    }
}

impl Display for Interval {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}, {}{}", self.bounds.opening(), self.start, self.end, self.bounds.closing())
    }
}

impl Debug for Interval {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(self, f)
    }
}
