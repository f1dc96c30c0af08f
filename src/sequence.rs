use std::{
    cmp::Ordering,
    fmt::{Debug, Formatter},
    sync::{Arc, OnceLock},
};

use itertools::Itertools;
use tracing::{debug, instrument, trace};

use crate::{
    duration::Duration,
    error::{Error, Result},
    interval::Interval,
};

/// Immutable ordered collection of intervals.
///
/// Usually sorted by start instant (ties keep the insertion order). Each instance knows whether
/// it is, and the set operations work on a start-sorted view, so that an out-of-order
/// [`Sequence::push`] costs a re-sort instead of a wrong answer.
///
/// Cloning is cheap: clones share the backing list together with the lazily computed aggregates.
#[derive(Clone)]
#[must_use]
pub struct Sequence(Arc<Inner>);

struct Inner {
    periods: Box<[Interval]>,
    is_sorted_by_start: bool,

    boundaries: OnceLock<Option<Interval>>,
    total_duration: OnceLock<Duration>,
    gaps: OnceLock<Sequence>,
}

/// Construction.
impl Sequence {
    pub fn empty() -> Self {
        Self::from_vec(Vec::new(), true)
    }

    /// Sort the periods by start, keeping the insertion order of equal starts.
    pub fn from_unsorted(periods: impl IntoIterator<Item = Interval>) -> Self {
        let mut periods = periods.into_iter().collect_vec();
        periods.sort_by_key(|period| period.start());
        Self::from_vec(periods, true)
    }

    /// Take periods which are expected to be sorted by start already.
    ///
    /// The order is verified in linear time, and the periods get sorted when it does not hold.
    pub fn from_sorted(periods: impl IntoIterator<Item = Interval>) -> Self {
        let mut periods = periods.into_iter().collect_vec();
        if !periods.is_sorted_by_key(|period| period.start()) {
            debug!(n_periods = periods.len(), "periods are not sorted, sorting…");
            periods.sort_by_key(|period| period.start());
        }
        Self::from_vec(periods, true)
    }

    /// Keep the given order and find out whether it happens to be sorted by start.
    fn from_vec_checked(periods: Vec<Interval>) -> Self {
        let is_sorted_by_start = periods.is_sorted_by_key(|period| period.start());
        Self::from_vec(periods, is_sorted_by_start)
    }

    fn from_vec(periods: Vec<Interval>, is_sorted_by_start: bool) -> Self {
        Self(Arc::new(Inner {
            periods: periods.into_boxed_slice(),
            is_sorted_by_start,
            boundaries: OnceLock::new(),
            total_duration: OnceLock::new(),
            gaps: OnceLock::new(),
        }))
    }
}

/// Access.
impl Sequence {
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.periods.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.periods.is_empty()
    }

    #[must_use]
    pub fn is_sorted_by_start(&self) -> bool {
        self.0.is_sorted_by_start
    }

    #[must_use]
    pub fn as_slice(&self) -> &[Interval] {
        &self.0.periods
    }

    /// Independent copy of the periods.
    #[must_use]
    pub fn to_vec(&self) -> Vec<Interval> {
        self.0.periods.to_vec()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Interval> {
        self.0.periods.iter()
    }

    #[must_use]
    pub fn first(&self) -> Option<Interval> {
        self.0.periods.first().copied()
    }

    #[must_use]
    pub fn last(&self) -> Option<Interval> {
        self.0.periods.last().copied()
    }

    pub fn get(&self, index: usize) -> Result<Interval> {
        self.0.periods.get(index).copied().ok_or_else(|| Error::IndexOutOfRange {
            index: isize::try_from(index).unwrap_or(isize::MAX),
            len: self.len(),
        })
    }

    /// Like [`Sequence::get`], but negative indices count from the end.
    pub fn element_at(&self, index: isize) -> Result<Interval> {
        let index = self.normalize_index(index, self.len())?;
        Ok(self.0.periods[index])
    }

    #[must_use]
    pub fn map<T>(&self, f: impl FnMut(&Interval) -> T) -> Vec<T> {
        self.iter().map(f).collect()
    }

    /// Resolve a possibly negative index into `0..upper_bound`.
    fn normalize_index(&self, index: isize, upper_bound: usize) -> Result<usize> {
        let len = self.len();
        let normalized = if index < 0 {
            len.checked_sub(index.unsigned_abs())
        } else {
            Some(index.unsigned_abs())
        };
        normalized
            .filter(|normalized| *normalized < upper_bound)
            .ok_or(Error::IndexOutOfRange { index, len })
    }
}

/// Aggregates, each computed at most once per backing list.
impl Sequence {
    /// Span from the earliest start to the latest end, with the bounds of the first period.
    #[must_use]
    pub fn boundaries(&self) -> Option<Interval> {
        *self.0.boundaries.get_or_init(|| {
            let first = self.first()?;
            let start = self.iter().map(|period| period.start()).min()?;
            let end = self.iter().map(|period| period.end()).max()?;
            Interval::try_from_instants(start, end, first.bounds()).ok()
        })
    }

    /// Sum of the period lengths, overlapping parts are counted as many times as they occur.
    ///
    /// Saturates at [`u64::MAX`] milliseconds.
    pub fn total_duration(&self) -> Duration {
        *self.0.total_duration.get_or_init(|| self.iter().map(|period| period.duration()).sum())
    }

    /// Spans not covered by any period, between the first start and the latest end.
    ///
    /// Each gap carries the bounds of the period it follows. Touching periods leave no gap.
    pub fn gaps(&self) -> &Self {
        self.0.gaps.get_or_init(|| self.find_gaps())
    }

    #[instrument(skip_all, level = "debug", fields(n_periods = self.len()))]
    fn find_gaps(&self) -> Self {
        let sorted = self.sort_by_start();
        let mut periods = sorted.iter().copied();
        let Some(mut reach) = periods.next() else {
            return Self::empty();
        };
        let mut gaps = Vec::new();
        for period in periods {
            // `reach` is the period that ends latest so far:
            if reach.is_before(period)
                && let Some(gap) = reach.gap(period)
            {
                trace!(%gap, "found a gap");
                gaps.push(gap);
            }
            if period.end() > reach.end() {
                reach = period;
            }
        }
        debug!(n_gaps = gaps.len(), "done");
        Self::from_vec(gaps, true)
    }
}

/// Set algebra.
impl Sequence {
    /// All periods of both sequences, without exact duplicates. Overlaps are not merged.
    #[instrument(skip_all, level = "debug", fields(n_left = self.len(), n_right = other.len()))]
    pub fn union(&self, other: &Self) -> Self {
        if other.is_empty() {
            return self.clone();
        }
        if self.is_empty() {
            return other.clone();
        }
        let union = Self::from_unsorted(self.iter().chain(other.iter()).copied().unique());
        debug!(n_periods = union.len(), "done");
        union
    }

    /// Pairwise common parts, with the bounds of the periods of `self`.
    ///
    /// Linear two-pointer sweep. It finds every common part when neither sequence overlaps
    /// itself, for example after [`Sequence::merge`]. Each emitted part spans a range covered by
    /// a period of each sequence.
    #[instrument(skip_all, level = "debug", fields(n_left = self.len(), n_right = other.len()))]
    pub fn intersect(&self, other: &Self) -> Self {
        let (left, right) = (self.sort_by_start(), other.sort_by_start());
        let (left, right) = (left.as_slice(), right.as_slice());

        let mut intersections = Vec::new();
        let (mut i, mut j) = (0, 0);
        while let (Some(a), Some(b)) = (left.get(i), right.get(j)) {
            if let Ok(intersection) =
                Interval::try_from_instants(a.start().max(b.start()), a.end().min(b.end()), a.bounds())
            {
                intersections.push(intersection);
            }
            // Whichever ends first cannot meet any later period of the other side:
            match a.end().cmp(&b.end()) {
                Ordering::Less => i += 1,
                Ordering::Greater => j += 1,
                Ordering::Equal => {
                    i += 1;
                    j += 1;
                }
            }
        }

        debug!(n_intersections = intersections.len(), "done");
        Self::from_vec_checked(intersections)
    }

    /// Periods of `self` which do not overlap any period of `other`.
    ///
    /// Periods are kept or dropped as a whole, they are never split.
    #[instrument(skip_all, level = "debug", fields(n_left = self.len(), n_right = other.len()))]
    pub fn subtract(&self, other: &Self) -> Self {
        let Some(span) = other.boundaries() else {
            return self.clone();
        };
        if self.is_empty() {
            return self.clone();
        }
        let subtrahends = other.sort_by_start();
        let remaining = self
            .iter()
            .copied()
            .filter(|period| {
                if period.end() < span.start() || span.end() < period.start() {
                    return true;
                }
                // Sorted by start, so nothing past the period's end can overlap it:
                !subtrahends
                    .iter()
                    .take_while(|subtrahend| subtrahend.start() <= period.end())
                    .any(|subtrahend| period.overlaps(*subtrahend))
            })
            .collect_vec();
        debug!(n_remaining = remaining.len(), "done");
        Self::from_vec(remaining, self.is_sorted_by_start())
    }

    /// Fuse overlapping and consecutive periods.
    ///
    /// Uses [`Interval::union`], so `[Jan 1, Jan 2)` and `[Jan 2, Jan 3)` fuse into
    /// `[Jan 1, Jan 3)` even though they do not overlap.
    #[instrument(skip_all, level = "debug", fields(n_periods = self.len()))]
    pub fn merge(&self) -> Self {
        fn flush(merged: &mut Vec<Interval>, period: Interval) {
            // The hull may have gained an inclusive start which now fuses with the previous one:
            if let Some(last) = merged.last_mut()
                && let Some(union) = last.union(period)
            {
                *last = union;
            } else {
                merged.push(period);
            }
        }

        let sorted = self.sort_by_start();
        let mut periods = sorted.iter().copied();
        let Some(mut current) = periods.next() else {
            return Self::empty();
        };
        let mut merged = Vec::new();
        for period in periods {
            if let Some(union) = current.union(period) {
                current = union;
            } else {
                flush(&mut merged, current);
                current = period;
            }
        }
        flush(&mut merged, current);

        debug!(n_merged = merged.len(), "done");
        Self::from_vec(merged, true)
    }
}

/// Ordering and filtering.
impl Sequence {
    /// Stable sort with a custom comparator.
    ///
    /// The result is not assumed to be sorted by start. Set operations on it sort again.
    pub fn sort_by(&self, compare: impl FnMut(&Interval, &Interval) -> Ordering) -> Self {
        let mut periods = self.to_vec();
        periods.sort_by(compare);
        Self::from_vec_checked(periods)
    }

    /// No-op when already sorted by start.
    pub fn sort_by_start(&self) -> Self {
        if self.is_sorted_by_start() {
            self.clone()
        } else {
            Self::from_unsorted(self.iter().copied())
        }
    }

    pub fn filter(&self, mut predicate: impl FnMut(&Interval) -> bool) -> Self {
        let periods = self.iter().copied().filter(|period| predicate(period)).collect_vec();
        Self::from_vec(periods, self.is_sorted_by_start())
    }
}

/// Positional edits. Each one returns a new sequence and keeps the relative order of the
/// untouched periods.
impl Sequence {
    pub fn push(&self, period: Interval) -> Self {
        let mut periods = Vec::with_capacity(self.len() + 1);
        periods.extend_from_slice(self.as_slice());
        periods.push(period);
        Self::from_vec_checked(periods)
    }

    pub fn unshift(&self, period: Interval) -> Self {
        let mut periods = Vec::with_capacity(self.len() + 1);
        periods.push(period);
        periods.extend_from_slice(self.as_slice());
        Self::from_vec_checked(periods)
    }

    /// Insert before the `index`, which may be negative or equal to the length.
    pub fn insert(&self, index: isize, period: Interval) -> Result<Self> {
        let index = self.normalize_index(index, self.len() + 1)?;
        let mut periods = self.to_vec();
        periods.insert(index, period);
        Ok(Self::from_vec_checked(periods))
    }

    /// Copy without the period at the `index`, which may be negative.
    pub fn without_at(&self, index: isize) -> Result<Self> {
        let index = self.normalize_index(index, self.len())?;
        let mut periods = self.to_vec();
        periods.remove(index);
        Ok(Self::from_vec(periods, self.is_sorted_by_start()))
    }

    /// Copy with the period at the `index` replaced.
    pub fn set(&self, index: isize, period: Interval) -> Result<Self> {
        let index = self.normalize_index(index, self.len())?;
        let mut periods = self.to_vec();
        periods[index] = period;
        Ok(Self::from_vec_checked(periods))
    }

    pub fn clear(&self) -> Self {
        Self::empty()
    }
}

impl Default for Sequence {
    fn default() -> Self {
        Self::empty()
    }
}

impl FromIterator<Interval> for Sequence {
    fn from_iter<T: IntoIterator<Item = Interval>>(iter: T) -> Self {
        Self::from_unsorted(iter)
    }
}

impl<'a> IntoIterator for &'a Sequence {
    type Item = &'a Interval;
    type IntoIter = std::slice::Iter<'a, Interval>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl PartialEq for Sequence {
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl Eq for Sequence {}

impl Debug for Sequence {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}
