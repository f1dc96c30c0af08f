mod iso8601;

use std::{
    fmt::{Debug, Display, Formatter},
    iter::Sum,
    ops::{Add, AddAssign},
    str::FromStr,
};

use bon::bon;
use chrono::TimeDelta;

use crate::error::{Error, Result};

/// Non-negative time magnitude in milliseconds.
///
/// Addition saturates at [`u64::MAX`] milliseconds.
#[derive(Copy, Clone, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[must_use]
pub struct Duration(u64);

impl Duration {
    pub const ZERO: Self = Self(0);

    pub const MILLIS_PER_SECOND: u64 = 1_000;
    pub const MILLIS_PER_MINUTE: u64 = 60 * Self::MILLIS_PER_SECOND;
    pub const MILLIS_PER_HOUR: u64 = 60 * Self::MILLIS_PER_MINUTE;
    pub const MILLIS_PER_DAY: u64 = 24 * Self::MILLIS_PER_HOUR;
    pub const MILLIS_PER_WEEK: u64 = 7 * Self::MILLIS_PER_DAY;

    /// Calendar-agnostic month used by ISO-8601 parsing.
    pub const MILLIS_PER_MONTH: u64 = 30 * Self::MILLIS_PER_DAY;

    /// Calendar-agnostic year used by ISO-8601 parsing.
    pub const MILLIS_PER_YEAR: u64 = 365 * Self::MILLIS_PER_DAY;

    pub const fn from_millis(millis: u64) -> Self {
        Self(millis)
    }

    pub const fn from_secs(seconds: u64) -> Self {
        Self(seconds.saturating_mul(Self::MILLIS_PER_SECOND))
    }

    pub const fn from_mins(minutes: u64) -> Self {
        Self(minutes.saturating_mul(Self::MILLIS_PER_MINUTE))
    }

    pub const fn from_hours(hours: u64) -> Self {
        Self(hours.saturating_mul(Self::MILLIS_PER_HOUR))
    }

    pub const fn from_days(days: u64) -> Self {
        Self(days.saturating_mul(Self::MILLIS_PER_DAY))
    }

    pub const fn from_weeks(weeks: u64) -> Self {
        Self(weeks.saturating_mul(Self::MILLIS_PER_WEEK))
    }

    #[must_use]
    pub const fn as_millis(self) -> u64 {
        self.0
    }

    /// Milliseconds clamped into the signed timestamp domain.
    #[must_use]
    pub const fn as_millis_i64(self) -> i64 {
        if self.0 > i64::MAX.cast_unsigned() { i64::MAX } else { self.0.cast_signed() }
    }

    #[must_use]
    #[expect(clippy::cast_precision_loss)]
    pub fn as_days_f64(self) -> f64 {
        self.0 as f64 / Self::MILLIS_PER_DAY as f64
    }

    #[must_use]
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    pub const fn half(self) -> Self {
        Self(self.0 / 2)
    }

    pub const fn saturating_add(self, rhs: Self) -> Self {
        Self(self.0.saturating_add(rhs.0))
    }
}

#[bon]
impl Duration {
    /// Compose a duration out of calendar units, for example:
    ///
    /// ```
    /// use fennec_periods::Duration;
    ///
    /// let duration = Duration::builder().days(1).hours(12).build();
    /// assert_eq!(duration, Duration::from_hours(36));
    /// ```
    #[builder(start_fn = builder, finish_fn = build)]
    pub fn from_units(
        #[builder(default)] weeks: u64,
        #[builder(default)] days: u64,
        #[builder(default)] hours: u64,
        #[builder(default)] minutes: u64,
        #[builder(default)] seconds: u64,
        #[builder(default)] millis: u64,
    ) -> Self {
        Self::from_weeks(weeks)
            .saturating_add(Self::from_days(days))
            .saturating_add(Self::from_hours(hours))
            .saturating_add(Self::from_mins(minutes))
            .saturating_add(Self::from_secs(seconds))
            .saturating_add(Self::from_millis(millis))
    }
}

impl Add for Duration {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        self.saturating_add(rhs)
    }
}

impl AddAssign for Duration {
    fn add_assign(&mut self, rhs: Self) {
        *self = self.saturating_add(rhs);
    }
}

impl Sum for Duration {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Self::saturating_add)
    }
}

impl From<std::time::Duration> for Duration {
    fn from(duration: std::time::Duration) -> Self {
        Self(u64::try_from(duration.as_millis()).unwrap_or(u64::MAX))
    }
}

impl From<Duration> for std::time::Duration {
    fn from(duration: Duration) -> Self {
        Self::from_millis(duration.0)
    }
}

impl TryFrom<TimeDelta> for Duration {
    type Error = Error;

    fn try_from(time_delta: TimeDelta) -> Result<Self> {
        u64::try_from(time_delta.num_milliseconds())
            .map(Self)
            .map_err(|_| Error::InvalidDuration(format!("negative time delta `{time_delta}`")))
    }
}

impl From<Duration> for TimeDelta {
    fn from(duration: Duration) -> Self {
        Self::try_milliseconds(duration.as_millis_i64()).unwrap_or(Self::MAX)
    }
}

impl FromStr for Duration {
    type Err = Error;

    /// Parse an ISO-8601 duration such as `P1W`, `P2DT3H` or `PT0.5S`.
    fn from_str(text: &str) -> Result<Self> {
        iso8601::parse(text)
    }
}

impl Display for Duration {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&humantime::format_duration(std::time::Duration::from(*self)), f)
    }
}

impl Debug for Duration {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}ms", self.0)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    #[test]
    fn test_units() {
        assert_eq!(Duration::from_secs(2).as_millis(), 2_000);
        assert_eq!(Duration::from_mins(1), Duration::from_secs(60));
        assert_eq!(Duration::from_days(7), Duration::from_weeks(1));
    }

    #[test]
    fn test_builder() {
        let duration = Duration::builder().weeks(1).hours(1).millis(5).build();
        assert_eq!(duration.as_millis(), Duration::MILLIS_PER_WEEK + Duration::MILLIS_PER_HOUR + 5);
        assert_eq!(Duration::builder().build(), Duration::ZERO);
    }

    #[test]
    fn test_as_millis_i64_clamps() {
        assert_eq!(Duration::from_millis(u64::MAX).as_millis_i64(), i64::MAX);
    }

    #[test]
    fn test_as_days_f64() {
        assert_abs_diff_eq!(Duration::from_hours(36).as_days_f64(), 1.5);
    }

    #[test]
    fn test_time_delta_conversion() {
        assert_eq!(Duration::try_from(TimeDelta::hours(2)), Ok(Duration::from_hours(2)));
        assert!(matches!(
            Duration::try_from(TimeDelta::hours(-2)),
            Err(Error::InvalidDuration(_))
        ));
        assert_eq!(TimeDelta::from(Duration::from_days(1)), TimeDelta::days(1));
    }

    #[test]
    fn test_display() {
        assert_eq!(Duration::builder().days(1).hours(2).build().to_string(), "1day 2h");
        assert_eq!(Duration::ZERO.to_string(), "0s");
    }

    #[test]
    fn test_sum() {
        let total: Duration = [Duration::from_secs(1), Duration::from_millis(500)].into_iter().sum();
        assert_eq!(total.as_millis(), 1_500);
    }

    #[test]
    fn test_addition_saturates() {
        let huge = Duration::from_millis(u64::MAX / 2);
        let total: Duration = [huge, huge, huge].into_iter().sum();
        assert_eq!(total.as_millis(), u64::MAX);
        assert_eq!((huge + huge + huge).as_millis(), u64::MAX);

        let mut accumulated = huge;
        accumulated += huge;
        accumulated += huge;
        assert_eq!(accumulated.as_millis(), u64::MAX);
    }
}
