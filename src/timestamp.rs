use std::fmt::{Debug, Display, Formatter};

use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, TimeZone, Utc};

use crate::duration::Duration;

/// Instant in milliseconds since the Unix epoch, UTC.
#[derive(
    Copy,
    Clone,
    Default,
    Eq,
    Hash,
    Ord,
    PartialEq,
    PartialOrd,
    derive_more::From,
    derive_more::Into,
)]
#[must_use]
pub struct Timestamp(pub i64);

impl Timestamp {
    pub const MILLIS_PER_DAY: i64 = 86_400_000;

    pub const fn from_millis(millis: i64) -> Self {
        Self(millis)
    }

    #[must_use]
    pub const fn as_millis(self) -> i64 {
        self.0
    }

    /// Truncate to the midnight UTC of the same calendar day.
    ///
    /// [`None`] for the last partial day before `i64::MIN`, whose midnight is not representable.
    #[must_use]
    pub const fn floor_to_day(self) -> Option<Self> {
        match self.0.div_euclid(Self::MILLIS_PER_DAY).checked_mul(Self::MILLIS_PER_DAY) {
            Some(millis) => Some(Self(millis)),
            None => None,
        }
    }

    #[must_use]
    pub const fn is_midnight(self) -> bool {
        self.0.rem_euclid(Self::MILLIS_PER_DAY) == 0
    }

    /// Convert into a date-time, if `chrono` can represent it.
    #[must_use]
    pub fn to_date_time(self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.0)
    }

    /// [`None`] on `i64` overflow.
    #[must_use]
    pub const fn checked_add(self, duration: Duration) -> Option<Self> {
        match self.0.checked_add_unsigned(duration.as_millis()) {
            Some(millis) => Some(Self(millis)),
            None => None,
        }
    }

    /// [`None`] on `i64` overflow.
    #[must_use]
    pub const fn checked_sub(self, duration: Duration) -> Option<Self> {
        match self.0.checked_sub_unsigned(duration.as_millis()) {
            Some(millis) => Some(Self(millis)),
            None => None,
        }
    }

    /// Distance to the other instant, in either direction.
    pub const fn abs_diff(self, other: Self) -> Duration {
        Duration::from_millis(self.0.abs_diff(other.0))
    }
}

impl<Tz: TimeZone> From<DateTime<Tz>> for Timestamp {
    fn from(date_time: DateTime<Tz>) -> Self {
        Self(date_time.timestamp_millis())
    }
}

impl From<NaiveDateTime> for Timestamp {
    /// Interpret the naive date-time as UTC.
    fn from(date_time: NaiveDateTime) -> Self {
        Self(date_time.and_utc().timestamp_millis())
    }
}

impl From<NaiveDate> for Timestamp {
    /// Midnight UTC of the date.
    fn from(date: NaiveDate) -> Self {
        Self::from(date.and_time(chrono::NaiveTime::MIN))
    }
}

impl Display for Timestamp {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.to_date_time() {
            Some(date_time) => {
                write!(f, "{}", date_time.to_rfc3339_opts(SecondsFormat::AutoSi, true))
            }
            None => write!(f, "{}ms", self.0),
        }
    }
}

impl Debug for Timestamp {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(self, f)
    }
}
