use std::fmt::Write;

use crate::{interval::Interval, timestamp::Timestamp};

/// Renders an interval for humans.
pub trait IntervalFormat {
    #[must_use]
    fn format(&self, interval: Interval) -> String;
}

/// `[2024-01-01T00:00:00Z, 2024-01-15T00:00:00Z)`, same as [`Interval`]'s `Display`.
#[derive(Copy, Clone, Debug, Default)]
pub struct Rfc3339;

impl IntervalFormat for Rfc3339 {
    fn format(&self, interval: Interval) -> String {
        interval.to_string()
    }
}

/// Both endpoints through a `strftime`-like pattern, for example `[2024-01-01, 2024-01-15)`
/// with the default `%Y-%m-%d`.
#[derive(Clone, Debug)]
pub struct Pattern<'a>(pub &'a str);

impl Pattern<'_> {
    pub const CALENDAR_DAYS: Self = Self("%Y-%m-%d");

    #[must_use]
    pub fn format_timestamp(&self, timestamp: Timestamp) -> String {
        let mut formatted = String::new();
        match timestamp.to_date_time() {
            // Bad patterns make `chrono` fail rather than panic.
            Some(date_time) if write!(formatted, "{}", date_time.format(self.0)).is_ok() => formatted,
            _ => timestamp.to_string(),
        }
    }
}

impl Default for Pattern<'_> {
    fn default() -> Self {
        Self::CALENDAR_DAYS
    }
}

impl IntervalFormat for Pattern<'_> {
    fn format(&self, interval: Interval) -> String {
        format!(
            "{}{}, {}{}",
            interval.bounds().opening(),
            self.format_timestamp(interval.start()),
            self.format_timestamp(interval.end()),
            interval.bounds().closing(),
        )
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::bounds::Bounds;

    fn january() -> Interval {
        Interval::try_from_instants(
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
            Bounds::BothInclusive,
        )
        .unwrap()
    }

    #[test]
    fn test_rfc3339() {
        assert_eq!(Rfc3339.format(january()), "[2024-01-01T00:00:00Z, 2024-02-01T00:00:00Z]");
    }

    #[test]
    fn test_calendar_days() {
        assert_eq!(Pattern::default().format(january()), "[2024-01-01, 2024-02-01]");
    }

    #[test]
    fn test_custom_pattern() {
        assert_eq!(Pattern("%b %d").format(january()), "[Jan 01, Feb 01]");
    }

    #[test]
    fn test_unrepresentable_timestamp() {
        assert_eq!(Pattern::default().format_timestamp(Timestamp(i64::MAX)), format!("{}ms", i64::MAX));
    }
}
