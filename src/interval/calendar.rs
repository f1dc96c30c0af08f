//! Calendar periods in the proleptic Gregorian calendar, UTC.

use chrono::{Days, Months, NaiveDate, Weekday};

use crate::{
    bounds::Bounds,
    duration::Duration,
    error::{Error, Result},
    interval::Interval,
    timestamp::Timestamp,
};

impl Interval {
    /// The whole day: `[date, date + 1 day)`.
    pub fn day(date: NaiveDate) -> Result<Self> {
        Self::calendar_span(date, date.checked_add_days(Days::new(1)))
    }

    /// ISO-8601 week, starting on Monday.
    pub fn iso_week(year: i32, week: u32) -> Result<Self> {
        let monday = NaiveDate::from_isoywd_opt(year, week, Weekday::Mon)
            .ok_or_else(|| Error::InvalidDate(format!("week {week} of {year}")))?;
        Self::calendar_span(monday, monday.checked_add_days(Days::new(7)))
    }

    pub fn month(year: i32, month: u32) -> Result<Self> {
        let first = NaiveDate::from_ymd_opt(year, month, 1)
            .ok_or_else(|| Error::InvalidDate(format!("month {month} of {year}")))?;
        Self::calendar_span(first, first.checked_add_months(Months::new(1)))
    }

    /// Quarter `1..=4` of the year.
    pub fn quarter(year: i32, quarter: u32) -> Result<Self> {
        let first = (1..=4)
            .contains(&quarter)
            .then(|| NaiveDate::from_ymd_opt(year, (quarter - 1) * 3 + 1, 1))
            .flatten()
            .ok_or_else(|| Error::InvalidDate(format!("quarter {quarter} of {year}")))?;
        Self::calendar_span(first, first.checked_add_months(Months::new(3)))
    }

    pub fn year(year: i32) -> Result<Self> {
        let first = NaiveDate::from_ymd_opt(year, 1, 1)
            .ok_or_else(|| Error::InvalidDate(format!("year {year}")))?;
        Self::calendar_span(first, first.checked_add_months(Months::new(12)))
    }

    /// `[start, start + duration)`.
    pub fn starting_at(start: impl Into<Timestamp>, duration: Duration) -> Result<Self> {
        let start = start.into();
        let end = start.checked_add(duration).ok_or(Error::InvalidRange { start, end: start })?;
        Self::try_new(start, end)
    }

    /// `[end - duration, end)`.
    pub fn ending_at(end: impl Into<Timestamp>, duration: Duration) -> Result<Self> {
        let end = end.into();
        let start = end.checked_sub(duration).ok_or(Error::InvalidRange { start: end, end })?;
        Self::try_new(start, end)
    }

    fn calendar_span(first: NaiveDate, next: Option<NaiveDate>) -> Result<Self> {
        let next = next.ok_or_else(|| Error::InvalidDate(format!("no calendar date after {first}")))?;
        Self::try_from_calendar_dates(first, next, Bounds::StartInclusiveEndExclusive)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn test_day() -> Result {
        let day = Interval::day(date(2024, 2, 29))?;
        assert_eq!(day, Interval::try_new(date(2024, 2, 29), date(2024, 3, 1))?);
        assert_eq!(day.duration(), Duration::from_days(1));
        assert!(Interval::day(NaiveDate::MAX).is_err());
        Ok(())
    }

    #[test]
    fn test_iso_week() -> Result {
        // Week 1 of 2025 starts in 2024.
        let week = Interval::iso_week(2025, 1)?;
        assert_eq!(week, Interval::try_new(date(2024, 12, 30), date(2025, 1, 6))?);
        assert!(matches!(Interval::iso_week(2024, 53), Err(Error::InvalidDate(_))));
        Ok(())
    }

    #[test]
    fn test_month() -> Result {
        assert_eq!(Interval::month(2024, 2)?.duration(), Duration::from_days(29));
        assert_eq!(Interval::month(2024, 12)?.end(), Timestamp::from(date(2025, 1, 1)));
        assert!(matches!(Interval::month(2024, 13), Err(Error::InvalidDate(_))));
        Ok(())
    }

    #[test]
    fn test_quarter() -> Result {
        assert_eq!(Interval::quarter(2024, 2)?, Interval::try_new(date(2024, 4, 1), date(2024, 7, 1))?);
        assert!(matches!(Interval::quarter(2024, 0), Err(Error::InvalidDate(_))));
        assert!(matches!(Interval::quarter(2024, 5), Err(Error::InvalidDate(_))));
        Ok(())
    }

    #[test]
    fn test_year() -> Result {
        assert_eq!(Interval::year(2024)?.duration(), Duration::from_days(366));
        assert_eq!(Interval::year(2023)?.duration(), Duration::from_days(365));
        Ok(())
    }

    #[test]
    fn test_relative_to_duration() -> Result {
        let anchor = date(2024, 1, 10);
        assert_eq!(
            Interval::starting_at(anchor, Duration::from_days(5))?,
            Interval::try_new(anchor, date(2024, 1, 15))?,
        );
        assert_eq!(
            Interval::ending_at(anchor, Duration::from_days(9))?,
            Interval::try_new(date(2024, 1, 1), anchor)?,
        );
        assert!(Interval::starting_at(anchor, Duration::ZERO).is_err());
        Ok(())
    }

    #[test]
    fn test_relative_to_duration_overflow() {
        let latest = Timestamp(i64::MAX - 10);
        assert_eq!(
            Interval::starting_at(latest, Duration::from_millis(100)),
            Err(Error::InvalidRange { start: latest, end: latest }),
        );
        let earliest = Timestamp(i64::MIN + 10);
        assert!(Interval::ending_at(earliest, Duration::from_millis(100)).is_err());
        assert_eq!(
            Interval::starting_at(latest, Duration::from_millis(10)).map(Interval::duration),
            Ok(Duration::from_millis(10)),
        );
    }
}
