use std::str::FromStr;

use chrono::{DateTime, NaiveDate};
use fennec_periods::{Bounds, Interval, Timestamp};

use crate::prelude::*;

/// `START..END` as given on the command line.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct PeriodArg {
    start: Timestamp,
    end: Timestamp,
}

impl PeriodArg {
    pub fn to_interval(self, bounds: Bounds, calendar_dates: bool) -> Result<Interval> {
        let interval = if calendar_dates {
            Interval::try_from_calendar_dates(self.start, self.end, bounds)
        } else {
            Interval::try_from_instants(self.start, self.end, bounds)
        };
        interval.with_context(|| format!("`{}..{}` is not a valid period", self.start, self.end))
    }
}

impl FromStr for PeriodArg {
    type Err = Error;

    fn from_str(text: &str) -> Result<Self> {
        let (start, end) =
            text.split_once("..").with_context(|| format!("`{text}` must look like `START..END`"))?;
        Ok(Self { start: parse_endpoint(start)?, end: parse_endpoint(end)? })
    }
}

fn parse_endpoint(text: &str) -> Result<Timestamp> {
    if let Ok(date) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
        return Ok(date.into());
    }
    let date_time = DateTime::parse_from_rfc3339(text)
        .with_context(|| format!("`{text}` is neither a date nor an RFC 3339 instant"))?;
    Ok(date_time.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dates() -> Result {
        let period: PeriodArg = "2024-01-01..2024-01-15".parse()?;
        assert_eq!(
            period.to_interval(Bounds::default(), false)?,
            Interval::try_new(
                NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
                NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            )?,
        );
        Ok(())
    }

    #[test]
    fn test_instants() -> Result {
        let period: PeriodArg = "2024-01-01T10:00:00+01:00..2024-01-01T12:00:00Z".parse()?;
        let interval = period.to_interval(Bounds::BothInclusive, false)?;
        assert_eq!(interval.duration(), fennec_periods::Duration::from_hours(3));

        // Both endpoints fall on the same day.
        assert!(period.to_interval(Bounds::default(), true).is_err());
        Ok(())
    }

    #[test]
    fn test_invalid() {
        assert!("2024-01-01".parse::<PeriodArg>().is_err());
        assert!("2024-01-01..tomorrow".parse::<PeriodArg>().is_err());
    }
}
