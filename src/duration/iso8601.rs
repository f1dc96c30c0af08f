//! ISO-8601 duration text: `PnYnMnWnDTnHnMnS`.
//!
//! Years and months have fixed lengths, see [`Duration::MILLIS_PER_YEAR`] and
//! [`Duration::MILLIS_PER_MONTH`]. Only seconds may carry a fraction, which is truncated to
//! whole milliseconds.

use crate::{
    duration::Duration,
    error::{Error, Result},
};

const DATE_DESIGNATORS: [(char, u64); 4] = [
    ('Y', Duration::MILLIS_PER_YEAR),
    ('M', Duration::MILLIS_PER_MONTH),
    ('W', Duration::MILLIS_PER_WEEK),
    ('D', Duration::MILLIS_PER_DAY),
];

const TIME_DESIGNATORS: [(char, u64); 3] = [
    ('H', Duration::MILLIS_PER_HOUR),
    ('M', Duration::MILLIS_PER_MINUTE),
    ('S', Duration::MILLIS_PER_SECOND),
];

pub fn parse(text: &str) -> Result<Duration> {
    let invalid = || Error::InvalidDuration(format!("`{text}` is not an ISO-8601 duration"));

    let body = text.strip_prefix('P').ok_or_else(invalid)?;
    let (date_part, time_part) = match body.split_once('T') {
        Some((date_part, time_part)) => (date_part, Some(time_part)),
        None => (body, None),
    };
    if time_part == Some("") || (date_part.is_empty() && time_part.is_none()) {
        return Err(invalid());
    }

    let date = parse_part(date_part, &DATE_DESIGNATORS).ok_or_else(invalid)?;
    let time = match time_part {
        Some(time_part) => parse_part(time_part, &TIME_DESIGNATORS).ok_or_else(invalid)?,
        None => Duration::ZERO,
    };
    Ok(date.saturating_add(time))
}

/// Sum up `<number><designator>` components.
///
/// Designators must follow the given order, each one at most once.
fn parse_part(mut part: &str, designators: &[(char, u64)]) -> Option<Duration> {
    let mut total = Duration::ZERO;
    let mut next_designator = 0;
    while !part.is_empty() {
        let number_len = part.find(|c: char| !(c.is_ascii_digit() || c == '.' || c == ','))?;
        let (number, rest) = part.split_at(number_len);
        let designator = rest.chars().next()?;
        let offset =
            designators[next_designator..].iter().position(|(known, _)| *known == designator)?;
        let (_, unit_millis) = designators[next_designator + offset];
        next_designator += offset + 1;
        total = total.saturating_add(parse_component(number, unit_millis)?);
        part = &rest[designator.len_utf8()..];
    }
    Some(total)
}

fn parse_component(number: &str, unit_millis: u64) -> Option<Duration> {
    let (whole, fraction) = match number.split_once(['.', ',']) {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (number, None),
    };
    if whole.is_empty() || !whole.bytes().all(|byte| byte.is_ascii_digit()) {
        return None;
    }
    let mut millis = whole.parse::<u64>().ok()?.checked_mul(unit_millis)?;

    if let Some(fraction) = fraction {
        if unit_millis != Duration::MILLIS_PER_SECOND
            || fraction.is_empty()
            || !fraction.bytes().all(|byte| byte.is_ascii_digit())
        {
            return None;
        }
        let (value, n_digits) = fraction
            .bytes()
            .take(3)
            .fold((0_u64, 0_u32), |(value, n_digits), digit| {
                (value * 10 + u64::from(digit - b'0'), n_digits + 1)
            });
        millis = millis.checked_add(value * 10_u64.pow(3 - n_digits))?;
    }

    Some(Duration::from_millis(millis))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_date_components() -> Result {
        assert_eq!(parse("P1W")?, Duration::from_weeks(1));
        assert_eq!(parse("P2D")?, Duration::from_days(2));
        assert_eq!(parse("P1Y")?, Duration::from_days(365));
        assert_eq!(parse("P1M")?, Duration::from_days(30));
        assert_eq!(parse("P1Y2M3D")?, Duration::from_days(365 + 60 + 3));
        Ok(())
    }

    #[test]
    fn test_minutes_versus_months() -> Result {
        assert_eq!(parse("PT1M")?, Duration::from_mins(1));
        assert_eq!(parse("P1MT1M")?, Duration::from_days(30).saturating_add(Duration::from_mins(1)));
        Ok(())
    }

    #[test]
    fn test_date_and_time() -> Result {
        assert_eq!(parse("P1DT12H")?, Duration::from_hours(36));
        assert_eq!(parse("PT1H30M15S")?, Duration::builder().hours(1).minutes(30).seconds(15).build());
        Ok(())
    }

    #[test]
    fn test_fractional_seconds() -> Result {
        assert_eq!(parse("PT0.5S")?, Duration::from_millis(500));
        assert_eq!(parse("PT1,25S")?, Duration::from_millis(1_250));
        assert_eq!(parse("PT0.0019S")?, Duration::from_millis(1));
        Ok(())
    }

    #[test]
    fn test_invalid() {
        for text in ["", "P", "PT", "P1DT", "1D", "P1H", "PT1D", "P1D1Y", "P1.5D", "P-1D", "P1", "PD", "PT1.S"] {
            assert!(matches!(parse(text), Err(Error::InvalidDuration(_))), "`{text}` must be rejected");
        }
    }

    #[test]
    fn test_from_str() -> Result {
        assert_eq!("PT2H".parse::<Duration>()?, Duration::from_hours(2));
        Ok(())
    }
}
