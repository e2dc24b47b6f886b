//! Due-date input parsing and display formatting.
//!
//! Deadlines are stored as epoch milliseconds. Input without an explicit
//! offset is read as UTC.

use anyhow::{bail, Result};
use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::{Date, OffsetDateTime, PrimitiveDateTime, Time};

const NANOS_PER_MILLI: i128 = 1_000_000;

/// Parses `YYYY-MM-DDTHH:MM`, `YYYY-MM-DD` (midnight) or RFC 3339.
pub fn parse_due(input: &str) -> Result<i64> {
    let value = input.trim();

    if let Ok(at) = OffsetDateTime::parse(value, &Rfc3339) {
        return Ok(to_epoch_ms(at));
    }
    if let Ok(at) =
        PrimitiveDateTime::parse(value, format_description!("[year]-[month]-[day]T[hour]:[minute]"))
    {
        return Ok(to_epoch_ms(at.assume_utc()));
    }
    if let Ok(date) = Date::parse(value, format_description!("[year]-[month]-[day]")) {
        return Ok(to_epoch_ms(date.with_time(Time::MIDNIGHT).assume_utc()));
    }

    bail!("invalid due date `{value}`; expected YYYY-MM-DD, YYYY-MM-DDTHH:MM or RFC 3339")
}

/// Renders an epoch-millisecond deadline as `YYYY-MM-DD HH:MM` UTC.
///
/// Values outside the representable range fall back to the raw number.
pub fn format_due(epoch_ms: i64) -> String {
    OffsetDateTime::from_unix_timestamp_nanos(i128::from(epoch_ms) * NANOS_PER_MILLI)
        .ok()
        .and_then(|at| {
            at.format(format_description!("[year]-[month]-[day] [hour]:[minute]"))
                .ok()
        })
        .unwrap_or_else(|| format!("{epoch_ms}ms"))
}

pub fn now_epoch_ms() -> i64 {
    to_epoch_ms(OffsetDateTime::now_utc())
}

fn to_epoch_ms(at: OffsetDateTime) -> i64 {
    (at.unix_timestamp_nanos() / NANOS_PER_MILLI) as i64
}

#[cfg(test)]
mod tests {
    use super::{format_due, parse_due};

    #[test]
    fn date_only_input_is_midnight_utc() {
        assert_eq!(parse_due("1970-01-02").unwrap(), 86_400_000);
    }

    #[test]
    fn minute_precision_input_is_utc() {
        let parsed = parse_due("2024-05-01T09:30").unwrap();
        assert_eq!(format_due(parsed), "2024-05-01 09:30");
    }

    #[test]
    fn rfc3339_offset_is_honored() {
        let utc = parse_due("2024-05-01T09:30:00Z").unwrap();
        let shifted = parse_due("2024-05-01T11:30:00+02:00").unwrap();
        assert_eq!(utc, shifted);
    }

    #[test]
    fn garbage_is_rejected() {
        let err = parse_due("next tuesday").unwrap_err();
        assert!(err.to_string().contains("invalid due date"));
        assert!(parse_due("2024-13-01").is_err());
    }
}
