//! Module for handling timestamp parsing and formatting.

use chrono::NaiveDateTime;

/// Timestamp layout used by both sources, e.g. `1973-08-16 10:58:34.413`
pub const DEFAULT_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f";

/// Layout used when timestamps are written back out (fixed six-digit fraction)
pub const STORAGE_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f";

/// Longest fraction of a second accepted in source timestamps
const MAX_FRACTION_DIGITS: usize = 6;

/// Reasons a timestamp field is rejected
#[derive(Debug, thiserror::Error)]
pub enum TimestampError {
    /// `%.f` in the format demands a `.` followed by 1 to 6 digits
    #[error("expected '.' and 1 to 6 fractional digits after the seconds")]
    Fraction,

    /// Leading or trailing whitespace around the value
    #[error("unexpected whitespace around timestamp")]
    Whitespace,

    #[error(transparent)]
    Parse(#[from] chrono::ParseError),
}

/// Parse a timestamp string with the given format
///
/// chrono's `%.f` also takes a missing fraction or up to nine digits; when the
/// format ends in `%.f` the value must instead end in `.` plus 1 to 6 digits.
/// Surrounding whitespace is not stripped.
pub fn parse_timestamp(s: &str, format: &str) -> Result<NaiveDateTime, TimestampError> {
    if s.trim() != s {
        return Err(TimestampError::Whitespace);
    }
    if format.ends_with("%.f") && !has_source_fraction(s) {
        return Err(TimestampError::Fraction);
    }
    Ok(NaiveDateTime::parse_from_str(s, format)?)
}

fn has_source_fraction(s: &str) -> bool {
    s.rsplit_once('.').is_some_and(|(_, digits)| {
        (1..=MAX_FRACTION_DIGITS).contains(&digits.len())
            && digits.bytes().all(|b| b.is_ascii_digit())
    })
}

/// Format a timestamp so that lexical and chronological order agree
#[must_use]
pub fn format_timestamp(ts: &NaiveDateTime) -> String {
    ts.format(STORAGE_TIMESTAMP_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Timelike};

    #[test]
    fn parses_millisecond_fraction() {
        let ts = parse_timestamp("1973-08-16 10:58:34.413", DEFAULT_TIMESTAMP_FORMAT).unwrap();
        assert_eq!(ts.date(), NaiveDate::from_ymd_opt(1973, 8, 16).unwrap());
        assert_eq!(ts.hour(), 10);
        assert_eq!(ts.nanosecond(), 413_000_000);
    }

    #[test]
    fn parses_microsecond_fraction() {
        let ts = parse_timestamp("2019-01-01 00:00:00.000001", DEFAULT_TIMESTAMP_FORMAT).unwrap();
        assert_eq!(ts.nanosecond(), 1_000);
    }

    #[test]
    fn rejects_date_only() {
        assert!(parse_timestamp("1990-01-01", DEFAULT_TIMESTAMP_FORMAT).is_err());
        assert!(parse_timestamp("01/01/1990 00:00:00.000", DEFAULT_TIMESTAMP_FORMAT).is_err());
    }

    #[test]
    fn rejects_missing_fraction() {
        let err = parse_timestamp("1990-01-01 00:00:00", DEFAULT_TIMESTAMP_FORMAT).unwrap_err();
        assert!(matches!(err, TimestampError::Fraction));
        assert!(parse_timestamp("1990-01-01 00:00:00.", DEFAULT_TIMESTAMP_FORMAT).is_err());
    }

    #[test]
    fn rejects_more_than_six_fraction_digits() {
        let err =
            parse_timestamp("1990-01-01 00:00:00.1234567", DEFAULT_TIMESTAMP_FORMAT).unwrap_err();
        assert!(matches!(err, TimestampError::Fraction));
        assert!(parse_timestamp("1990-01-01 00:00:00.123456789", DEFAULT_TIMESTAMP_FORMAT).is_err());
        assert!(parse_timestamp("1990-01-01 00:00:00.123456", DEFAULT_TIMESTAMP_FORMAT).is_ok());
    }

    #[test]
    fn rejects_surrounding_whitespace() {
        for text in [" 1990-01-01 00:00:00.000", "1990-01-01 00:00:00.000 "] {
            let err = parse_timestamp(text, DEFAULT_TIMESTAMP_FORMAT).unwrap_err();
            assert!(matches!(err, TimestampError::Whitespace));
        }
    }

    #[test]
    fn custom_format_without_fraction() {
        let ts = parse_timestamp("1990-01-01 12:30:00", "%Y-%m-%d %H:%M:%S").unwrap();
        assert_eq!(ts.hour(), 12);
    }

    #[test]
    fn storage_format_round_trips() {
        let ts = parse_timestamp("1992-06-27 03:32:50.653", DEFAULT_TIMESTAMP_FORMAT).unwrap();
        let text = format_timestamp(&ts);
        assert_eq!(text, "1992-06-27 03:32:50.653000");
        assert_eq!(parse_timestamp(&text, DEFAULT_TIMESTAMP_FORMAT).unwrap(), ts);
    }
}
