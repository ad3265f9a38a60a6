//! Typed literal parsing.
//!
//! Literals arrive as text. The literal `null` stands for an absent value on
//! the types that allow it; everything else must parse as the field's type.

use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;

use crate::error::{QueryError, Result};

/// The literal that stands for an absent value.
pub const NULL: &str = "null";

const DATE_TIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

fn invalid(field: &str, literal: &str, expected: &'static str) -> QueryError {
    QueryError::InvalidLiteral {
        field: field.to_string(),
        literal: literal.to_string(),
        expected,
    }
}

/// Parses an integer literal, `null` yielding `None`.
pub fn parse_int(field: &str, literal: &str) -> Result<Option<i64>> {
    if literal == NULL {
        return Ok(None);
    }
    literal
        .parse::<i64>()
        .map(Some)
        .map_err(|_| invalid(field, literal, "an integer"))
}

/// Parses a decimal literal (`12`, `-0.5`, `1e3`), `null` yielding `None`.
pub fn parse_decimal(field: &str, literal: &str) -> Result<Option<Decimal>> {
    if literal == NULL {
        return Ok(None);
    }
    decimal_from_str(literal)
        .map(Some)
        .ok_or_else(|| invalid(field, literal, "a decimal"))
}

/// Decimal text, plain or in scientific notation.
pub fn decimal_from_str(text: &str) -> Option<Decimal> {
    Decimal::from_str(text)
        .or_else(|_| Decimal::from_scientific(text))
        .ok()
}

/// Parses `true`/`false` (any letter case), `null` yielding `None`.
pub fn parse_bool(field: &str, literal: &str) -> Result<Option<bool>> {
    if literal == NULL {
        return Ok(None);
    }
    if literal.eq_ignore_ascii_case("true") {
        Ok(Some(true))
    } else if literal.eq_ignore_ascii_case("false") {
        Ok(Some(false))
    } else {
        Err(invalid(field, literal, "a boolean"))
    }
}

/// Parses a date/time literal. `null` is only accepted when `nullable`.
pub fn parse_date_time(field: &str, literal: &str, nullable: bool) -> Result<Option<NaiveDateTime>> {
    if nullable && literal == NULL {
        return Ok(None);
    }
    date_time_from_str(literal)
        .map(Some)
        .ok_or_else(|| invalid(field, literal, "a date/time"))
}

/// Locale-independent date/time parsing.
///
/// Accepts RFC 3339 (converted to UTC), ISO 8601 without an offset using `T`
/// or a space as separator, with or without seconds, and bare dates
/// (midnight).
pub fn date_time_from_str(text: &str) -> Option<NaiveDateTime> {
    if let Ok(with_offset) = DateTime::parse_from_rfc3339(text) {
        return Some(with_offset.naive_utc());
    }
    for format in DATE_TIME_FORMATS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(text, format) {
            return Some(parsed);
        }
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ints() {
        assert_eq!(parse_int("Age", "42"), Ok(Some(42)));
        assert_eq!(parse_int("Age", "-3"), Ok(Some(-3)));
        assert_eq!(parse_int("Age", "null"), Ok(None));
        assert!(matches!(
            parse_int("Age", "4.5"),
            Err(QueryError::InvalidLiteral { .. })
        ));
        assert!(parse_int("Age", "NULL").is_err());
    }

    #[test]
    fn decimals_accept_fractions() {
        assert_eq!(
            parse_decimal("Price", "12.75"),
            Ok(Some(Decimal::new(1275, 2)))
        );
        assert_eq!(parse_decimal("Price", "3"), Ok(Some(Decimal::from(3))));
        assert_eq!(parse_decimal("Price", "1e3"), Ok(Some(Decimal::from(1000))));
        assert_eq!(parse_decimal("Price", "null"), Ok(None));
        assert!(parse_decimal("Price", "cheap").is_err());
    }

    #[test]
    fn bools() {
        assert_eq!(parse_bool("Active", "true"), Ok(Some(true)));
        assert_eq!(parse_bool("Active", "False"), Ok(Some(false)));
        assert_eq!(parse_bool("Active", "null"), Ok(None));
        assert!(parse_bool("Active", "yes").is_err());
    }

    #[test]
    fn date_times() {
        let expected = NaiveDate::from_ymd_opt(2024, 3, 1)
            .and_then(|d| d.and_hms_opt(10, 30, 0))
            .unwrap();

        assert_eq!(date_time_from_str("2024-03-01T10:30:00"), Some(expected));
        assert_eq!(date_time_from_str("2024-03-01 10:30"), Some(expected));
        assert_eq!(date_time_from_str("2024-03-01T12:30:00+02:00"), Some(expected));
        assert_eq!(
            date_time_from_str("2024-03-01"),
            NaiveDate::from_ymd_opt(2024, 3, 1).and_then(|d| d.and_hms_opt(0, 0, 0))
        );
        assert_eq!(date_time_from_str("03/01/2024"), None);
    }

    #[test]
    fn null_date_time_only_when_nullable() {
        assert_eq!(parse_date_time("Seen", "null", true), Ok(None));
        assert!(parse_date_time("Created", "null", false).is_err());
    }
}
