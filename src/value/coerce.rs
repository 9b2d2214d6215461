//! # Value Coercion
//!
//! Detects ISO-8601 date and date-time strings and parses them into
//! structured temporal values. Anything else passes through unchanged.
//!
//! The date pattern is the strict zero-padded ISO-8601 subset: two-digit
//! month in `01..=12` and two-digit day in `01..=31`. A string that matches
//! the pattern but names an impossible calendar date (e.g. `2022-02-31`)
//! is rejected rather than silently kept as text.

use std::sync::LazyLock;

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, TimeZone};
use regex::Regex;
use serde_json::Value;

use crate::filter::{FilterError, FilterResult};
use super::FilterValue;

static DATE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\d{4}-(0[1-9]|1[0-2])-(0[1-9]|[12]\d|3[01])$")
        .unwrap_or_else(|e| panic!("date pattern must compile: {}", e))
});

static DATETIME_RE: LazyLock<Regex> = LazyLock::new(|| {
    // Optional sign and extended year, `T` separator, optional seconds and
    // fractional seconds, optional `Z` or `+/-HH:MM` offset.
    Regex::new(
        r"^[+-]?\d{4,6}-(0[1-9]|1[0-2])-(0[1-9]|[12]\d|3[01])T([01]\d|2[0-3]):[0-5]\d(:[0-5]\d(\.\d+)?)?([zZ]|[+-]([01]\d|2[0-3]):[0-5]\d)?$",
    )
    .unwrap_or_else(|e| panic!("date-time pattern must compile: {}", e))
});

/// True if `raw` matches the strict calendar-date pattern `YYYY-MM-DD`
pub fn is_date(raw: &str) -> bool {
    DATE_RE.is_match(raw)
}

/// True if `raw` matches the extended ISO-8601 date-time pattern
pub fn is_datetime(raw: &str) -> bool {
    DATETIME_RE.is_match(raw)
}

/// Convert a raw JSON value into a [`FilterValue`].
///
/// Strings matching the date pattern become `Date`, strings matching the
/// date-time pattern become a timezone-aware `DateTime` (a trailing `Z` or
/// a missing offset both mean UTC), all other strings stay `Text`. Arrays
/// coerce element-wise. JSON objects have no filter-value representation.
pub fn coerce(raw: &Value) -> FilterResult<FilterValue> {
    match raw {
        Value::Null => Ok(FilterValue::Null),
        Value::Bool(b) => Ok(FilterValue::Bool(*b)),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Ok(FilterValue::Int(i))
            } else if let Some(f) = n.as_f64() {
                Ok(FilterValue::Float(f))
            } else {
                Err(FilterError::UnsupportedValue(n.to_string()))
            }
        }
        Value::String(s) => coerce_str(s),
        Value::Array(items) => {
            let coerced = items.iter().map(coerce).collect::<FilterResult<Vec<_>>>()?;
            Ok(FilterValue::List(coerced))
        }
        Value::Object(_) => Err(FilterError::UnsupportedValue("object".to_string())),
    }
}

fn coerce_str(raw: &str) -> FilterResult<FilterValue> {
    if is_date(raw) {
        parse_date(raw).map(FilterValue::Date)
    } else if is_datetime(raw) {
        parse_datetime(raw).map(FilterValue::DateTime)
    } else {
        Ok(FilterValue::Text(raw.to_string()))
    }
}

pub(crate) fn parse_date(raw: &str) -> FilterResult<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|_| FilterError::InvalidDate(raw.to_string()))
}

pub(crate) fn parse_datetime(raw: &str) -> FilterResult<DateTime<FixedOffset>> {
    let (naive_part, offset) = split_offset(raw)?;
    let naive = parse_naive(naive_part)
        .ok_or_else(|| FilterError::InvalidDateTime(raw.to_string()))?;
    offset
        .from_local_datetime(&naive)
        .single()
        .ok_or_else(|| FilterError::InvalidDateTime(raw.to_string()))
}

/// Split a date-time string into its naive part and UTC offset.
///
/// A trailing `Z` is UTC; so is a string with no offset at all.
fn split_offset(raw: &str) -> FilterResult<(&str, FixedOffset)> {
    let utc = FixedOffset::east_opt(0)
        .ok_or_else(|| FilterError::InvalidDateTime(raw.to_string()))?;
    if let Some(stripped) = raw.strip_suffix(['z', 'Z']) {
        return Ok((stripped, utc));
    }
    let bytes = raw.as_bytes();
    if raw.len() > 6 {
        let sign = bytes[raw.len() - 6];
        if (sign == b'+' || sign == b'-') && bytes[raw.len() - 3] == b':' {
            let (rest, tail) = raw.split_at(raw.len() - 6);
            let hours: i32 = tail[1..3]
                .parse()
                .map_err(|_| FilterError::InvalidDateTime(raw.to_string()))?;
            let minutes: i32 = tail[4..6]
                .parse()
                .map_err(|_| FilterError::InvalidDateTime(raw.to_string()))?;
            let mut seconds = hours * 3600 + minutes * 60;
            if sign == b'-' {
                seconds = -seconds;
            }
            let offset = FixedOffset::east_opt(seconds)
                .ok_or_else(|| FilterError::InvalidDateTime(raw.to_string()))?;
            return Ok((rest, offset));
        }
    }
    Ok((raw, utc))
}

fn parse_naive(raw: &str) -> Option<NaiveDateTime> {
    const FORMATS: [&str; 3] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"];
    FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};
    use serde_json::json;

    #[test]
    fn test_date_regex_accepts_padded_dates() {
        for raw in [
            "2022-01-01", "2022-01-31", "2022-02-28", "2022-09-10", "2022-10-24",
            "2022-12-09", "2022-12-20", "2022-12-31",
        ] {
            assert!(is_date(raw), "{} should match", raw);
        }
    }

    #[test]
    fn test_date_regex_rejects_unpadded_and_out_of_range() {
        for raw in [
            "2022-1-5", "2022-13-01", "2022-00-10", "2022-10-32", "2022-10-00",
            "22-10-24", "2022/10/24", "2022-10-24T00:00:00Z",
        ] {
            assert!(!is_date(raw), "{} should not match", raw);
        }
    }

    #[test]
    fn test_datetime_regex() {
        assert!(is_datetime("2022-04-01T11:34:34-00:00"));
        assert!(is_datetime("2022-04-20T16:20:00Z"));
        assert!(is_datetime("2022-04-20T16:20:00.123+05:30"));
        assert!(is_datetime("2022-04-20T16:20"));
        assert!(!is_datetime("2022-04-20 16:20:00"));
        assert!(!is_datetime("2022-04-20"));
    }

    #[test]
    fn test_coerce_date_string() {
        let value = coerce(&json!("2022-10-24")).unwrap();
        match value {
            FilterValue::Date(d) => {
                assert_eq!((d.year(), d.month(), d.day()), (2022, 10, 24));
            }
            other => panic!("expected date, got {:?}", other),
        }
    }

    #[test]
    fn test_coerce_datetime_utc() {
        let value = coerce(&json!("2022-04-20T16:20:00Z")).unwrap();
        match value {
            FilterValue::DateTime(dt) => {
                assert_eq!(dt.hour(), 16);
                assert_eq!(dt.minute(), 20);
                assert_eq!(dt.offset().local_minus_utc(), 0);
            }
            other => panic!("expected date-time, got {:?}", other),
        }
    }

    #[test]
    fn test_coerce_datetime_with_offset_preserves_instant() {
        let utc = coerce(&json!("2022-04-20T16:20:00+00:00")).unwrap();
        let eastern = coerce(&json!("2022-04-20T12:20:00-04:00")).unwrap();
        assert_eq!(utc, eastern);
    }

    #[test]
    fn test_coerce_plain_string_unchanged() {
        let value = coerce(&json!("Fido")).unwrap();
        assert_eq!(value, FilterValue::Text("Fido".to_string()));
    }

    #[test]
    fn test_coerce_unpadded_date_stays_text() {
        let value = coerce(&json!("2022-1-5")).unwrap();
        assert_eq!(value, FilterValue::Text("2022-1-5".to_string()));
    }

    #[test]
    fn test_coerce_impossible_calendar_date_fails() {
        let err = coerce(&json!("2022-02-31")).unwrap_err();
        assert!(matches!(err, FilterError::InvalidDate(_)));
    }

    #[test]
    fn test_coerce_scalars() {
        assert_eq!(coerce(&json!(12)).unwrap(), FilterValue::Int(12));
        assert_eq!(coerce(&json!(12.345)).unwrap(), FilterValue::Float(12.345));
        assert_eq!(coerce(&json!(true)).unwrap(), FilterValue::Bool(true));
        assert_eq!(coerce(&json!(null)).unwrap(), FilterValue::Null);
    }

    #[test]
    fn test_coerce_array_elementwise() {
        let value = coerce(&json!(["Fido", "2022-10-24", 3])).unwrap();
        match value {
            FilterValue::List(items) => {
                assert_eq!(items.len(), 3);
                assert!(matches!(items[0], FilterValue::Text(_)));
                assert!(matches!(items[1], FilterValue::Date(_)));
                assert!(matches!(items[2], FilterValue::Int(3)));
            }
            other => panic!("expected list, got {:?}", other),
        }
    }

    #[test]
    fn test_coerce_object_rejected() {
        let err = coerce(&json!({"a": 1})).unwrap_err();
        assert!(matches!(err, FilterError::UnsupportedValue(_)));
    }
}
