use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

use crate::Value;

/// Layouts accepted in addition to RFC 3339, all read as UTC.
const NAIVE_LAYOUTS: [&str; 3] = [
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y/%m/%d %H:%M:%S%.f",
];

/// Recognizes a date-time value.
///
/// Accepts a [`Value::Date`] as is, or a string in one of these forms:
///
/// - RFC 3339 (`1926-08-17T00:00:00+08:00`, `2020-01-01T00:00:00Z`)
/// - `YYYY-MM-DD HH:MM:SS[.fraction]`, `YYYY-MM-DDTHH:MM:SS[.fraction]`, `YYYY/MM/DD HH:MM:SS[.fraction]`
/// - `YYYY-MM-DD`
///
/// Forms without an offset are read as UTC. Everything else yields `None`.
///
/// # Examples
///
/// ```
/// use jm_value::{Value, parse_date};
///
/// let date = parse_date(&Value::from("1926-08-17 00:00:00")).unwrap();
/// assert_eq!(date.to_rfc3339(), "1926-08-17T00:00:00+00:00");
///
/// assert!(parse_date(&Value::from("yesterday")).is_none());
/// assert!(parse_date(&Value::from(0)).is_none());
/// ```
pub fn parse_date(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::Date(date) => Some(*date),
        Value::String(text) => parse_date_str(text.trim()),
        _ => None,
    }
}

fn parse_date_str(text: &str) -> Option<DateTime<Utc>> {
    if let Ok(date) = DateTime::parse_from_rfc3339(text) {
        return Some(date.with_timezone(&Utc));
    }

    NAIVE_LAYOUTS
        .iter()
        .find_map(|layout| NaiveDateTime::parse_from_str(text, layout).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(text, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
        .map(|naive| naive.and_utc())
}
