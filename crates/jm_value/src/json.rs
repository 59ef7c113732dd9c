use alloc::string::{String, ToString};

use thiserror::Error;

use crate::Value;

// -----------------------------------------------------------------------------
// JsonError

/// A JSON document could not be read or written.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid JSON at line {line}, column {column}: {message}")]
pub struct JsonError {
    message: String,
    line: usize,
    column: usize,
}

impl JsonError {
    /// Returns the underlying message.
    #[inline]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the one-based line of the failure, or 0 when not applicable.
    #[inline]
    pub const fn line(&self) -> usize {
        self.line
    }

    /// Returns the one-based column of the failure, or 0 when not applicable.
    #[inline]
    pub const fn column(&self) -> usize {
        self.column
    }
}

impl From<serde_json::Error> for JsonError {
    fn from(error: serde_json::Error) -> Self {
        Self {
            line: error.line(),
            column: error.column(),
            message: error.to_string(),
        }
    }
}

// -----------------------------------------------------------------------------
// Text codec

/// Parses JSON text into a [`Value`].
///
/// # Examples
///
/// ```
/// use jm_value::{Value, from_json_str};
///
/// let value = from_json_str(r#"{ "c": 100, "d": [true, null] }"#).unwrap();
/// assert_eq!(value.get("c"), &Value::from(100));
///
/// assert!(from_json_str("{ c: 1 }").is_err());
/// ```
pub fn from_json_str(text: &str) -> Result<Value, JsonError> {
    Ok(serde_json::from_str(text)?)
}

/// Writes a [`Value`] as compact JSON text.
///
/// # Examples
///
/// ```
/// use jm_value::{Value, to_json_string};
///
/// let value: Value = [("a", Value::from(1)), ("b", Value::Absent)].into_iter().collect();
/// assert_eq!(to_json_string(&value).unwrap(), r#"{"a":1}"#);
/// ```
pub fn to_json_string(value: &Value) -> Result<String, JsonError> {
    Ok(serde_json::to_string(value)?)
}

// -----------------------------------------------------------------------------
// serde_json bridge

impl From<serde_json::Value> for Value {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(v) => Value::Bool(v),
            serde_json::Value::Number(v) => v.as_f64().map_or(Value::Null, Value::Number),
            serde_json::Value::String(v) => Value::String(v),
            serde_json::Value::Array(items) => items.into_iter().map(Value::from).collect(),
            serde_json::Value::Object(members) => Value::Object(
                members
                    .into_iter()
                    .map(|(key, value)| (key, Value::from(value)))
                    .collect(),
            ),
        }
    }
}

impl From<Value> for serde_json::Value {
    fn from(value: Value) -> Self {
        match value {
            Value::Null | Value::Absent => serde_json::Value::Null,
            Value::Bool(v) => serde_json::Value::Bool(v),
            Value::Number(v) => serde_json::to_value(Value::Number(v))
                .unwrap_or(serde_json::Value::Null),
            Value::String(v) => serde_json::Value::String(v),
            Value::Date(v) => serde_json::to_value(Value::Date(v))
                .unwrap_or(serde_json::Value::Null),
            Value::Array(items) => {
                serde_json::Value::Array(items.into_iter().map(serde_json::Value::from).collect())
            }
            Value::Object(members) => serde_json::Value::Object(
                members
                    .into_iter()
                    .filter(|(_, value)| !value.is_absent())
                    .map(|(key, value)| (key, serde_json::Value::from(value)))
                    .collect(),
            ),
        }
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use alloc::vec;

    use chrono::{TimeZone, Utc};
    use serde_json::json;

    use super::{from_json_str, to_json_string};
    use crate::Value;

    #[test]
    fn integral_numbers_are_written_as_integers() {
        let value = Value::from(vec![Value::from(1), Value::from(1.5), Value::from(-0.0)]);
        assert_eq!(to_json_string(&value).unwrap(), "[1,1.5,0]");
    }

    #[test]
    fn dates_are_written_as_rfc3339() {
        let date = Utc.with_ymd_and_hms(1926, 8, 17, 0, 0, 0).unwrap();
        assert_eq!(
            to_json_string(&Value::Date(date)).unwrap(),
            r#""1926-08-17T00:00:00.000Z""#
        );
    }

    #[test]
    fn absent_array_items_become_null() {
        let value = Value::from(vec![Value::Absent]);
        assert_eq!(to_json_string(&value).unwrap(), "[null]");
    }

    #[test]
    fn text_round_trip_keeps_member_order() {
        let text = r#"{"z":1,"a":{"y":"x","b":[null,false]}}"#;
        let value = from_json_str(text).unwrap();
        assert_eq!(to_json_string(&value).unwrap(), text);
    }

    #[test]
    fn parse_error_position() {
        let error = from_json_str("{\n  \"a\": }").unwrap_err();
        assert_eq!(error.line(), 2);
        assert!(error.column() > 0);
    }

    #[test]
    fn serde_json_bridge() {
        let source = json!({ "name": "A", "tags": ["x"], "extra": null });
        let value = Value::from(source.clone());

        assert_eq!(value.get("name"), &Value::from("A"));
        assert!(value.get("extra").is_null());
        assert_eq!(serde_json::Value::from(value), source);
    }
}
