use chrono::SecondsFormat;
use serde_core::ser::{SerializeMap, SerializeSeq};
use serde_core::{Serialize, Serializer};

use crate::Value;

/// Integral numbers within this magnitude are written as integers.
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_992.0;

/// Writes the tree through any serde [`Serializer`].
///
/// - `Null` and `Absent` are written as unit (`null` in JSON), except that
///   `Absent` object members are skipped entirely.
/// - Integral numbers within the exactly representable range are written as `i64`.
/// - Dates are written as RFC 3339 strings with millisecond precision.
impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Null | Value::Absent => serializer.serialize_unit(),
            Value::Bool(v) => serializer.serialize_bool(*v),
            Value::Number(v) => serialize_number(*v, serializer),
            Value::String(v) => serializer.serialize_str(v),
            Value::Date(v) => {
                serializer.serialize_str(&v.to_rfc3339_opts(SecondsFormat::Millis, true))
            }
            Value::Array(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Value::Object(members) => {
                let len = members.values().filter(|v| !v.is_absent()).count();
                let mut map = serializer.serialize_map(Some(len))?;
                for (key, value) in members {
                    if !value.is_absent() {
                        map.serialize_entry(key, value)?;
                    }
                }
                map.end()
            }
        }
    }
}

fn serialize_number<S: Serializer>(n: f64, serializer: S) -> Result<S::Ok, S::Error> {
    let integral = n as i64;
    if (-MAX_SAFE_INTEGER..=MAX_SAFE_INTEGER).contains(&n) && integral as f64 == n {
        serializer.serialize_i64(integral)
    } else {
        serializer.serialize_f64(n)
    }
}
