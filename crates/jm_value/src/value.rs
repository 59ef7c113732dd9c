use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use chrono::{DateTime, Utc};
use jm_utils::hash::Map;

// -----------------------------------------------------------------------------
// Object

/// Members of an object value, in insertion order.
pub type Object = Map<String, Value>;

// -----------------------------------------------------------------------------
// Value

/// A generic value tree.
///
/// This is the shape of already parsed external data: the engine in `jm_model`
/// reads it during deserialization and produces it during serialization.
///
/// # Absent vs. Null
///
/// [`Value::Absent`] means "no value was supplied at all", while [`Value::Null`]
/// is an explicit `null`. Looking up a missing key with [`Value::get`] yields
/// `Absent`, and `Absent` object members are skipped when the tree is written
/// out through serde.
///
/// # Examples
///
/// ```
/// use jm_value::Value;
///
/// let value: Value = [("name", Value::from("A")), ("age", Value::from(30))]
///     .into_iter()
///     .collect();
///
/// assert_eq!(value.get("name").as_str(), Some("A"));
/// assert_eq!(value.get("age").as_number(), Some(30.0));
/// assert!(value.get("address").is_absent());
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Value {
    /// An explicit `null`.
    #[default]
    Null,
    /// No value supplied.
    Absent,
    Bool(bool),
    Number(f64),
    String(String),
    Date(DateTime<Utc>),
    Array(Vec<Value>),
    Object(Object),
}

/// The kind of a [`Value`], without its payload.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Null,
    Absent,
    Bool,
    Number,
    String,
    Date,
    Array,
    Object,
}

impl ValueKind {
    /// Returns a lowercase name of the kind, used in diagnostics.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Absent => "absent",
            Self::Bool => "boolean",
            Self::Number => "number",
            Self::String => "string",
            Self::Date => "date",
            Self::Array => "array",
            Self::Object => "object",
        }
    }
}

impl fmt::Display for ValueKind {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

static ABSENT: Value = Value::Absent;

impl Value {
    /// Creates an empty object value.
    #[inline]
    pub fn object() -> Self {
        Self::Object(Object::default())
    }

    /// Returns the [`ValueKind`] of this value.
    pub const fn kind(&self) -> ValueKind {
        match self {
            Self::Null => ValueKind::Null,
            Self::Absent => ValueKind::Absent,
            Self::Bool(_) => ValueKind::Bool,
            Self::Number(_) => ValueKind::Number,
            Self::String(_) => ValueKind::String,
            Self::Date(_) => ValueKind::Date,
            Self::Array(_) => ValueKind::Array,
            Self::Object(_) => ValueKind::Object,
        }
    }

    #[inline]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    #[inline]
    pub const fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }

    #[inline]
    pub const fn is_number(&self) -> bool {
        matches!(self, Self::Number(_))
    }

    #[inline]
    pub const fn is_string(&self) -> bool {
        matches!(self, Self::String(_))
    }

    #[inline]
    pub const fn is_array(&self) -> bool {
        matches!(self, Self::Array(_))
    }

    #[inline]
    pub const fn is_object(&self) -> bool {
        matches!(self, Self::Object(_))
    }

    #[inline]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(v) => Some(*v),
            _ => None,
        }
    }

    #[inline]
    pub const fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(v) => Some(*v),
            _ => None,
        }
    }

    #[inline]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(v) => Some(v),
            _ => None,
        }
    }

    #[inline]
    pub const fn as_date(&self) -> Option<&DateTime<Utc>> {
        match self {
            Self::Date(v) => Some(v),
            _ => None,
        }
    }

    #[inline]
    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Self::Array(v) => Some(v),
            _ => None,
        }
    }

    #[inline]
    pub fn as_array_mut(&mut self) -> Option<&mut Vec<Value>> {
        match self {
            Self::Array(v) => Some(v),
            _ => None,
        }
    }

    #[inline]
    pub const fn as_object(&self) -> Option<&Object> {
        match self {
            Self::Object(v) => Some(v),
            _ => None,
        }
    }

    #[inline]
    pub fn as_object_mut(&mut self) -> Option<&mut Object> {
        match self {
            Self::Object(v) => Some(v),
            _ => None,
        }
    }

    /// Looks up a member of an object value.
    ///
    /// Returns [`Value::Absent`] if the key is missing or `self` is not an object.
    pub fn get(&self, key: &str) -> &Value {
        match self {
            Self::Object(members) => members.get(key).unwrap_or(&ABSENT),
            _ => &ABSENT,
        }
    }

    /// Inserts a member into an object value, returning the previous member.
    ///
    /// Returns `None` without inserting if `self` is not an object.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        match self {
            Self::Object(members) => members.insert(key.into(), value.into()),
            _ => None,
        }
    }

    /// Takes the value out, leaving [`Value::Absent`] in its place.
    #[inline]
    pub fn take(&mut self) -> Value {
        core::mem::replace(self, Value::Absent)
    }
}

// -----------------------------------------------------------------------------
// Conversions

impl From<bool> for Value {
    #[inline]
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

macro_rules! impl_from_number {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Value {
                #[inline]
                fn from(value: $ty) -> Self {
                    Self::Number(value as f64)
                }
            }
        )*
    };
}

impl_from_number!(f64, f32, i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

impl From<&str> for Value {
    #[inline]
    fn from(value: &str) -> Self {
        Self::String(String::from(value))
    }
}

impl From<String> for Value {
    #[inline]
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<DateTime<Utc>> for Value {
    #[inline]
    fn from(value: DateTime<Utc>) -> Self {
        Self::Date(value)
    }
}

impl From<Vec<Value>> for Value {
    #[inline]
    fn from(value: Vec<Value>) -> Self {
        Self::Array(value)
    }
}

impl From<Object> for Value {
    #[inline]
    fn from(value: Object) -> Self {
        Self::Object(value)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    #[inline]
    fn from(value: Option<T>) -> Self {
        match value {
            Some(value) => value.into(),
            None => Self::Null,
        }
    }
}

impl FromIterator<Value> for Value {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        Self::Array(iter.into_iter().collect())
    }
}

impl<K: Into<String>> FromIterator<(K, Value)> for Value {
    fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
        Self::Object(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

// -----------------------------------------------------------------------------
// Tests
