use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use jm_utils::hash::Map;
use jm_value::Value;

use crate::Instance;

/// The content of one property of an [`Instance`].
#[derive(Clone)]
pub enum Slot {
    /// A plain value, including `null` and absent.
    Value(Value),
    Model(Box<Instance>),
    List(Vec<Slot>),
    Map(Map<String, Slot>),
    /// A getter, evaluated on demand against the owning instance.
    Computed(fn(&Instance) -> Value),
}

impl Slot {
    /// Shorthand for [`Slot::Value`].
    #[inline]
    pub fn value(value: impl Into<Value>) -> Self {
        Self::Value(value.into())
    }

    #[inline]
    pub const fn null() -> Self {
        Self::Value(Value::Null)
    }

    #[inline]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Value(Value::Null))
    }

    #[inline]
    pub const fn is_absent(&self) -> bool {
        matches!(self, Self::Value(Value::Absent))
    }

    #[inline]
    pub const fn as_value(&self) -> Option<&Value> {
        match self {
            Self::Value(v) => Some(v),
            _ => None,
        }
    }

    #[inline]
    pub fn as_model(&self) -> Option<&Instance> {
        match self {
            Self::Model(v) => Some(v),
            _ => None,
        }
    }

    #[inline]
    pub fn as_model_mut(&mut self) -> Option<&mut Instance> {
        match self {
            Self::Model(v) => Some(v),
            _ => None,
        }
    }

    #[inline]
    pub fn as_list(&self) -> Option<&[Slot]> {
        match self {
            Self::List(v) => Some(v),
            _ => None,
        }
    }

    #[inline]
    pub fn as_list_mut(&mut self) -> Option<&mut Vec<Slot>> {
        match self {
            Self::List(v) => Some(v),
            _ => None,
        }
    }

    #[inline]
    pub const fn as_map(&self) -> Option<&Map<String, Slot>> {
        match self {
            Self::Map(v) => Some(v),
            _ => None,
        }
    }

    #[inline]
    pub fn as_map_mut(&mut self) -> Option<&mut Map<String, Slot>> {
        match self {
            Self::Map(v) => Some(v),
            _ => None,
        }
    }
}

impl From<Value> for Slot {
    #[inline]
    fn from(value: Value) -> Self {
        Self::Value(value)
    }
}

impl From<Instance> for Slot {
    #[inline]
    fn from(value: Instance) -> Self {
        Self::Model(Box::new(value))
    }
}

impl From<Vec<Slot>> for Slot {
    #[inline]
    fn from(value: Vec<Slot>) -> Self {
        Self::List(value)
    }
}

impl From<Map<String, Slot>> for Slot {
    #[inline]
    fn from(value: Map<String, Slot>) -> Self {
        Self::Map(value)
    }
}

impl PartialEq for Slot {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Value(a), Self::Value(b)) => a == b,
            (Self::Model(a), Self::Model(b)) => a == b,
            (Self::List(a), Self::List(b)) => a == b,
            (Self::Map(a), Self::Map(b)) => a == b,
            (Self::Computed(a), Self::Computed(b)) => core::ptr::fn_addr_eq(*a, *b),
            _ => false,
        }
    }
}

impl fmt::Debug for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Value(v) => fmt::Debug::fmt(v, f),
            Self::Model(v) => fmt::Debug::fmt(v, f),
            Self::List(v) => f.debug_list().entries(v).finish(),
            Self::Map(v) => f.debug_map().entries(v).finish(),
            Self::Computed(_) => f.write_str("<computed>"),
        }
    }
}
