use jm_value::Value;

use crate::{Instance, Slot};

/// The outcome of deserializing into a declared type.
#[derive(Clone, Debug, PartialEq)]
pub enum Decoded {
    /// The input was absent.
    Absent,
    /// The input was `null`, or the target type is unknown.
    Null,
    Instance(Instance),
}

impl Decoded {
    #[inline]
    pub const fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }

    #[inline]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    #[inline]
    pub const fn as_instance(&self) -> Option<&Instance> {
        match self {
            Self::Instance(v) => Some(v),
            _ => None,
        }
    }

    #[inline]
    pub fn into_instance(self) -> Option<Instance> {
        match self {
            Self::Instance(v) => Some(v),
            _ => None,
        }
    }

    /// Converts into the slot holding this outcome as a field value.
    pub fn into_slot(self) -> Slot {
        match self {
            Self::Absent => Slot::Value(Value::Absent),
            Self::Null => Slot::null(),
            Self::Instance(v) => Slot::from(v),
        }
    }
}
