use alloc::string::String;
use alloc::vec::Vec;

use jm_value::Value;

use crate::Instance;

// -----------------------------------------------------------------------------
// FieldType

/// The static type of a property, or of its elements for lists and maps.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FieldType {
    Number,
    String,
    Boolean,
    Date,
    /// Opaque: values pass through unchanged.
    Any,
    /// A declared type, referenced by path.
    Model(&'static str),
}

impl FieldType {
    /// Returns the type path if this is [`FieldType::Model`].
    #[inline]
    pub const fn model_path(self) -> Option<&'static str> {
        match self {
            Self::Model(path) => Some(path),
            _ => None,
        }
    }
}

// -----------------------------------------------------------------------------
// Shape

/// How many values a property holds.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Shape {
    #[default]
    Single,
    List,
    /// String keys chosen by the data.
    Map,
}

// -----------------------------------------------------------------------------
// Init

/// The initializer of a property.
///
/// Every fresh instance evaluates the initializers again, so no two instances
/// share nested defaults.
#[derive(Clone, Debug)]
pub enum Init {
    Value(Value),
    /// A fresh default instance of the declared type.
    Model(&'static str),
    List(Vec<Init>),
    Map(Vec<(String, Init)>),
    /// Derived from the other slots, never stored.
    Computed(fn(&Instance) -> Value),
}

impl Init {
    /// Shorthand for [`Init::Value`].
    #[inline]
    pub fn value(value: impl Into<Value>) -> Self {
        Self::Value(value.into())
    }
}

// -----------------------------------------------------------------------------
// PropertyInfo

/// A declared property of a type.
///
/// # Examples
///
/// ```
/// use jm_model::info::{FieldType, PropertyInfo, Shape};
///
/// let info = PropertyInfo::list("items", FieldType::Model("Item"));
///
/// assert_eq!(info.name(), "items");
/// assert_eq!(info.ty(), FieldType::Model("Item"));
/// assert_eq!(info.shape(), Shape::List);
/// ```
#[derive(Clone, Debug)]
pub struct PropertyInfo {
    name: &'static str,
    ty: FieldType,
    shape: Shape,
    init: Init,
}

impl PropertyInfo {
    /// Creates a new [`PropertyInfo`].
    #[inline]
    pub const fn new(name: &'static str, ty: FieldType, shape: Shape, init: Init) -> Self {
        Self {
            name,
            ty,
            shape,
            init,
        }
    }

    #[inline]
    pub const fn number(name: &'static str, default: f64) -> Self {
        Self::new(name, FieldType::Number, Shape::Single, Init::Value(Value::Number(default)))
    }

    pub fn string(name: &'static str, default: impl Into<String>) -> Self {
        let init = Init::Value(Value::String(default.into()));
        Self::new(name, FieldType::String, Shape::Single, init)
    }

    #[inline]
    pub const fn boolean(name: &'static str, default: bool) -> Self {
        Self::new(name, FieldType::Boolean, Shape::Single, Init::Value(Value::Bool(default)))
    }

    /// A date property, `null` until assigned. See [`PropertyInfo::with_init`].
    #[inline]
    pub const fn date(name: &'static str) -> Self {
        Self::new(name, FieldType::Date, Shape::Single, Init::Value(Value::Null))
    }

    /// An opaque property, `null` until assigned.
    #[inline]
    pub const fn any(name: &'static str) -> Self {
        Self::new(name, FieldType::Any, Shape::Single, Init::Value(Value::Null))
    }

    /// A nested instance, initialized to a fresh default instance of `path`.
    #[inline]
    pub const fn model(name: &'static str, path: &'static str) -> Self {
        Self::new(name, FieldType::Model(path), Shape::Single, Init::Model(path))
    }

    /// A list property, initialized to an empty list.
    #[inline]
    pub const fn list(name: &'static str, element: FieldType) -> Self {
        Self::new(name, element, Shape::List, Init::List(Vec::new()))
    }

    /// A string-keyed map property, initialized to an empty map.
    #[inline]
    pub const fn map(name: &'static str, element: FieldType) -> Self {
        Self::new(name, element, Shape::Map, Init::Map(Vec::new()))
    }

    /// A derived property. It is serialized as `null` and never deserialized.
    #[inline]
    pub const fn computed(name: &'static str, getter: fn(&Instance) -> Value) -> Self {
        Self::new(name, FieldType::Any, Shape::Single, Init::Computed(getter))
    }

    /// Replaces the initializer.
    #[inline]
    pub fn with_init(mut self, init: Init) -> Self {
        self.init = init;
        self
    }

    #[inline]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    #[inline]
    pub const fn ty(&self) -> FieldType {
        self.ty
    }

    #[inline]
    pub const fn shape(&self) -> Shape {
        self.shape
    }

    #[inline]
    pub const fn init(&self) -> &Init {
        &self.init
    }

    #[inline]
    pub const fn is_computed(&self) -> bool {
        matches!(self.init, Init::Computed(_))
    }
}
