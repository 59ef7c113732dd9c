//! Declared types and their properties.
//!
//! ## Menu
//!
//! - [`TypeInfo`]: A declared type, its optional parent and its own properties in declaration order.
//! - [`PropertyInfo`]: A single property: name, static type, shape and initial value.
//!     - [`FieldType`]: The static (element) type of a property.
//!     - [`Shape`]: Whether a property holds one value, a list or a string-keyed map.
//!     - [`Init`]: The initializer producing the default value of a fresh instance.

mod property_info;
mod type_info;

pub use property_info::{FieldType, Init, PropertyInfo, Shape};
pub use type_info::TypeInfo;
