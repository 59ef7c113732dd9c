use alloc::vec::Vec;

use crate::info::PropertyInfo;

/// A container for a declared type.
///
/// The identity of a type is its `path`; ancestors are referenced by path and
/// resolved through the registry, so declarations can be made in any order.
///
/// # Examples
///
/// ```
/// use jm_model::info::{PropertyInfo, TypeInfo};
///
/// let info = TypeInfo::new("Child")
///     .extends("Base")
///     .with_property(PropertyInfo::number("a", 0.0))
///     .with_property(PropertyInfo::string("b", ""));
///
/// assert_eq!(info.parent(), Some("Base"));
/// assert_eq!(info.len(), 2);
/// assert_eq!(info.index_of("b"), Some(1));
/// ```
#[derive(Clone, Debug)]
pub struct TypeInfo {
    path: &'static str,
    parent: Option<&'static str>,
    properties: Vec<PropertyInfo>,
}

impl TypeInfo {
    /// Creates a new [`TypeInfo`] without parent or properties.
    #[inline]
    pub const fn new(path: &'static str) -> Self {
        Self {
            path,
            parent: None,
            properties: Vec::new(),
        }
    }

    /// Sets the parent type.
    #[inline]
    pub const fn extends(mut self, parent: &'static str) -> Self {
        self.parent = Some(parent);
        self
    }

    /// Appends a property.
    ///
    /// Redeclaring a property replaces the previous declaration in place.
    pub fn with_property(mut self, property: PropertyInfo) -> Self {
        match self.properties.iter_mut().find(|p| p.name() == property.name()) {
            Some(slot) => *slot = property,
            None => self.properties.push(property),
        }
        self
    }

    #[inline]
    pub const fn path(&self) -> &'static str {
        self.path
    }

    #[inline]
    pub const fn parent(&self) -> Option<&'static str> {
        self.parent
    }

    /// Returns the [`PropertyInfo`] for the given `name`, if declared by this type itself.
    pub fn property(&self, name: &str) -> Option<&PropertyInfo> {
        self.properties.iter().find(|p| p.name() == name)
    }

    /// Returns the own properties in **declaration order**.
    #[inline]
    pub fn properties(&self) -> &[PropertyInfo] {
        &self.properties
    }

    /// Returns the index for the given property `name`, if present.
    ///
    /// This is O(N) complexity.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.properties.iter().position(|p| p.name() == name)
    }

    /// Returns the number of own properties.
    #[inline]
    pub fn len(&self) -> usize {
        self.properties.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }
}
