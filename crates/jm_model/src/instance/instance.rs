use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use jm_utils::default;
use jm_utils::hash::Map;
use jm_value::{DateTime, Utc, Value};

use crate::Slot;

/// An object of a declared type.
///
/// Slots are kept in property order: ancestor properties first, then the
/// type's own. Accessors never add properties; [`Instance::set`] on an unknown
/// name is a no-op returning `None`.
///
/// # Examples
///
/// ```
/// use jm_model::{Slot, TypeRegistry};
/// use jm_model::info::{PropertyInfo, TypeInfo};
///
/// let mut registry = TypeRegistry::new();
/// registry.declare(
///     TypeInfo::new("Point")
///         .with_property(PropertyInfo::number("x", 0.0))
///         .with_property(PropertyInfo::number("y", 0.0)),
/// ).unwrap();
///
/// let mut point = registry.instantiate("Point").unwrap();
/// assert_eq!(point.number("x"), Some(0.0));
///
/// point.set("x", Slot::value(3));
/// assert_eq!(point.number("x"), Some(3.0));
///
/// assert!(point.set("z", Slot::value(1)).is_none());
/// assert!(!point.contains("z"));
/// ```
#[derive(Clone, PartialEq)]
pub struct Instance {
    type_path: &'static str,
    slots: Map<&'static str, Slot>,
}

impl Instance {
    pub(crate) fn new(type_path: &'static str) -> Self {
        Self {
            type_path,
            slots: default(),
        }
    }

    /// Adds or replaces a slot, keeping the position of a replaced one.
    pub(crate) fn insert(&mut self, name: &'static str, slot: Slot) {
        self.slots.insert(name, slot);
    }

    /// Returns the path of the instance's type.
    #[inline]
    pub const fn type_path(&self) -> &'static str {
        self.type_path
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    #[inline]
    pub fn contains(&self, name: &str) -> bool {
        self.slots.contains_key(name)
    }

    /// Returns an iterator over the slots in property order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = (&'static str, &Slot)> {
        self.slots.iter().map(|(name, slot)| (*name, slot))
    }

    /// Returns the property names in order.
    pub fn names(&self) -> Vec<&'static str> {
        self.slots.keys().copied().collect()
    }

    #[inline]
    pub fn get(&self, name: &str) -> Option<&Slot> {
        self.slots.get(name)
    }

    #[inline]
    pub fn get_mut(&mut self, name: &str) -> Option<&mut Slot> {
        self.slots.get_mut(name)
    }

    /// Replaces the slot of an existing property, returning the previous one.
    pub fn set(&mut self, name: &str, slot: Slot) -> Option<Slot> {
        self.slots
            .get_mut(name)
            .map(|current| core::mem::replace(current, slot))
    }

    // -------------------------------------------------------------------------
    // Typed access

    #[inline]
    pub fn value(&self, name: &str) -> Option<&Value> {
        self.get(name)?.as_value()
    }

    #[inline]
    pub fn str(&self, name: &str) -> Option<&str> {
        self.value(name)?.as_str()
    }

    #[inline]
    pub fn number(&self, name: &str) -> Option<f64> {
        self.value(name)?.as_number()
    }

    #[inline]
    pub fn bool(&self, name: &str) -> Option<bool> {
        self.value(name)?.as_bool()
    }

    #[inline]
    pub fn date(&self, name: &str) -> Option<&DateTime<Utc>> {
        self.value(name)?.as_date()
    }

    #[inline]
    pub fn model(&self, name: &str) -> Option<&Instance> {
        self.get(name)?.as_model()
    }

    #[inline]
    pub fn model_mut(&mut self, name: &str) -> Option<&mut Instance> {
        self.get_mut(name)?.as_model_mut()
    }

    #[inline]
    pub fn list(&self, name: &str) -> Option<&[Slot]> {
        self.get(name)?.as_list()
    }

    #[inline]
    pub fn map(&self, name: &str) -> Option<&Map<String, Slot>> {
        self.get(name)?.as_map()
    }

    /// Evaluates a computed property against the current slots.
    pub fn computed(&self, name: &str) -> Option<Value> {
        match self.get(name)? {
            Slot::Computed(getter) => Some(getter(self)),
            _ => None,
        }
    }
}

impl fmt::Debug for Instance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut builder = f.debug_struct(self.type_path);
        for (name, slot) in &self.slots {
            builder.field(name, slot);
        }
        builder.finish()
    }
}
