use core::cell::RefCell;

use serde_core::ser::{Serialize, Serializer};

use jm_value::Value;

use crate::diagnostics::DiagnosticSink;
use crate::ser::composer::Composer;
use crate::{Instance, TypeRegistry};

// -----------------------------------------------------------------------------
// SerializeDriver

/// Produces the [`Value`] of an instance.
///
/// Diagnostics go to the optional sink; without one they are logged through
/// `log::warn!`.
///
/// The driver also implements [`Serialize`], writing the same tree to any
/// serde data format.
///
/// # Examples
///
/// ```
/// use jm_model::{Diagnostic, SerializeDriver, TypeRegistry};
/// use jm_model::info::{PropertyInfo, TypeInfo};
/// use jm_model::meta::FieldDecl;
/// use jm_model::registry::TypeDecl;
/// use jm_value::Value;
///
/// let mut registry = TypeRegistry::new();
/// registry.register(
///     TypeDecl::new("Tag")
///         .mappable()
///         .field(PropertyInfo::string("label", "new"), FieldDecl::new().key("l")),
/// ).unwrap();
/// registry.declare(TypeInfo::new("Plain")).unwrap();
///
/// let tag = registry.instantiate("Tag").unwrap();
/// let json = serde_json::to_string(&SerializeDriver::new(&tag, &registry)).unwrap();
/// assert_eq!(json, r#"{"l":"new"}"#);
///
/// let plain = registry.instantiate("Plain").unwrap();
/// let mut sink: Vec<Diagnostic> = Vec::new();
/// let value = SerializeDriver::with_sink(&plain, &registry, &mut sink).to_value();
/// assert_eq!(value, Value::object());
/// assert_eq!(sink, [Diagnostic::NotMappable { type_path: "Plain" }]);
/// ```
pub struct SerializeDriver<'a, S: DiagnosticSink = ()> {
    instance: &'a Instance,
    registry: &'a TypeRegistry,
    sink: RefCell<Option<&'a mut S>>,
}

impl<'a> SerializeDriver<'a, ()> {
    /// Creates a driver reporting to `log`.
    #[inline]
    pub const fn new(instance: &'a Instance, registry: &'a TypeRegistry) -> Self {
        Self {
            instance,
            registry,
            sink: RefCell::new(None),
        }
    }
}

impl<'a, S: DiagnosticSink> SerializeDriver<'a, S> {
    /// Creates a driver reporting to `sink`.
    #[inline]
    pub const fn with_sink(instance: &'a Instance, registry: &'a TypeRegistry, sink: &'a mut S) -> Self {
        Self {
            instance,
            registry,
            sink: RefCell::new(Some(sink)),
        }
    }

    /// Builds the value tree of the instance.
    pub fn to_value(&self) -> Value {
        let mut guard = self.sink.borrow_mut();
        let mut fallback = ();
        let sink: &mut dyn DiagnosticSink = match guard.as_deref_mut() {
            Some(sink) => sink,
            None => &mut fallback,
        };
        Composer::new(self.registry, sink).compose(self.instance)
    }
}

impl<S: DiagnosticSink> Serialize for SerializeDriver<'_, S> {
    fn serialize<Z: Serializer>(&self, serializer: Z) -> Result<Z::Ok, Z::Error> {
        self.to_value().serialize(serializer)
    }
}

// -----------------------------------------------------------------------------
// Shorthand

/// Builds the value tree of `instance`, logging diagnostics.
#[inline]
pub fn serialize(instance: &Instance, registry: &TypeRegistry) -> Value {
    SerializeDriver::new(instance, registry).to_value()
}
