use serde_core::de::{Deserialize, DeserializeSeed, Deserializer};

use jm_value::Value;

use crate::TypeRegistry;
use crate::de::Decoded;
use crate::de::engine::Engine;
use crate::diagnostics::DiagnosticSink;

// -----------------------------------------------------------------------------
// DeserializeDriver

/// Maps a [`Value`] onto a declared type.
///
/// Diagnostics go to the optional sink; without one they are logged through
/// `log::warn!`.
///
/// The driver also implements [`DeserializeSeed`], so any serde data format
/// can feed it directly.
///
/// # Examples
///
/// ```
/// use jm_model::{DeserializeDriver, Diagnostic, TypeRegistry};
/// use jm_model::info::PropertyInfo;
/// use jm_model::meta::FieldDecl;
/// use jm_model::registry::TypeDecl;
/// use jm_value::Value;
///
/// let mut registry = TypeRegistry::new();
/// registry.register(
///     TypeDecl::new("Counter")
///         .mappable()
///         .field(PropertyInfo::number("count", 1.0), FieldDecl::new().parse_int()),
/// ).unwrap();
///
/// let input: Value = [("count", Value::from("20.9"))].into_iter().collect();
/// let counter = DeserializeDriver::new("Counter", &registry)
///     .decode(&input)
///     .into_instance()
///     .unwrap();
/// assert_eq!(counter.number("count"), Some(20.0));
///
/// let mut sink: Vec<Diagnostic> = Vec::new();
/// let decoded = DeserializeDriver::with_sink("Nothing", &registry, &mut sink).decode(&input);
/// assert!(decoded.is_null());
/// assert_eq!(sink.len(), 1);
/// ```
pub struct DeserializeDriver<'a, S: DiagnosticSink = ()> {
    type_path: &'a str,
    registry: &'a TypeRegistry,
    sink: Option<&'a mut S>,
}

impl<'a> DeserializeDriver<'a, ()> {
    /// Creates a driver reporting to `log`.
    #[inline]
    pub const fn new(type_path: &'a str, registry: &'a TypeRegistry) -> Self {
        Self {
            type_path,
            registry,
            sink: None,
        }
    }
}

impl<'a, S: DiagnosticSink> DeserializeDriver<'a, S> {
    /// Creates a driver reporting to `sink`.
    #[inline]
    pub const fn with_sink(type_path: &'a str, registry: &'a TypeRegistry, sink: &'a mut S) -> Self {
        Self {
            type_path,
            registry,
            sink: Some(sink),
        }
    }

    /// Maps `input` onto the driver's type.
    pub fn decode(&mut self, input: &Value) -> Decoded {
        let mut fallback = ();
        let sink: &mut dyn DiagnosticSink = match self.sink.as_deref_mut() {
            Some(sink) => sink,
            None => &mut fallback,
        };
        Engine::new(self.registry, sink).decode(input, self.type_path)
    }
}

impl<'de, S: DiagnosticSink> DeserializeSeed<'de> for DeserializeDriver<'_, S> {
    type Value = Decoded;

    fn deserialize<D: Deserializer<'de>>(mut self, deserializer: D) -> Result<Self::Value, D::Error> {
        let input = Value::deserialize(deserializer)?;
        Ok(self.decode(&input))
    }
}

// -----------------------------------------------------------------------------
// Shorthand

/// Maps `input` onto `type_path`, logging diagnostics.
///
/// See [`DeserializeDriver`] for a form collecting them.
#[inline]
pub fn deserialize(input: &Value, type_path: &str, registry: &TypeRegistry) -> Decoded {
    DeserializeDriver::new(type_path, registry).decode(input)
}
