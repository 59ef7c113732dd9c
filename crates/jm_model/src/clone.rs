use crate::diagnostics::DiagnosticSink;
use crate::{DeserializeDriver, Instance, SerializeDriver, TypeRegistry};

/// Creates a structurally independent copy of an instance.
///
/// The copy is produced by serializing and deserializing again, so it obeys
/// the same rules: excluded fields are reset to their defaults, computed
/// properties are derived anew, and values the type cannot take back are
/// lost. `None` in gives `None` out.
///
/// Diagnostics are logged; see [`clone_model_with`] to collect them.
///
/// # Examples
///
/// ```
/// use jm_model::{Slot, TypeRegistry, clone_model};
/// use jm_model::info::PropertyInfo;
/// use jm_model::meta::FieldDecl;
/// use jm_model::registry::TypeDecl;
///
/// let mut registry = TypeRegistry::new();
/// registry.register(
///     TypeDecl::new("Note")
///         .mappable()
///         .field(PropertyInfo::string("text", ""), FieldDecl::new()),
/// ).unwrap();
///
/// let mut note = registry.instantiate("Note").unwrap();
/// note.set("text", Slot::value("hello"));
///
/// let mut copy = clone_model(Some(&note), &registry).unwrap();
/// assert_eq!(copy, note);
///
/// copy.set("text", Slot::value("bye"));
/// assert_eq!(note.str("text"), Some("hello"));
///
/// assert!(clone_model(None, &registry).is_none());
/// ```
pub fn clone_model(instance: Option<&Instance>, registry: &TypeRegistry) -> Option<Instance> {
    clone_model_with(instance, registry, &mut ())
}

/// Same as [`clone_model`], reporting to `sink`.
pub fn clone_model_with<S: DiagnosticSink>(
    instance: Option<&Instance>,
    registry: &TypeRegistry,
    sink: &mut S,
) -> Option<Instance> {
    let instance = instance?;
    let value = SerializeDriver::with_sink(instance, registry, &mut *sink).to_value();
    DeserializeDriver::with_sink(instance.type_path(), registry, sink)
        .decode(&value)
        .into_instance()
}
