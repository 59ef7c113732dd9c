use thiserror::Error;

/// A registration refused by the [`TypeRegistry`](crate::TypeRegistry).
///
/// The registry is left unchanged when one of these is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum RegistryError {
    #[error("type `{0}` is already declared")]
    DuplicateType(&'static str),
    #[error("type `{0}` is not declared")]
    UnknownType(&'static str),
    #[error("type `{type_path}` has no property `{field}`, neither own nor inherited")]
    UnknownField {
        type_path: &'static str,
        field: &'static str,
    },
    #[error("declaring `{0}` would make it its own ancestor")]
    InheritanceCycle(&'static str),
}
