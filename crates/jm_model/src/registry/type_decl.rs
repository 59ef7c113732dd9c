use alloc::vec::Vec;

use crate::info::{PropertyInfo, TypeInfo};
use crate::meta::FieldDecl;
use crate::registry::TypeOptions;

/// A complete type declaration, registered at once by
/// [`TypeRegistry::register`](crate::TypeRegistry::register).
///
/// # Examples
///
/// ```
/// use jm_model::TypeRegistry;
/// use jm_model::info::PropertyInfo;
/// use jm_model::meta::FieldDecl;
/// use jm_model::registry::{TypeDecl, TypeOptions};
///
/// let mut registry = TypeRegistry::new();
/// registry.register(
///     TypeDecl::new("Base")
///         .mappable()
///         .field(PropertyInfo::number("id", 0.0), FieldDecl::new().parse_int())
///         .property(PropertyInfo::string("note", "")),
/// ).unwrap();
/// registry.register(
///     TypeDecl::new("Child")
///         .extends("Base")
///         .options(TypeOptions::new().treat_null_as_default())
///         .map_inherited("id", FieldDecl::new().key("ID"))
///         .exclude("note"),
/// ).unwrap();
///
/// let fields = registry.resolve_all("Child");
/// assert_eq!(fields.external_key("id"), "ID");
/// assert!(fields.is_excluded("note"));
/// assert!(registry.is_mappable("Child"));
/// ```
#[derive(Clone, Debug)]
pub struct TypeDecl {
    pub(crate) info: TypeInfo,
    pub(crate) options: Option<TypeOptions>,
    pub(crate) fields: Vec<(&'static str, FieldDecl)>,
    pub(crate) excluded: Vec<&'static str>,
}

impl TypeDecl {
    #[inline]
    pub const fn new(path: &'static str) -> Self {
        Self {
            info: TypeInfo::new(path),
            options: None,
            fields: Vec::new(),
            excluded: Vec::new(),
        }
    }

    #[inline]
    pub fn extends(mut self, parent: &'static str) -> Self {
        self.info = self.info.extends(parent);
        self
    }

    /// Registers the type as mappable with default options.
    #[inline]
    pub fn mappable(self) -> Self {
        self.options(TypeOptions::new())
    }

    /// Registers the type as mappable with `options`.
    #[inline]
    pub fn options(mut self, options: TypeOptions) -> Self {
        self.options = Some(options);
        self
    }

    /// Declares a mapped property.
    pub fn field(mut self, property: PropertyInfo, decl: FieldDecl) -> Self {
        self.fields.push((property.name(), decl));
        self.property(property)
    }

    /// Declares a property without mapping metadata.
    ///
    /// It is still written during serialization, under its own name.
    pub fn property(mut self, property: PropertyInfo) -> Self {
        self.info = self.info.with_property(property);
        self
    }

    /// Maps an inherited property differently for this type and its descendants.
    pub fn map_inherited(mut self, field: &'static str, decl: FieldDecl) -> Self {
        self.fields.push((field, decl));
        self
    }

    /// Excludes an own or inherited property from serialization.
    pub fn exclude(mut self, field: &'static str) -> Self {
        self.excluded.push(field);
        self
    }
}
