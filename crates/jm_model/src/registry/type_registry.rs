use alloc::vec::Vec;

use jm_utils::hash::{FixedHashState, HashMap};

use crate::info::{Init, PropertyInfo, TypeInfo};
use crate::instance::{Instance, Slot};
use crate::meta::{FieldDecl, FieldStore, ResolvedFields};
use crate::registry::{RegistryError, TypeDecl, TypeMeta, TypeOptions};

// -----------------------------------------------------------------------------
// TypeRegistry

/// A registry of declared types.
///
/// This is the central store of everything the engines consult: the
/// [`TypeInfo`] of each type, whether it is mappable, and the [`FieldDecl`]s
/// of its fields. Types are identified by their path.
///
/// # Example
///
/// ```
/// use jm_model::TypeRegistry;
/// use jm_model::info::{PropertyInfo, TypeInfo};
/// use jm_model::meta::FieldDecl;
/// use jm_model::registry::TypeOptions;
///
/// let mut registry = TypeRegistry::new();
/// registry.declare(TypeInfo::new("Base").with_property(PropertyInfo::number("id", 0.0))).unwrap();
/// registry.declare(TypeInfo::new("Child").extends("Base")).unwrap();
///
/// registry.register_type("Base", TypeOptions::new()).unwrap();
/// registry.register_field("Child", "id", FieldDecl::new().key("ID")).unwrap();
///
/// assert!(registry.is_mappable("Base"));
/// assert!(!registry.is_mappable("Child"));
///
/// assert_eq!(registry.resolve_all("Child").external_key("id"), "ID");
/// assert_eq!(registry.resolve_all("Base").external_key("id"), "id");
/// ```
#[derive(Clone, Debug)]
pub struct TypeRegistry {
    types: HashMap<&'static str, TypeMeta>,
    fields: FieldStore,
}

impl Default for TypeRegistry {
    /// See [`TypeRegistry::new`].
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl TypeRegistry {
    /// Creates an empty [`TypeRegistry`].
    #[inline]
    pub const fn new() -> Self {
        Self {
            types: HashMap::with_hasher(FixedHashState),
            fields: FieldStore::new(),
        }
    }

    // -------------------------------------------------------------------------
    // Registration

    /// Declares a type. The parent, if any, may be declared later.
    pub fn declare(&mut self, info: TypeInfo) -> Result<(), RegistryError> {
        self.check_declarable(&info)?;
        self.types.insert(info.path(), TypeMeta::new(info));
        Ok(())
    }

    /// Marks a declared type as mappable.
    ///
    /// Registering again replaces the options.
    pub fn register_type(
        &mut self,
        type_path: &'static str,
        options: TypeOptions,
    ) -> Result<(), RegistryError> {
        let meta = self
            .types
            .get_mut(type_path)
            .ok_or(RegistryError::UnknownType(type_path))?;
        meta.set_options(options);
        Ok(())
    }

    /// Records the mapping metadata of `field` for `type_path`.
    ///
    /// The field must be a property of the type or of a declared ancestor.
    /// Redeclaring it replaces the previous metadata of this type only.
    pub fn register_field(
        &mut self,
        type_path: &'static str,
        field: &'static str,
        decl: FieldDecl,
    ) -> Result<(), RegistryError> {
        self.check_field(type_path, field)?;
        self.fields.register(type_path, field, decl);
        Ok(())
    }

    /// Excludes `field` from serialization, for `type_path` and its descendants.
    pub fn mark_excluded(
        &mut self,
        type_path: &'static str,
        field: &'static str,
    ) -> Result<(), RegistryError> {
        self.check_field(type_path, field)?;
        self.fields.exclude(type_path, field);
        Ok(())
    }

    /// Registers a whole [`TypeDecl`] at once.
    ///
    /// Either everything is registered or, on error, nothing is.
    pub fn register(&mut self, decl: TypeDecl) -> Result<(), RegistryError> {
        let TypeDecl {
            info,
            options,
            fields,
            excluded,
        } = decl;

        self.check_declarable(&info)?;
        let type_path = info.path();
        for field in fields.iter().map(|(name, _)| *name).chain(excluded.iter().copied()) {
            if info.property(field).is_none() && self.inherited_property(&info, field).is_none() {
                return Err(RegistryError::UnknownField { type_path, field });
            }
        }

        let mut meta = TypeMeta::new(info);
        if let Some(options) = options {
            meta.set_options(options);
        }
        self.types.insert(type_path, meta);
        for (field, decl) in fields {
            self.fields.register(type_path, field, decl);
        }
        for field in excluded {
            self.fields.exclude(type_path, field);
        }
        Ok(())
    }

    fn check_declarable(&self, info: &TypeInfo) -> Result<(), RegistryError> {
        let type_path = info.path();
        if self.types.contains_key(type_path) {
            return Err(RegistryError::DuplicateType(type_path));
        }
        if let Some(parent) = info.parent()
            && (parent == type_path
                || self
                    .ancestors(parent)
                    .any(|meta| meta.parent() == Some(type_path)))
        {
            return Err(RegistryError::InheritanceCycle(type_path));
        }
        Ok(())
    }

    fn check_field(&self, type_path: &'static str, field: &'static str) -> Result<(), RegistryError> {
        if !self.types.contains_key(type_path) {
            return Err(RegistryError::UnknownType(type_path));
        }
        match self.property(type_path, field) {
            Some(_) => Ok(()),
            None => Err(RegistryError::UnknownField { type_path, field }),
        }
    }

    fn inherited_property(&self, info: &TypeInfo, field: &str) -> Option<&PropertyInfo> {
        self.property(info.parent()?, field)
    }

    // -------------------------------------------------------------------------
    // Queries

    #[inline]
    pub fn contains(&self, type_path: &str) -> bool {
        self.types.contains_key(type_path)
    }

    #[inline]
    pub fn get(&self, type_path: &str) -> Option<&TypeMeta> {
        self.types.get(type_path)
    }

    /// Returns whether the type itself was registered as mappable.
    #[inline]
    pub fn is_mappable(&self, type_path: &str) -> bool {
        self.get(type_path).is_some_and(TypeMeta::is_mappable)
    }

    /// Returns an iterator over all declared types, in arbitrary order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &TypeMeta> {
        self.types.values()
    }

    /// Returns the field metadata store.
    #[inline]
    pub const fn fields(&self) -> &FieldStore {
        &self.fields
    }

    /// Returns the type itself followed by its declared ancestors, nearest first.
    ///
    /// The walk stops at the first undeclared parent.
    #[inline]
    pub fn ancestors(&self, type_path: &str) -> Ancestors<'_> {
        Ancestors {
            registry: self,
            next: self.get(type_path),
        }
    }

    /// Returns the effective property named `name`, the nearest declaration winning.
    pub fn property(&self, type_path: &str, name: &str) -> Option<&PropertyInfo> {
        self.ancestors(type_path)
            .find_map(|meta| meta.info().property(name))
    }

    /// Returns the effective field metadata of a type, inherited entries included.
    pub fn resolve_all(&self, type_path: &str) -> ResolvedFields {
        let mut lineage: Vec<&str> = self.ancestors(type_path).map(TypeMeta::path).collect();
        lineage.reverse();
        self.fields.resolve_all(lineage)
    }

    // -------------------------------------------------------------------------
    // Construction

    /// Creates a fresh default instance of a declared type.
    ///
    /// Properties come in order: the root ancestor's first. A property
    /// redeclared by a subtype keeps its inherited position and takes the
    /// subtype's initializer. Returns `None` if the type is not declared.
    ///
    /// A type whose initializers create an instance of itself, directly or
    /// through other types, recurses without bound.
    pub fn instantiate(&self, type_path: &str) -> Option<Instance> {
        let mut lineage: Vec<&TypeMeta> = self.ancestors(type_path).collect();
        let path = lineage.first()?.path();
        lineage.reverse();

        let mut instance = Instance::new(path);
        for meta in lineage {
            for property in meta.info().properties() {
                instance.insert(property.name(), self.init_slot(property.init()));
            }
        }
        Some(instance)
    }

    fn init_slot(&self, init: &Init) -> Slot {
        match init {
            Init::Value(value) => Slot::Value(value.clone()),
            Init::Model(path) => self.instantiate(path).map_or_else(Slot::null, Slot::from),
            Init::List(items) => Slot::List(items.iter().map(|i| self.init_slot(i)).collect()),
            Init::Map(entries) => Slot::Map(
                entries
                    .iter()
                    .map(|(key, i)| (key.clone(), self.init_slot(i)))
                    .collect(),
            ),
            Init::Computed(getter) => Slot::Computed(*getter),
        }
    }
}

// -----------------------------------------------------------------------------
// Ancestors

/// An iterator over a type and its ancestors, see [`TypeRegistry::ancestors`].
#[derive(Clone)]
pub struct Ancestors<'a> {
    registry: &'a TypeRegistry,
    next: Option<&'a TypeMeta>,
}

impl<'a> Iterator for Ancestors<'a> {
    type Item = &'a TypeMeta;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = current.parent().and_then(|parent| self.registry.get(parent));
        Some(current)
    }
}

impl core::iter::FusedIterator for Ancestors<'_> {}

// -----------------------------------------------------------------------------
// TypeRegistryArc

#[cfg(feature = "std")]
use alloc::sync::Arc;
#[cfg(feature = "std")]
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// A [`TypeRegistry`] behind an `Arc<RwLock<..>>`.
///
/// Lock poisoning is ignored: the registry stays usable after a panic in
/// another thread.
#[cfg(feature = "std")]
#[derive(Clone, Default)]
pub struct TypeRegistryArc {
    /// The wrapped [`TypeRegistry`].
    pub internal: Arc<RwLock<TypeRegistry>>,
}

#[cfg(feature = "std")]
impl TypeRegistryArc {
    pub fn new(registry: TypeRegistry) -> Self {
        Self {
            internal: Arc::new(RwLock::new(registry)),
        }
    }

    /// Takes a read lock on the underlying [`TypeRegistry`].
    pub fn read(&self) -> RwLockReadGuard<'_, TypeRegistry> {
        self.internal.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Takes a write lock on the underlying [`TypeRegistry`].
    pub fn write(&self) -> RwLockWriteGuard<'_, TypeRegistry> {
        self.internal
            .write()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(feature = "std")]
impl core::fmt::Debug for TypeRegistryArc {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_set()
            .entries(self.read().types.keys())
            .finish()
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use super::TypeRegistry;
    use crate::info::{FieldType, Init, PropertyInfo, TypeInfo};
    use crate::meta::FieldDecl;
    use crate::registry::{RegistryError, TypeDecl, TypeOptions};
    use crate::Slot;

    fn lineage() -> TypeRegistry {
        let mut registry = TypeRegistry::new();
        registry
            .declare(
                TypeInfo::new("A")
                    .with_property(PropertyInfo::number("a", 1.0))
                    .with_property(PropertyInfo::string("shared", "from A")),
            )
            .unwrap();
        registry
            .declare(
                TypeInfo::new("C")
                    .extends("B")
                    .with_property(PropertyInfo::boolean("c", true))
                    .with_property(PropertyInfo::string("shared", "from C")),
            )
            .unwrap();
        registry
            .declare(TypeInfo::new("B").extends("A").with_property(PropertyInfo::any("b")))
            .unwrap();
        registry
    }

    #[test]
    fn ancestors_nearest_first() {
        let registry = lineage();
        let paths: Vec<_> = registry.ancestors("C").map(|m| m.path()).collect();
        assert_eq!(paths, ["C", "B", "A"]);
        assert_eq!(registry.ancestors("missing").count(), 0);
    }

    #[test]
    fn instantiate_orders_inherited_properties_first() {
        let registry = lineage();
        let c = registry.instantiate("C").unwrap();

        assert_eq!(c.type_path(), "C");
        assert_eq!(c.names(), ["a", "shared", "b", "c"]);
        assert_eq!(c.str("shared"), Some("from C"));
        assert_eq!(c.number("a"), Some(1.0));
        assert!(c.value("b").unwrap().is_null());
        assert!(registry.instantiate("missing").is_none());
    }

    #[test]
    fn nested_initializers_are_fresh() {
        let mut registry = TypeRegistry::new();
        registry
            .declare(TypeInfo::new("Leaf").with_property(PropertyInfo::number("n", 0.0)))
            .unwrap();
        registry
            .declare(
                TypeInfo::new("Root")
                    .with_property(PropertyInfo::model("leaf", "Leaf"))
                    .with_property(
                        PropertyInfo::list("leaves", FieldType::Model("Leaf"))
                            .with_init(Init::List([Init::Model("Leaf"), Init::value(3)].into())),
                    )
                    .with_property(PropertyInfo::model("missing", "Nowhere")),
            )
            .unwrap();

        let mut first = registry.instantiate("Root").unwrap();
        let second = registry.instantiate("Root").unwrap();

        first
            .model_mut("leaf")
            .unwrap()
            .set("n", Slot::value(9));
        assert_eq!(second.model("leaf").unwrap().number("n"), Some(0.0));

        let leaves = second.list("leaves").unwrap();
        assert_eq!(leaves[0].as_model().unwrap().type_path(), "Leaf");
        assert_eq!(leaves[1], Slot::value(3));
        assert!(second.get("missing").unwrap().is_null());
    }

    #[test]
    fn mappability_is_not_inherited() {
        let mut registry = lineage();
        registry
            .register_type("A", TypeOptions::new().treat_null_as_default())
            .unwrap();

        assert!(registry.is_mappable("A"));
        assert!(!registry.is_mappable("B"));
        assert!(registry.get("A").unwrap().treat_null_as_default());
        assert!(!registry.get("C").unwrap().treat_null_as_default());
    }

    #[test]
    fn field_registration_checks_properties() {
        let mut registry = lineage();

        registry.register_field("C", "a", FieldDecl::new()).unwrap();
        assert_eq!(
            registry.register_field("B", "c", FieldDecl::new()),
            Err(RegistryError::UnknownField {
                type_path: "B",
                field: "c"
            })
        );
        assert_eq!(
            registry.mark_excluded("Z", "a"),
            Err(RegistryError::UnknownType("Z"))
        );
        assert_eq!(
            registry.register_type("Z", TypeOptions::new()),
            Err(RegistryError::UnknownType("Z"))
        );
    }

    #[test]
    fn rejected_declarations() {
        let mut registry = lineage();

        assert_eq!(
            registry.declare(TypeInfo::new("A")),
            Err(RegistryError::DuplicateType("A"))
        );
        assert_eq!(
            registry.declare(TypeInfo::new("Self").extends("Self")),
            Err(RegistryError::InheritanceCycle("Self"))
        );

        registry.declare(TypeInfo::new("X").extends("Y")).unwrap();
        assert_eq!(
            registry.declare(TypeInfo::new("Y").extends("X")),
            Err(RegistryError::InheritanceCycle("Y"))
        );
    }

    #[test]
    fn failed_register_leaves_no_trace() {
        let mut registry = TypeRegistry::new();
        let decl = TypeDecl::new("T")
            .mappable()
            .field(PropertyInfo::number("a", 0.0), FieldDecl::new())
            .map_inherited("ghost", FieldDecl::new());

        assert_eq!(
            registry.register(decl),
            Err(RegistryError::UnknownField {
                type_path: "T",
                field: "ghost"
            })
        );
        assert!(!registry.contains("T"));
        assert!(registry.fields().own("T", "a").is_none());
    }
}
