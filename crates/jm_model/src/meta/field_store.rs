use jm_utils::default;
use jm_utils::hash::{FixedHashState, HashMap, HashSet, Map};

use crate::meta::FieldDecl;

// -----------------------------------------------------------------------------
// FieldStore

#[derive(Clone, Debug, Default)]
struct FieldTable {
    decls: Map<&'static str, FieldDecl>,
    excluded: HashSet<&'static str>,
}

/// Field metadata of every type, keyed by the declaring type.
///
/// Entries only describe the type that declared them; inheritance is applied
/// by [`FieldStore::resolve_all`].
#[derive(Clone, Debug, Default)]
pub struct FieldStore {
    tables: HashMap<&'static str, FieldTable>,
}

impl FieldStore {
    #[inline]
    pub const fn new() -> Self {
        Self {
            tables: HashMap::with_hasher(FixedHashState),
        }
    }

    /// Records `decl` for `field` of `type_path`, replacing an earlier one.
    pub fn register(&mut self, type_path: &'static str, field: &'static str, decl: FieldDecl) {
        self.tables
            .entry(type_path)
            .or_default()
            .decls
            .insert(field, decl);
    }

    /// Marks `field` of `type_path` as never serialized.
    pub fn exclude(&mut self, type_path: &'static str, field: &'static str) {
        self.tables
            .entry(type_path)
            .or_default()
            .excluded
            .insert(field);
    }

    /// Returns the declaration made by `type_path` itself.
    pub fn own(&self, type_path: &str, field: &str) -> Option<&FieldDecl> {
        self.tables.get(type_path)?.decls.get(field)
    }

    /// Returns the fields declared by `type_path` itself, in declaration order.
    pub fn own_fields(&self, type_path: &str) -> impl Iterator<Item = (&'static str, &FieldDecl)> {
        self.tables
            .get(type_path)
            .into_iter()
            .flat_map(|table| table.decls.iter().map(|(name, decl)| (*name, decl)))
    }

    /// Merges the fields along an inheritance chain, given root first.
    ///
    /// A type redeclaring a field replaces the inherited declaration, keeping
    /// its position. Exclusion marks accumulate.
    pub fn resolve_all<'p>(&self, lineage: impl IntoIterator<Item = &'p str>) -> ResolvedFields {
        let mut resolved: ResolvedFields = default();
        for type_path in lineage {
            let Some(table) = self.tables.get(type_path) else {
                continue;
            };
            for (name, decl) in &table.decls {
                resolved.decls.insert(*name, decl.clone());
            }
            resolved.excluded.extend(table.excluded.iter().copied());
        }
        resolved
    }
}

// -----------------------------------------------------------------------------
// ResolvedFields

/// The effective field metadata of a type, inherited entries included.
#[derive(Clone, Debug, Default)]
pub struct ResolvedFields {
    decls: Map<&'static str, FieldDecl>,
    excluded: HashSet<&'static str>,
}

impl ResolvedFields {
    #[inline]
    pub fn get(&self, field: &str) -> Option<&FieldDecl> {
        self.decls.get(field)
    }

    /// Returns the mapped fields, ancestors' first.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = (&'static str, &FieldDecl)> {
        self.decls.iter().map(|(name, decl)| (*name, decl))
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.decls.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.decls.is_empty()
    }

    /// Returns the key under which `field` appears in external data.
    pub fn external_key<'a>(&'a self, field: &'a str) -> &'a str {
        match self.decls.get(field) {
            Some(decl) => decl.key_or(field),
            None => field,
        }
    }

    pub fn is_excluded(&self, field: &str) -> bool {
        self.excluded.contains(field) || self.decls.get(field).is_some_and(FieldDecl::is_excluded)
    }
}
