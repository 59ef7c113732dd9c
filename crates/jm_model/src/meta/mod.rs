//! Per-field mapping metadata.
//!
//! A [`FieldDecl`] tells the engines how one property maps to the external
//! data: the key to read and write, an explicit target type, and the coercion
//! flags. The [`FieldStore`] keeps them per declaring type and merges them
//! along an inheritance chain into [`ResolvedFields`].

mod field_decl;
mod field_store;

pub use field_decl::{FieldDecl, NumericMode};
pub use field_store::{FieldStore, ResolvedFields};
