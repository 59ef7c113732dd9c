//! The central store of declared types and their mapping metadata.
//!
//! ## Menu
//!
//! - [`TypeRegistry`]: declarations, mappability and field metadata, keyed by type path.
//! - [`TypeMeta`]: one declared type and its [`TypeOptions`], present once registered as mappable.
//! - [`TypeDecl`]: a builder registering a whole type in one step.
//! - [`RegistryError`]: why a registration was refused.
//! - `TypeRegistryArc`: a shareable, lockable registry (requires `std`).
//!
//! Registration happens up front; the engines only read the registry, so a
//! `&TypeRegistry` can be shared by any number of concurrent operations.

mod error;
mod type_decl;
mod type_meta;
mod type_registry;

pub use error::RegistryError;
pub use type_decl::TypeDecl;
pub use type_meta::{TypeMeta, TypeOptions};
pub use type_registry::{Ancestors, TypeRegistry};

#[cfg(feature = "std")]
pub use type_registry::TypeRegistryArc;
