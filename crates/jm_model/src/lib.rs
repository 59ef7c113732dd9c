//! Type-directed mapping between generic value trees and declared types.
//!
//! Types declare, per field, how to find and coerce the corresponding value of
//! the external data. There is no schema language: every decision is made from
//! the field declarations registered in a [`TypeRegistry`].
//!
//! ## Menu
//!
//! - [`info`]: declared types ([`TypeInfo`]) and their properties ([`PropertyInfo`]).
//! - [`meta`]: per-field mapping metadata ([`FieldDecl`]) and the [`FieldStore`].
//! - [`registry`]: the [`TypeRegistry`], holding declarations, mappability and field metadata.
//! - [`instance`]: live objects of declared types ([`Instance`], [`Slot`]).
//! - [`de`]: value tree → instance ([`DeserializeDriver`]).
//! - [`ser`]: instance → value tree ([`SerializeDriver`]).
//! - [`clone_model`]: structurally independent copies through both engines.
//! - [`diagnostics`]: the side channel for non-fatal reports.
//!
//! # Example
//!
//! ```
//! use jm_model::{TypeRegistry, deserialize, serialize};
//! use jm_model::info::{FieldType, PropertyInfo};
//! use jm_model::meta::FieldDecl;
//! use jm_model::registry::TypeDecl;
//! use jm_value::from_json_str;
//!
//! let mut registry = TypeRegistry::new();
//! registry.register(
//!     TypeDecl::new("Address")
//!         .mappable()
//!         .field(PropertyInfo::string("label", ""), FieldDecl::new())
//!         .field(PropertyInfo::string("street", ""), FieldDecl::new().key("the_address")),
//! ).unwrap();
//! registry.register(
//!     TypeDecl::new("User")
//!         .mappable()
//!         .field(PropertyInfo::string("name", ""), FieldDecl::new())
//!         .field(PropertyInfo::number("age", 0.0), FieldDecl::new())
//!         .field(PropertyInfo::model("address", "Address"), FieldDecl::new()),
//! ).unwrap();
//!
//! let input = from_json_str(
//!     r#"{ "name": "A", "age": 30, "address": { "label": "Home", "the_address": "Earth" } }"#,
//! ).unwrap();
//!
//! let user = deserialize(&input, "User", &registry).into_instance().unwrap();
//! assert_eq!(user.str("name"), Some("A"));
//! assert_eq!(user.model("address").and_then(|a| a.str("street")), Some("Earth"));
//!
//! assert_eq!(serialize(&user, &registry), input);
//! ```
#![no_std]

// -----------------------------------------------------------------------------
// no_std support

#[cfg(feature = "std")]
extern crate std;

extern crate alloc;

// -----------------------------------------------------------------------------
// Modules

mod clone;

pub mod de;
pub mod diagnostics;
pub mod info;
pub mod instance;
pub mod meta;
pub mod registry;
pub mod ser;

#[cfg(test)]
mod tests;

// -----------------------------------------------------------------------------
// Top-Level exports

pub use clone::{clone_model, clone_model_with};
pub use de::{Decoded, DeserializeDriver, deserialize};
pub use diagnostics::{Diagnostic, DiagnosticSink};
pub use info::{PropertyInfo, TypeInfo};
pub use instance::{Instance, Slot};
pub use meta::{FieldDecl, FieldStore};
pub use registry::TypeRegistry;
pub use ser::{SerializeDriver, serialize};
