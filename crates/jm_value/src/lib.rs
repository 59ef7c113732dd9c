//! A generic, JSON-like value tree.
//!
//! [`Value`] is the input of deserialization and the output of serialization in
//! `jm_model`. Compared with JSON it carries two extra states:
//!
//! - [`Value::Absent`]: "the key was not present", distinct from an explicit `null`.
//! - [`Value::Date`]: a parsed date-time.
//!
//! ## Menu
//!
//! - [`Value`], [`ValueKind`], [`Object`]: the tree itself.
//! - [`parse_int`], [`parse_float`]: lenient prefix parsing of numeric payloads.
//! - [`parse_date`]: date-time recognition for strings and date values.
//! - [`from_json_str`], [`to_json_string`], [`JsonError`]: the JSON text codec.
//!
//! `Value` implements `serde_core::Serialize` and `serde_core::Deserialize`,
//! so it can be read from or written to any serde data format.
#![no_std]

// -----------------------------------------------------------------------------
// no_std support

#[cfg(feature = "std")]
extern crate std;

extern crate alloc;

// -----------------------------------------------------------------------------
// Modules

mod date;
mod de;
mod json;
mod number;
mod ser;
mod value;

// -----------------------------------------------------------------------------
// Exports

pub use date::parse_date;
pub use json::{JsonError, from_json_str, to_json_string};
pub use number::{parse_float, parse_int};
pub use value::{Object, Value, ValueKind};

pub use chrono::{DateTime, Utc};
