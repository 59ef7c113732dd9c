//! Value tree → instance.
//!
//! ## Menu
//!
//! - [`DeserializeDriver`]: maps a [`Value`](jm_value::Value) onto a declared type,
//!   also usable as a serde `DeserializeSeed`.
//! - [`Decoded`]: the outcome: absent, `null`, or an instance.
//! - [`deserialize`]: the one-call form, reporting to `log`.
//!
//! # Coercion rules
//!
//! - An absent input stays absent. `null` stays `null` unless the type was
//!   registered with `treat_null_as_default`.
//! - Instances of non-mappable types keep their defaults; so do mappable
//!   instances when the input is not an object.
//! - Only mapped fields are read. A missing key keeps the default.
//! - Any mismatch between the declared type and the data keeps the field's
//!   default. Nothing here fails.

mod decoded;
mod driver;
mod engine;

pub use decoded::Decoded;
pub use driver::{DeserializeDriver, deserialize};
