//! Instance → value tree.
//!
//! ## Menu
//!
//! - [`SerializeDriver`]: produces the [`Value`](jm_value::Value) of an instance,
//!   also usable as a serde `Serialize`.
//! - [`serialize`]: the one-call form, reporting to `log`.
//!
//! Every slot is written, mapped or not, under its external key. Excluded
//! fields and absent values are left out; computed properties are written as
//! `null`. Nested instances are walked the same way whether or not their type
//! is mappable. Only a non-mappable top-level instance is refused: it is
//! written as an empty object and reported.

mod composer;
mod driver;

pub use driver::{SerializeDriver, serialize};
