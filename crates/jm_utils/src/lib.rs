//! Small shared utilities for the `jm` crates.
//!
//! - [`hash`]: hash containers with a fixed seed, plus the insertion-ordered [`hash::Map`].
//! - [`default`]: an abbreviation for `Default::default()`.
#![no_std]

// -----------------------------------------------------------------------------
// No STD Support

extern crate alloc;

// -----------------------------------------------------------------------------
// Modules

mod default;

pub mod hash;

// -----------------------------------------------------------------------------
// Top-level exports

pub use default::default;
