//! Live objects of declared types.
//!
//! An [`Instance`] is created by [`TypeRegistry::instantiate`](crate::TypeRegistry::instantiate)
//! with every property of the type and its ancestors holding its initial value.
//! The set of properties never changes afterwards, only their [`Slot`]s do.

mod instance;
mod slot;

pub use instance::Instance;
pub use slot::Slot;
