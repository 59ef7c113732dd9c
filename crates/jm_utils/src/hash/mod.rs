//! Provide hash containers, re-exports *hashbrown*, *foldhash* and *indexmap*.
//!
//! Every container here uses [`FixedHashState`], so iteration order of the
//! unordered containers is stable across runs, and [`Map`] keeps insertion order.

// -----------------------------------------------------------------------------
// Modules

mod hasher;

// -----------------------------------------------------------------------------
// Exports

pub use hasher::{FixedHashState, FixedHasher};

/// A [`hashbrown::HashMap`] using [`FixedHashState`].
pub type HashMap<K, V> = hashbrown::HashMap<K, V, FixedHashState>;

/// A [`hashbrown::HashSet`] using [`FixedHashState`].
pub type HashSet<T> = hashbrown::HashSet<T, FixedHashState>;

/// An insertion-ordered map using [`FixedHashState`].
///
/// Used wherever the enumeration order of keys is observable,
/// such as object members of a value tree or the slots of an instance.
///
/// # Examples
///
/// ```
/// use jm_utils::hash::Map;
///
/// let mut map: Map<&str, i32> = Map::default();
/// map.insert("b", 1);
/// map.insert("a", 2);
///
/// assert_eq!(map.keys().copied().collect::<Vec<_>>(), ["b", "a"]);
/// ```
pub type Map<K, V> = indexmap::IndexMap<K, V, FixedHashState>;

// -----------------------------------------------------------------------------
// Re-export crates

pub use foldhash;
pub use hashbrown;
pub use indexmap;
