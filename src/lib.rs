#![warn(missing_docs)]
#![doc = include_str!("../README.md")]

/// A map over hash-sorted parallel arrays.
///
/// This module provides [`ArrayMap`], a compact key-value map that wraps the
/// [`HashTable`] engine with a hasher builder and a key mode.
pub mod array_map;

/// A set over hash-sorted parallel arrays.
///
/// This module provides [`ArraySet`], the key-only counterpart of
/// [`ArrayMap`], along with the usual set algebra iterators.
pub mod array_set;

pub mod error;
pub mod hash_table;
pub mod key_mode;
pub mod pool;

pub use array_map::ArrayMap;
pub use array_map::Entry;
pub use array_set::ArraySet;
pub use error::Error;
pub use error::Result;
pub use hash_table::HashTable;
pub use key_mode::ByIdentity;
pub use key_mode::ByValue;
pub use key_mode::Identity;
pub use pool::ArrayPool;
#[cfg(feature = "stats")]
pub use pool::PoolStats;

cfg_if::cfg_if! {
    if #[cfg(feature = "foldhash")] {
        /// The hasher builder used when none is given.
        ///
        /// A fixed-seed foldhash, so that equal containers hash alike across
        /// instances.
        pub type DefaultHashBuilder = foldhash::fast::FixedState;
    } else {
        /// The hasher builder used when none is given.
        pub type DefaultHashBuilder =
            core::hash::BuildHasherDefault<std::collections::hash_map::DefaultHasher>;
    }
}

/// An [`ArrayMap`] that compares keys by address.
pub type IdentityArrayMap<K, V, S = DefaultHashBuilder> = ArrayMap<K, V, S, ByIdentity>;

/// An [`ArraySet`] that compares values by address.
pub type IdentityArraySet<T, S = DefaultHashBuilder> = ArraySet<T, S, ByIdentity>;
