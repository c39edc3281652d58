//! A hash-map with a fixed hasher seed.
//!
//! Slicing never iterates over a hash-map to produce output, but a fixed seed
//! keeps profiling runs and debug dumps reproducible.

pub use hashbrown::hash_map::Entry;

/// Hashmap using [`hashbrown::HashMap`] with a deterministic [`foldhash`] state.
pub type HashMap<K, V> = hashbrown::hash_map::HashMap<K, V, foldhash::fast::FixedState>;
