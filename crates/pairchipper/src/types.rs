//! # Common Types and Traits
use core::{
    fmt::{Debug, Display},
    hash::Hash,
    ops::{AddAssign, SubAssign},
};

use num_traits::{FromPrimitive, PrimInt, ToPrimitive, Unsigned};

/// A type that can be used as an occurrence count.
///
/// Counts are weighted sums over a [`crate::symbols::FrequencyTable`];
/// they never go below zero, so they are constrained to unsigned integers.
pub trait CountType:
    'static
    + PrimInt
    + Unsigned
    + FromPrimitive
    + ToPrimitive
    + Hash
    + Default
    + Debug
    + Display
    + Send
    + Sync
    + AddAssign
    + SubAssign
{
}

impl<T> CountType for T where
    T: 'static
        + PrimInt
        + Unsigned
        + FromPrimitive
        + ToPrimitive
        + Hash
        + Default
        + Debug
        + Display
        + Send
        + Sync
        + AddAssign
        + SubAssign
{
}

/// A type that can be used as a pre-token string key.
pub trait StringChunkType:
    for<'a> From<&'a str> + AsRef<str> + Debug + Clone + Send + Sync + Eq + Hash + Ord
{
}

impl<T> StringChunkType for T where
    T: for<'a> From<&'a str> + AsRef<str> + Debug + Clone + Send + Sync + Eq + Hash + Ord
{
}

cfg_if::cfg_if! {
    if #[cfg(feature = "ahash")] {
        /// Type Alias for hash maps in this crate.
        pub type PCHashMap<K, V> = ahash::AHashMap<K, V>;

        /// Type Alias for hash sets in this crate.
        pub type PCHashSet<V> = ahash::AHashSet<V>;

        /// Create a new hash map with the given capacity.
        pub fn hash_map_with_capacity<K, V>(capacity: usize) -> PCHashMap<K, V> {
            PCHashMap::with_capacity(capacity)
        }
    } else if #[cfg(feature = "foldhash")] {
        /// Type Alias for hash maps in this crate.
        pub type PCHashMap<K, V> = foldhash::HashMap<K, V>;

        /// Type Alias for hash sets in this crate.
        pub type PCHashSet<V> = foldhash::HashSet<V>;

        /// Create a new hash map with the given capacity.
        pub fn hash_map_with_capacity<K, V>(capacity: usize) -> PCHashMap<K, V> {
            foldhash::HashMapExt::with_capacity(capacity)
        }
    } else {
        /// Type Alias for hash maps in this crate.
        pub type PCHashMap<K, V> = std::collections::HashMap<K, V>;

        /// Type Alias for hash sets in this crate.
        pub type PCHashSet<V> = std::collections::HashSet<V>;

        /// Create a new hash map with the given capacity.
        pub fn hash_map_with_capacity<K, V>(capacity: usize) -> PCHashMap<K, V> {
            PCHashMap::with_capacity(capacity)
        }
    }
}

#[cfg(test)]
mod tests {
    use core::marker::PhantomData;

    use compact_str::CompactString;

    use super::*;

    #[test]
    fn test_common_count_types() {
        struct IsCount<T: CountType>(PhantomData<T>);

        let _: IsCount<u16>;
        let _: IsCount<u32>;
        let _: IsCount<u64>;
        let _: IsCount<usize>;
    }

    #[test]
    fn test_common_string_chunk_types() {
        struct IsStringChunk<T: StringChunkType>(PhantomData<T>);

        let _: IsStringChunk<String>;
        let _: IsStringChunk<CompactString>;
    }

    #[test]
    fn test_hash_map_with_capacity() {
        let mut map: PCHashMap<&str, u32> = hash_map_with_capacity(8);
        *map.entry("a").or_default() += 2;
        *map.entry("a").or_default() += 3;
        assert_eq!(map.get("a"), Some(&5));
        assert!(map.capacity() >= 8);
    }
}
