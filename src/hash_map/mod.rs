//! Hash maps keyed through [`Keyed`](crate::Keyed)
//!
//! Two collision strategies over prime-sized tables:
//!
//! - [`OpenHashMap`]: open addressing with linear probing and backward-shift
//!   deletion (no tombstones), default load factor 0.75
//! - [`ChainedHashMap`]: separate chaining with one vector per bucket, default
//!   load factor 1.0
//!
//! Both grow to the next prime at least twice the current table size when an
//! insert would push them past their load factor, and both hash with
//! `ahash::RandomState` unless another `BuildHasher` is supplied.
//!
//! ```rust
//! use arbora::hash_map::OpenHashMap;
//!
//! let mut counts = OpenHashMap::new();
//! counts.insert(("apple".to_string(), 1)).unwrap();
//! if let Some(mut node) = counts.get_node(&"apple".to_string()) {
//!     *node.payload_mut().unwrap() += 1;
//! }
//! assert_eq!(counts.get(&"apple".to_string()), Some(&("apple".to_string(), 2)));
//! ```

pub mod chained_hash_map;
pub mod open_hash_map;

pub use chained_hash_map::ChainedHashMap;
pub use open_hash_map::OpenHashMap;

use std::hash::{BuildHasher, Hash};

/// Smallest table size either map will use
pub const MIN_TABLE_SIZE: usize = 3;

/// Smallest odd prime `>= n`, never below [`MIN_TABLE_SIZE`]
pub fn next_prime(n: usize) -> usize {
    let mut candidate = n.max(MIN_TABLE_SIZE);
    if candidate % 2 == 0 {
        candidate += 1;
    }
    while !is_prime(candidate) {
        candidate += 2;
    }
    candidate
}

fn is_prime(n: usize) -> bool {
    if n < 2 {
        return false;
    }
    if n % 2 == 0 {
        return n == 2;
    }
    let mut divisor = 3;
    while divisor * divisor <= n {
        if n % divisor == 0 {
            return false;
        }
        divisor += 2;
    }
    true
}

/// Home bucket of `key` in a table of `table_size` slots
#[inline]
pub(crate) fn bucket_index<K: Hash + ?Sized, S: BuildHasher>(hasher: &S, key: &K, table_size: usize) -> usize {
    (hasher.hash_one(key) % table_size as u64) as usize
}

/// Load factor to actually use, replacing unusable values with `fallback`
pub(crate) fn sanitize_load_factor(requested: f64, fallback: f64, upper_exclusive: Option<f64>) -> f64 {
    let too_high = upper_exclusive.is_some_and(|limit| requested >= limit);
    if !requested.is_finite() || requested <= 0.0 || too_high {
        log::warn!(
            "load factor {} is not usable, falling back to {}",
            requested,
            fallback
        );
        fallback
    } else {
        requested
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_prime() {
        assert_eq!(next_prime(0), 3);
        assert_eq!(next_prime(3), 3);
        assert_eq!(next_prime(4), 5);
        assert_eq!(next_prime(19), 19);
        assert_eq!(next_prime(38), 41);
        assert_eq!(next_prime(82), 83);
        assert_eq!(next_prime(90), 97);
    }

    #[test]
    fn test_bucket_index_in_range() {
        let hasher = ahash::RandomState::new();
        for key in 0..1000u64 {
            assert!(bucket_index(&hasher, &key, 19) < 19);
        }
    }

    #[test]
    fn test_sanitize_load_factor() {
        assert_eq!(sanitize_load_factor(0.5, 0.75, Some(1.0)), 0.5);
        assert_eq!(sanitize_load_factor(1.0, 0.75, Some(1.0)), 0.75);
        assert_eq!(sanitize_load_factor(-1.0, 1.0, None), 1.0);
        assert_eq!(sanitize_load_factor(f64::NAN, 1.0, None), 1.0);
        assert_eq!(sanitize_load_factor(3.0, 1.0, None), 3.0);
    }
}
