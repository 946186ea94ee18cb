//! Key extraction for stored entries
//!
//! Every structure in this crate orders, hashes and compares entries through
//! the key half of a [`Keyed`] value. Scalars and strings are their own key;
//! `(K, V)` pairs are keyed by `K` and carry `V` as a mutable payload, which is
//! how the word-frequency harness updates counts in place.
//!
//! ```rust
//! use arbora::Keyed;
//!
//! let mut pair = (String::from("apple"), 1u32);
//! assert_eq!(pair.key(), "apple");
//! *pair.payload_mut().unwrap() += 1;
//! assert_eq!(pair.1, 2);
//!
//! let mut n = 7i32;
//! assert_eq!(*n.key(), 7);
//! assert!(n.payload_mut().is_none());
//! ```

use std::fmt::Debug;
use std::hash::Hash;

/// An entry that exposes an ordering key and an optional mutable payload.
///
/// Implementations must return the same key for the lifetime of the entry;
/// structures never re-key an entry after insertion.
pub trait Keyed {
    /// The part of the entry used for ordering, equality and hashing
    type Key: Ord + Hash + Eq + Clone + Debug;

    /// The non-key part of the entry; `()` for plain keys
    type Payload;

    /// Borrow the key
    fn key(&self) -> &Self::Key;

    /// Borrow the payload, if the entry has one
    fn payload(&self) -> Option<&Self::Payload>;

    /// Mutably borrow the payload, if the entry has one
    fn payload_mut(&mut self) -> Option<&mut Self::Payload>;
}

macro_rules! impl_keyed_for_plain {
    ($($t:ty),* $(,)?) => {
        $(
            impl Keyed for $t {
                type Key = $t;
                type Payload = ();

                #[inline]
                fn key(&self) -> &Self::Key {
                    self
                }

                #[inline]
                fn payload(&self) -> Option<&()> {
                    None
                }

                #[inline]
                fn payload_mut(&mut self) -> Option<&mut ()> {
                    None
                }
            }
        )*
    };
}

impl_keyed_for_plain!(i8, i16, i32, i64, i128, u8, u16, u32, u64, u128, usize, isize, char, bool, String, &'static str);

impl<K, V> Keyed for (K, V)
where
    K: Ord + Hash + Eq + Clone + Debug,
{
    type Key = K;
    type Payload = V;

    #[inline]
    fn key(&self) -> &K {
        &self.0
    }

    #[inline]
    fn payload(&self) -> Option<&V> {
        Some(&self.1)
    }

    #[inline]
    fn payload_mut(&mut self) -> Option<&mut V> {
        Some(&mut self.1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_keys_are_their_own_key() {
        assert_eq!(*42u64.key(), 42);
        assert_eq!(*'x'.key(), 'x');
        assert_eq!("word".to_string().key(), "word");
        assert!(5i32.payload().is_none());
    }

    #[test]
    fn test_pair_key_ignores_payload() {
        let a = ("same".to_string(), 1);
        let b = ("same".to_string(), 99);
        assert_eq!(a.key(), b.key());
        assert_eq!(a.payload(), Some(&1));
    }

    #[test]
    fn test_pair_payload_mut_updates_in_place() {
        let mut entry = (3i32, vec![1, 2]);
        entry.payload_mut().unwrap().push(3);
        assert_eq!(entry.1, vec![1, 2, 3]);
        assert_eq!(*entry.key(), 3);
    }
}
