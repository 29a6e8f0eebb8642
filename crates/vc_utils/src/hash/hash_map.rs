//! A `hashbrown` map with a fixed, seeded hasher by default.

pub use hashbrown::hash_map::{Entry, Iter, Keys, Values};

use super::FixedHashState;

/// A [`hashbrown::HashMap`] whose hasher defaults to [`FixedHashState`].
///
/// Iteration order depends only on the inserted keys, never on a random
/// seed, so two processes inserting the same keys visit them identically.
///
/// # Examples
///
/// ```
/// use vc_utils::hash::HashMap;
///
/// let mut map: HashMap<&str, u32> = HashMap::default();
/// map.insert("a", 1);
/// assert_eq!(map.get("a"), Some(&1));
/// ```
pub type HashMap<K, V, S = FixedHashState> = hashbrown::HashMap<K, V, S>;

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use super::HashMap;

    #[test]
    fn fixed_seed_gives_stable_order() {
        let build = || {
            let mut map: HashMap<u32, u32> = HashMap::default();
            for i in 0..64 {
                map.insert(i * 7, i);
            }
            map.keys().copied().collect::<Vec<_>>()
        };
        assert_eq!(build(), build());
    }
}
