use core::any::TypeId;
use core::fmt;

use crate::hash::TypeIdHashState;
use crate::hash::hashbrown::HashMap;
use crate::hash::hashbrown::hash_map::Entry;

// -----------------------------------------------------------------------------
// TypeIdMap

/// A map keyed by [`TypeId`].
///
/// Used for every per-type table of the workspace: cached type descriptors of
/// generic types and compiled procedures. The `TypeId` is its own hash, see
/// [`TypeIdHashState`].
///
/// # Examples
///
/// ```
/// use core::any::TypeId;
/// use vc_utils::TypeIdMap;
///
/// let mut map = TypeIdMap::new();
/// *map.get_or_insert(TypeId::of::<u8>(), || 1) += 1;
/// *map.get_or_insert(TypeId::of::<u8>(), || 100) += 1;
///
/// assert_eq!(map.get_type::<u8>(), Some(&3));
/// assert!(map.get_type::<i8>().is_none());
/// ```
pub struct TypeIdMap<V>(HashMap<TypeId, V, TypeIdHashState>);

impl<V> TypeIdMap<V> {
    /// Creates an empty map, usable in a `static`.
    #[inline]
    pub const fn new() -> Self {
        Self(HashMap::with_hasher(TypeIdHashState))
    }

    /// Returns the value of `type_id`, inserting `f()` first if it is missing.
    #[inline]
    pub fn get_or_insert(&mut self, type_id: TypeId, f: impl FnOnce() -> V) -> &mut V {
        match self.0.entry(type_id) {
            Entry::Vacant(entry) => entry.insert(f()),
            Entry::Occupied(entry) => entry.into_mut(),
        }
    }

    #[inline]
    pub fn get(&self, type_id: &TypeId) -> Option<&V> {
        self.0.get(type_id)
    }

    #[inline(always)]
    pub fn get_type<T: ?Sized + 'static>(&self) -> Option<&V> {
        self.get(&TypeId::of::<T>())
    }

    /// Stores `value` for `type_id`, returning the value it replaced.
    #[inline]
    pub fn insert(&mut self, type_id: TypeId, value: V) -> Option<V> {
        self.0.insert(type_id, value)
    }

    #[inline]
    pub fn contains(&self, type_id: &TypeId) -> bool {
        self.0.contains_key(type_id)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<V> Default for TypeIdMap<V> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<V: fmt::Debug> fmt::Debug for TypeIdMap<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.0.iter()).finish()
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use core::any::TypeId;

    use super::TypeIdMap;

    #[test]
    fn distinct_types_get_distinct_slots() {
        let mut map = TypeIdMap::new();
        assert!(map.insert(TypeId::of::<u32>(), "u32").is_none());
        assert!(map.insert(TypeId::of::<i32>(), "i32").is_none());
        assert_eq!(map.insert(TypeId::of::<u32>(), "again"), Some("u32"));

        assert_eq!(map.len(), 2);
        assert_eq!(map.get_type::<u32>(), Some(&"again"));
        assert!(map.contains(&TypeId::of::<i32>()));
        assert!(!map.is_empty());
    }
}
