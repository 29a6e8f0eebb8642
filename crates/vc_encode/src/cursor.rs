//! Reusable scratch for walking the entries of a map.
//!
//! A [`MapCursor`] records the key and value addresses of one map through
//! [`MapInfo::visit`], then hands them out one entry at a time. The recorded
//! addresses only live inside a [`MapEntries`] borrow of the map, they are
//! cleared when it drops, so a pooled cursor never points into a map that is
//! no longer borrowed.

use alloc::vec::Vec;
use core::marker::PhantomData;
use core::ptr::NonNull;

use vc_ptr::Ptr;
use vc_reflect::info::MapInfo;

use crate::pool::Recycle;

// -----------------------------------------------------------------------------
// MapCursor

type Entry = (NonNull<u8>, NonNull<u8>);

/// Scratch storage for the entry addresses of one map.
///
/// # Examples
///
/// ```
/// use std::collections::BTreeMap;
/// use vc_encode::cursor::MapCursor;
/// use vc_ptr::Ptr;
/// use vc_reflect::info::Typed;
///
/// let map = BTreeMap::from([(1u8, 10u8), (2, 20)]);
/// let info = <BTreeMap<u8, u8> as Typed>::type_info().as_map().unwrap();
///
/// let mut cursor = MapCursor::new();
/// let entries = unsafe { cursor.reset(info, Ptr::from_ref(&map)) };
/// assert_eq!(entries.len(), 2);
///
/// let sum: u8 = entries
///     .map(|(k, v)| unsafe { k.as_ref::<u8>() + v.as_ref::<u8>() })
///     .sum();
/// assert_eq!(sum, 33);
/// ```
#[derive(Debug, Default)]
pub struct MapCursor {
    entries: Vec<Entry>,
    pos: usize,
}

// SAFETY: the stored addresses are only dereferenced through `MapEntries`,
// which borrows both the cursor and the map. An idle cursor stores nothing.
unsafe impl Send for MapCursor {}

impl MapCursor {
    #[inline]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
            pos: 0,
        }
    }

    /// Reinitialises the cursor for the map behind `map`.
    ///
    /// # Safety
    ///
    /// `map` must point to a live value of the type `info` describes.
    pub unsafe fn reset<'c, 'm>(&'c mut self, info: &MapInfo, map: Ptr<'m>) -> MapEntries<'c, 'm> {
        self.entries.clear();
        self.pos = 0;

        let entries = &mut self.entries;
        // SAFETY: the caller guarantees the pointee type.
        unsafe {
            info.visit(map, &mut |k, v| {
                entries.push((k.as_non_null(), v.as_non_null()));
            });
        }

        MapEntries {
            cursor: self,
            _marker: PhantomData,
        }
    }

    /// Returns the number of entries the allocation can hold.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.entries.capacity()
    }

    /// Forgets every recorded entry.
    #[inline]
    pub fn clear(&mut self) {
        self.entries.clear();
        self.pos = 0;
    }
}

// -----------------------------------------------------------------------------
// MapEntries

/// The entries of one map, borrowed for `'m`.
///
/// Yields `(key, value)` views in the map's iteration order, which is
/// unordered for hash maps.
pub struct MapEntries<'c, 'm> {
    cursor: &'c mut MapCursor,
    _marker: PhantomData<Ptr<'m>>,
}

impl MapEntries<'_, '_> {
    /// Returns the number of entries visited by [`MapCursor::reset`].
    #[inline]
    pub fn visited(&self) -> usize {
        self.cursor.entries.len()
    }
}

impl<'m> Iterator for MapEntries<'_, 'm> {
    type Item = (Ptr<'m>, Ptr<'m>);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let &(key, value) = self.cursor.entries.get(self.cursor.pos)?;
        self.cursor.pos += 1;
        // SAFETY: recorded by `reset` from a map that stays borrowed for `'m`.
        unsafe { Some((Ptr::new(key), Ptr::new(value))) }
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let rest = self.cursor.entries.len() - self.cursor.pos;
        (rest, Some(rest))
    }
}

impl ExactSizeIterator for MapEntries<'_, '_> {}

impl Drop for MapEntries<'_, '_> {
    #[inline]
    fn drop(&mut self) {
        self.cursor.clear();
    }
}

// -----------------------------------------------------------------------------
// CursorRecycle

/// Policy of the cursor pool, cursors that grew past `max_entries` are dropped.
#[derive(Debug, Clone, Copy)]
pub struct CursorRecycle {
    max_entries: usize,
}

impl CursorRecycle {
    #[inline]
    pub const fn new(max_entries: usize) -> Self {
        Self { max_entries }
    }
}

impl Recycle<MapCursor> for CursorRecycle {
    #[inline]
    fn create(&self) -> MapCursor {
        MapCursor::new()
    }

    #[inline]
    fn recycle(&self, item: &mut MapCursor) -> bool {
        item.clear();
        item.capacity() <= self.max_entries
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use vc_ptr::Ptr;
    use vc_reflect::info::Typed;

    use super::{CursorRecycle, MapCursor};
    use crate::pool::{Pool, Recycle};

    fn map_info() -> &'static vc_reflect::info::MapInfo {
        <HashMap<u32, u32> as Typed>::type_info().as_map().unwrap()
    }

    #[test]
    fn visits_every_entry_once() {
        let map: HashMap<u32, u32> = (0..50).map(|i| (i, i * 2)).collect();
        let mut cursor = MapCursor::new();

        let mut seen: Vec<(u32, u32)> = unsafe { cursor.reset(map_info(), Ptr::from_ref(&map)) }
            .map(|(k, v)| unsafe { (*k.as_ref::<u32>(), *v.as_ref::<u32>()) })
            .collect();
        seen.sort_unstable();

        let expected: Vec<(u32, u32)> = (0..50).map(|i| (i, i * 2)).collect();
        assert_eq!(seen, expected);
    }

    #[test]
    fn reset_forgets_previous_map() {
        let a = HashMap::from([(1u32, 1u32), (2, 2), (3, 3)]);
        let b = HashMap::from([(9u32, 9u32)]);
        let mut cursor = MapCursor::new();

        let mut first = unsafe { cursor.reset(map_info(), Ptr::from_ref(&a)) };
        assert_eq!(first.visited(), 3);
        first.next();
        drop(first);

        let second: Vec<_> = unsafe { cursor.reset(map_info(), Ptr::from_ref(&b)) }
            .map(|(k, _)| unsafe { *k.as_ref::<u32>() })
            .collect();
        assert_eq!(second, [9]);
    }

    #[test]
    fn entries_cleared_on_drop() {
        let map = HashMap::from([(1u32, 1u32)]);
        let mut cursor = MapCursor::new();
        drop(unsafe { cursor.reset(map_info(), Ptr::from_ref(&map)) });

        assert!(cursor.entries.is_empty());
        assert_eq!(cursor.pos, 0);
    }

    #[test]
    fn pooled_cursor_policy() {
        let recycle = CursorRecycle::new(4);
        let mut small = recycle.create();
        assert!(recycle.recycle(&mut small));

        let mut big = MapCursor::new();
        big.entries.reserve(64);
        assert!(!recycle.recycle(&mut big));

        let pool: Pool<MapCursor, _> = Pool::new(2, CursorRecycle::new(64));
        drop(pool.acquire());
        assert_eq!(pool.idle(), 1);
    }
}
