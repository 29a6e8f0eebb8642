use ::alloc::boxed::Box;
use ::alloc::collections::BTreeMap;
use ::alloc::string::String;
use ::alloc::vec::Vec;

use crate::impls::{GenericTypeInfoCell, NonGenericTypeInfoCell};
use crate::info::{ListInfo, MapInfo, PointerInfo, StringInfo, TypeInfo, Typed};
use crate::ops::{List, Map, Pointer, Text};

// -----------------------------------------------------------------------------
// String

// SAFETY: the info is built for `Self`.
unsafe impl Typed for String {
    fn type_info() -> &'static TypeInfo {
        static CELL: NonGenericTypeInfoCell = NonGenericTypeInfoCell::new();
        CELL.get_or_init(|| TypeInfo::String(StringInfo::new::<Self>()))
    }
}

impl Text for String {
    #[inline]
    fn as_text(&self) -> &str {
        self.as_str()
    }
}

// -----------------------------------------------------------------------------
// Vec

// SAFETY: as above.
unsafe impl<T: Typed> Typed for Vec<T> {
    fn type_info() -> &'static TypeInfo {
        static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
        CELL.get_or_insert::<Self>(|| TypeInfo::List(ListInfo::new::<Self>()))
    }
}

impl<T: Typed> List for Vec<T> {
    type Item = T;

    #[inline]
    fn as_items(&self) -> Option<&[T]> {
        Some(self.as_slice())
    }
}

// -----------------------------------------------------------------------------
// Box

// SAFETY: as above.
unsafe impl<T: Typed> Typed for Box<T> {
    fn type_info() -> &'static TypeInfo {
        static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
        CELL.get_or_insert::<Self>(|| TypeInfo::Pointer(PointerInfo::new::<Self>()))
    }
}

impl<T: Typed> Pointer for Box<T> {
    type Target = T;

    #[inline]
    fn target(&self) -> Option<&T> {
        Some(&**self)
    }
}

// -----------------------------------------------------------------------------
// BTreeMap

// SAFETY: as above.
unsafe impl<K: Typed, V: Typed> Typed for BTreeMap<K, V> {
    fn type_info() -> &'static TypeInfo {
        static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
        CELL.get_or_insert::<Self>(|| TypeInfo::Map(MapInfo::new::<Self>()))
    }
}

impl<K: Typed, V: Typed> Map for BTreeMap<K, V> {
    type Key = K;
    type Value = V;

    #[inline]
    fn entry_count(&self) -> usize {
        Self::len(self)
    }

    fn for_each_entry<'a>(&'a self, f: &mut dyn FnMut(&'a K, &'a V)) {
        for (key, value) in Self::iter(self) {
            f(key, value);
        }
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use ::alloc::boxed::Box;
    use ::alloc::collections::BTreeMap;
    use ::alloc::string::String;
    use ::alloc::vec::Vec;

    use vc_ptr::Ptr;

    use crate::info::Typed;

    #[test]
    fn empty_vec_is_not_null() {
        let v: Vec<String> = Vec::new();
        let info = <Vec<String>>::type_info().as_list().unwrap();
        let header = unsafe { info.header(Ptr::from_ref(&v)) };

        assert!(!header.is_null());
        assert_eq!(header.len, 0);
        assert_eq!(info.item_stride(), size_of::<String>());
    }

    #[test]
    fn box_derefs_to_heap_value() {
        let b = Box::new(5u64);
        let info = <Box<u64>>::type_info().as_pointer().unwrap();
        let target = unsafe { info.deref(Ptr::from_ref(&b)) }.unwrap();

        assert!(info.target_info().type_is::<u64>());
        assert_eq!(target.as_ptr(), (&raw const *b).cast::<u8>());
    }

    #[test]
    fn btree_map_visits_in_key_order() {
        let map = BTreeMap::from([(2u8, 20u8), (1, 10), (3, 30)]);
        let info = <BTreeMap<u8, u8>>::type_info().as_map().unwrap();
        let ptr = Ptr::from_ref(&map);

        let mut keys = Vec::new();
        unsafe { info.visit(ptr, &mut |k, _| keys.push(*k.as_ref::<u8>())) };

        assert_eq!(unsafe { info.len(ptr) }, 3);
        assert_eq!(keys, [1, 2, 3]);
    }
}
