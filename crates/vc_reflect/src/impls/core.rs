use ::alloc::boxed::Box;
use ::alloc::vec::Vec;

use crate::impls::GenericTypeInfoCell;
use crate::info::{ListInfo, PointerInfo, TypeInfo, Typed};
use crate::ops::{List, Pointer};

// -----------------------------------------------------------------------------
// Option<Vec<T>>

// SAFETY: the info is built for `Self`.
unsafe impl<T: Typed> Typed for Option<Vec<T>> {
    fn type_info() -> &'static TypeInfo {
        static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
        CELL.get_or_insert::<Self>(|| TypeInfo::List(ListInfo::new::<Self>()))
    }
}

impl<T: Typed> List for Option<Vec<T>> {
    type Item = T;

    #[inline]
    fn as_items(&self) -> Option<&[T]> {
        self.as_deref()
    }
}

// -----------------------------------------------------------------------------
// Option<Box<T>>

// SAFETY: as above.
unsafe impl<T: Typed> Typed for Option<Box<T>> {
    fn type_info() -> &'static TypeInfo {
        static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
        CELL.get_or_insert::<Self>(|| TypeInfo::Pointer(PointerInfo::new::<Self>()))
    }
}

impl<T: Typed> Pointer for Option<Box<T>> {
    type Target = T;

    #[inline]
    fn target(&self) -> Option<&T> {
        self.as_deref()
    }
}

// -----------------------------------------------------------------------------
// Tests
