use crate::impls::GenericTypeInfoCell;
use crate::impls::utils::{impl_reflect_int, impl_reflect_opaque};
use crate::info::{ListInfo, OpaqueInfo, StringInfo, TypeInfo, Typed};
use crate::ops::{List, Text};

impl_reflect_int!(
    i8 => I8,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    i128 => I128,
    isize => Isize,
    u8 => U8,
    u16 => U16,
    u32 => U32,
    u64 => U64,
    u128 => U128,
    usize => Usize,
);

impl_reflect_opaque!(bool, char, f32, f64, ());

// -----------------------------------------------------------------------------
// str

// SAFETY: the info is built for `Self`.
unsafe impl Typed for &'static str {
    fn type_info() -> &'static TypeInfo {
        static CELL: crate::impls::NonGenericTypeInfoCell =
            crate::impls::NonGenericTypeInfoCell::new();
        CELL.get_or_init(|| TypeInfo::String(StringInfo::new::<Self>()))
    }
}

impl Text for &'static str {
    #[inline]
    fn as_text(&self) -> &str {
        self
    }
}

// -----------------------------------------------------------------------------
// Array

// SAFETY: as above.
unsafe impl<T: Typed, const N: usize> Typed for [T; N] {
    fn type_info() -> &'static TypeInfo {
        static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
        CELL.get_or_insert::<Self>(|| TypeInfo::List(ListInfo::new::<Self>()))
    }
}

impl<T: Typed, const N: usize> List for [T; N] {
    type Item = T;

    #[inline]
    fn as_items(&self) -> Option<&[T]> {
        Some(self.as_slice())
    }
}

// -----------------------------------------------------------------------------
// Function pointers

// SAFETY: as above.
unsafe impl<R: 'static> Typed for fn() -> R {
    fn type_info() -> &'static TypeInfo {
        static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
        CELL.get_or_insert::<Self>(|| TypeInfo::Opaque(OpaqueInfo::new::<Self>()))
    }
}

// SAFETY: as above.
unsafe impl<A: 'static, R: 'static> Typed for fn(A) -> R {
    fn type_info() -> &'static TypeInfo {
        static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
        CELL.get_or_insert::<Self>(|| TypeInfo::Opaque(OpaqueInfo::new::<Self>()))
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use vc_ptr::Ptr;

    use crate::info::{IntRepr, ReflectKind, Typed};

    #[test]
    fn ints_carry_their_repr() {
        assert_eq!(i8::type_info().as_int().unwrap().repr(), IntRepr::I8);
        assert_eq!(u128::type_info().as_int().unwrap().repr(), IntRepr::U128);
        assert_eq!(isize::type_info().as_int().unwrap().repr().size(), size_of::<isize>());
    }

    #[test]
    fn array_header_spans_all_items() {
        let arr = [7u32, 8, 9];
        let info = <[u32; 3]>::type_info().as_list().unwrap();
        let header = unsafe { info.header(Ptr::from_ref(&arr)) };

        assert_eq!(header.len, 3);
        let last = unsafe { header.data.unwrap().element(2, info.item_stride()) };
        assert_eq!(unsafe { *last.as_ref::<u32>() }, 9);
    }

    #[test]
    fn static_str_reads_back() {
        let s: &'static str = "abc";
        let info = <&'static str>::type_info().as_string().unwrap();
        assert_eq!(unsafe { info.as_str(Ptr::from_ref(&s)) }, "abc");
    }

    #[test]
    fn function_pointers_are_opaque() {
        assert_eq!(<fn()>::type_info().kind(), ReflectKind::Opaque);
        assert_eq!(<fn(u8) -> u8>::type_info().kind(), ReflectKind::Opaque);
        assert_eq!(f64::type_info().kind(), ReflectKind::Opaque);
    }
}
