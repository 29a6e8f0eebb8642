// -----------------------------------------------------------------------------
// Primitive helpers

macro_rules! impl_reflect_int {
    ($($ty:ty => $repr:ident),* $(,)?) => {$(
        // SAFETY: the info is built for `Self`.
        unsafe impl $crate::info::Typed for $ty {
            fn type_info() -> &'static $crate::info::TypeInfo {
                static CELL: $crate::impls::NonGenericTypeInfoCell =
                    $crate::impls::NonGenericTypeInfoCell::new();
                CELL.get_or_init(|| {
                    $crate::info::TypeInfo::Int($crate::info::IntInfo::new::<$ty>(
                        $crate::info::IntRepr::$repr,
                    ))
                })
            }
        }
    )*};
}

macro_rules! impl_reflect_opaque {
    ($($ty:ty),* $(,)?) => {$(
        // SAFETY: the info is built for `Self`.
        unsafe impl $crate::info::Typed for $ty {
            fn type_info() -> &'static $crate::info::TypeInfo {
                static CELL: $crate::impls::NonGenericTypeInfoCell =
                    $crate::impls::NonGenericTypeInfoCell::new();
                CELL.get_or_init(|| {
                    $crate::info::TypeInfo::Opaque($crate::info::OpaqueInfo::new::<$ty>())
                })
            }
        }
    )*};
}

pub(super) use impl_reflect_int;
pub(super) use impl_reflect_opaque;

// -----------------------------------------------------------------------------
// For normal HashMap

macro_rules! impl_reflect_for_hashmap {
    ($ty:path) => {
        // SAFETY: the info is built for `Self`.
        unsafe impl<K, V, S> $crate::info::Typed for $ty
        where
            K: $crate::info::Typed,
            V: $crate::info::Typed,
            S: ::core::hash::BuildHasher + 'static,
        {
            fn type_info() -> &'static $crate::info::TypeInfo {
                static CELL: $crate::impls::GenericTypeInfoCell =
                    $crate::impls::GenericTypeInfoCell::new();
                CELL.get_or_insert::<Self>(|| {
                    $crate::info::TypeInfo::Map($crate::info::MapInfo::new::<Self>())
                })
            }
        }

        impl<K, V, S> $crate::ops::Map for $ty
        where
            K: $crate::info::Typed,
            V: $crate::info::Typed,
            S: ::core::hash::BuildHasher + 'static,
        {
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
    };
}

pub(super) use impl_reflect_for_hashmap;
