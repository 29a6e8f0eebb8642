use core::any::TypeId;
use core::fmt;

use vc_ptr::Ptr;

use crate::info::{Type, TypeInfo, Typed, impl_type_fn};
use crate::ops::Map;

/// A container for compile-time map-like info.
///
/// Besides the key and value types, a `MapInfo` carries two raw accessors:
/// [`len`](MapInfo::len) and [`visit`](MapInfo::visit). They use the map's own
/// iteration API, so no knowledge of the hash table layout leaks out of the
/// map implementation.
///
/// # Examples
///
/// ```rust
/// # use core::any::TypeId;
/// use vc_reflect::info::Typed;
/// use std::collections::BTreeMap;
///
/// let info = <BTreeMap<String, i32> as Typed>::type_info().as_map().unwrap();
///
/// assert_eq!(info.key_id(), TypeId::of::<String>());
/// assert_eq!(info.value_id(), TypeId::of::<i32>());
/// ```
#[derive(Clone)]
pub struct MapInfo {
    ty: Type,
    key_id: TypeId,
    value_id: TypeId,
    // `TypeInfo` is created on first access; use function pointers to delay it.
    key_info: fn() -> &'static TypeInfo,
    value_info: fn() -> &'static TypeInfo,
    len: unsafe fn(Ptr<'_>) -> usize,
    visit: for<'a> unsafe fn(Ptr<'a>, &mut dyn FnMut(Ptr<'a>, Ptr<'a>)),
}

impl MapInfo {
    impl_type_fn!(ty);

    /// Create a new [`MapInfo`].
    #[inline]
    pub const fn new<TMap: Map>() -> Self {
        Self {
            ty: Type::of::<TMap>(),
            key_id: TypeId::of::<TMap::Key>(),
            value_id: TypeId::of::<TMap::Value>(),
            key_info: <TMap::Key as Typed>::type_info,
            value_info: <TMap::Value as Typed>::type_info,
            len: map_len::<TMap>,
            visit: map_visit::<TMap>,
        }
    }

    /// Returns the [`TypeId`] of the key.
    #[inline]
    pub const fn key_id(&self) -> TypeId {
        self.key_id
    }

    /// Returns the [`TypeId`] of the value.
    #[inline]
    pub const fn value_id(&self) -> TypeId {
        self.value_id
    }

    /// Returns the key's [`TypeInfo`].
    #[inline]
    pub fn key_info(&self) -> &'static TypeInfo {
        (self.key_info)()
    }

    /// Returns the value's [`TypeInfo`].
    #[inline]
    pub fn value_info(&self) -> &'static TypeInfo {
        (self.value_info)()
    }

    /// Returns the number of entries of the map behind `map`.
    ///
    /// # Safety
    ///
    /// `map` must point to a live value of the type this info describes.
    #[inline]
    pub unsafe fn len(&self, map: Ptr<'_>) -> usize {
        map.debug_assert_aligned_to(self.ty.align());
        // SAFETY: the caller guarantees the pointee type.
        unsafe { (self.len)(map) }
    }

    /// Calls `f` once with the key and value views of every entry of the map
    /// behind `map`.
    ///
    /// The visiting order is the map's own iteration order and is **unordered**
    /// for hash maps: do not rely on it.
    ///
    /// # Safety
    ///
    /// `map` must point to a live value of the type this info describes.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::collections::HashMap;
    /// use vc_ptr::Ptr;
    /// use vc_reflect::info::Typed;
    ///
    /// let map = HashMap::from([(1u8, 10u8), (2, 20)]);
    /// let info = <HashMap<u8, u8> as Typed>::type_info().as_map().unwrap();
    ///
    /// let mut sum = 0;
    /// unsafe {
    ///     info.visit(Ptr::from_ref(&map), &mut |k, v| {
    ///         sum += *k.as_ref::<u8>() + *v.as_ref::<u8>();
    ///     });
    /// }
    /// assert_eq!(sum, 33);
    /// ```
    #[inline]
    pub unsafe fn visit<'a>(&self, map: Ptr<'a>, f: &mut dyn FnMut(Ptr<'a>, Ptr<'a>)) {
        map.debug_assert_aligned_to(self.ty.align());
        // SAFETY: the caller guarantees the pointee type.
        unsafe { (self.visit)(map, f) }
    }
}

impl fmt::Debug for MapInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MapInfo")
            .field("ty", &self.ty)
            .finish_non_exhaustive()
    }
}

unsafe fn map_len<M: Map>(map: Ptr<'_>) -> usize {
    // SAFETY: `MapInfo::len` callers guarantee that `map` points to a `M`.
    unsafe { map.as_ref::<M>() }.entry_count()
}

unsafe fn map_visit<'a, M: Map>(map: Ptr<'a>, f: &mut dyn FnMut(Ptr<'a>, Ptr<'a>)) {
    // SAFETY: `MapInfo::visit` callers guarantee that `map` points to a `M`.
    let map = unsafe { map.as_ref::<M>() };
    map.for_each_entry(&mut |key, value| f(Ptr::from_ref(key), Ptr::from_ref(value)));
}
