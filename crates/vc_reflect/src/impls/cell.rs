//! Containers for static storage of type information.
//!
//! This is usually used to implement [`Typed`](crate::info::Typed);
//!
//! ## NonGenericTypeInfoCell
//!
//! For non generic types, provide [`NonGenericTypeInfoCell`] for storing [`TypeInfo`]
//!
//! Internally, there is an [`OnceLock<T>`], almost no additional expenses.
//!
//! ## GenericTypeInfoCell
//!
//! If the type is generic, the `static CELL` inside the function may be shared by different types.
//! Therefore, the inner of this container is a [`TypeIdMap<T>`] wrapped in [`RwLock`].
//!
//! ## Examples
//!
//! See [`Typed`](crate::info::Typed).

use alloc::boxed::Box;
use core::any::{Any, TypeId};

use vc_os::sync::{OnceLock, PoisonError, RwLock};
use vc_utils::TypeIdMap;

use crate::info::TypeInfo;

// -----------------------------------------------------------------------------
// NonGenericTypeInfoCell

/// Container for static storage of non-generic type information.
///
/// See [`Typed`](crate::info::Typed) for an example.
pub struct NonGenericTypeInfoCell(OnceLock<TypeInfo>);

impl NonGenericTypeInfoCell {
    /// Create a empty cell.
    #[inline]
    pub const fn new() -> Self {
        Self(OnceLock::new())
    }

    /// Returns a reference to the `TypeInfo` stored in the cell.
    ///
    /// If there is no entry found, a new one will be generated from the given function.
    #[inline]
    pub fn get_or_init<F>(&self, f: F) -> &TypeInfo
    where
        F: FnOnce() -> TypeInfo,
    {
        self.0.get_or_init(f)
    }
}

// -----------------------------------------------------------------------------
// GenericTypeInfoCell

/// Container for static storage of type information with generics.
///
/// If the type contains generics, the `static CELL` in the function may be shared by multiple types,
/// therefore, the interior of the container was used [`TypeIdMap`] and [`RwLock`].
///
/// The creating function runs without holding the lock.
///
/// See [`Typed`](crate::info::Typed) for an example.
pub struct GenericTypeInfoCell(RwLock<TypeIdMap<&'static TypeInfo>>);

impl GenericTypeInfoCell {
    /// Create a empty cell.
    #[inline]
    pub const fn new() -> Self {
        Self(RwLock::new(TypeIdMap::new()))
    }

    /// Returns a reference to the `TypeInfo` stored in the cell for type `G`.
    ///
    /// If there is no entry found, a new one will be generated from the given function.
    #[inline(always)]
    pub fn get_or_insert<G: Any + ?Sized>(&self, f: impl FnOnce() -> TypeInfo) -> &TypeInfo {
        // Separate to reduce code compilation times
        self.get_or_insert_by_type_id(TypeId::of::<G>(), f)
    }

    // Separate to reduce code compilation times
    #[inline(never)]
    fn get_or_insert_by_type_id(
        &self,
        type_id: TypeId,
        f: impl FnOnce() -> TypeInfo,
    ) -> &TypeInfo {
        match self.get_by_type_id(type_id) {
            Some(info) => info,
            None => self.insert_by_type_id(type_id, f()),
        }
    }

    // Separate to reduce code compilation times
    #[inline(never)]
    fn get_by_type_id(&self, type_id: TypeId) -> Option<&'static TypeInfo> {
        self.0
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&type_id)
            .copied()
    }

    // Separate to reduce code compilation times
    #[inline(never)]
    fn insert_by_type_id(&self, type_id: TypeId, value: TypeInfo) -> &'static TypeInfo {
        *self
            .0
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .get_or_insert(type_id, || Box::leak(Box::new(value)))
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use crate::info::Typed;

    #[test]
    fn generic_cell_keeps_instances_apart() {
        let a = <Vec<u8>>::type_info();
        let b = <Vec<u16>>::type_info();

        assert!(a.type_is::<Vec<u8>>());
        assert!(b.type_is::<Vec<u16>>());
        assert!(core::ptr::eq(a, <Vec<u8>>::type_info()));
    }
}
