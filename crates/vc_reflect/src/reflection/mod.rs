use core::any::TypeId;

use vc_ptr::Ptr;

use crate::info::{TypeInfo, Typed};

// -----------------------------------------------------------------------------
// Reflect

/// Object-safe access to the type information and memory of a value.
///
/// Auto impl for all types that implemented [`Typed`], so a `&T` can be
/// passed wherever a `&dyn Reflect` is expected. The trait is sealed, the
/// descriptor of a value always comes from its `Typed` impl.
///
/// # Examples
///
/// ```
/// use vc_reflect::{Reflect, info::ReflectKind};
///
/// let values: [&dyn Reflect; 2] = [&1u8, &String::from("a")];
///
/// assert_eq!(values[0].reflect_type_info().kind(), ReflectKind::Int);
/// assert_eq!(values[1].reflect_type_info().kind(), ReflectKind::String);
/// ```
pub trait Reflect: sealed::Sealed + 'static {
    /// Returns the [`TypeInfo`] of the underlying type.
    fn reflect_type_info(&self) -> &'static TypeInfo;

    /// Returns the [`TypeId`] of the underlying type, the identity token
    /// used to cache anything derived from its `TypeInfo`.
    fn reflect_type_id(&self) -> TypeId;

    /// Returns a type-erased view of `self`.
    fn as_ptr(&self) -> Ptr<'_>;
}

mod sealed {
    pub trait Sealed {}

    impl<T: super::Typed> Sealed for T {}
}

impl<T: Typed> Reflect for T {
    #[inline]
    fn reflect_type_info(&self) -> &'static TypeInfo {
        T::type_info()
    }

    #[inline]
    fn reflect_type_id(&self) -> TypeId {
        TypeId::of::<T>()
    }

    #[inline]
    fn as_ptr(&self) -> Ptr<'_> {
        Ptr::from_ref(self)
    }
}

// -----------------------------------------------------------------------------
// Extraction

/// Returns the type descriptor of `value` and a view of its memory.
///
/// The view borrows `value`, it cannot outlive it.
///
/// # Examples
///
/// ```
/// use vc_reflect::type_and_ptr_of;
///
/// let x = 7u32;
/// let (info, ptr) = type_and_ptr_of(&x);
///
/// assert!(info.type_is::<u32>());
/// assert_eq!(unsafe { *ptr.as_ref::<u32>() }, 7);
/// ```
#[inline]
pub fn type_and_ptr_of(value: &dyn Reflect) -> (&'static TypeInfo, Ptr<'_>) {
    (value.reflect_type_info(), value.as_ptr())
}

/// Returns the identity token of the type of `value`.
///
/// Equal for two values of the same type, different otherwise.
///
/// ```
/// use vc_reflect::type_id_of;
///
/// assert_eq!(type_id_of(&1u8), type_id_of(&2u8));
/// assert_ne!(type_id_of(&1u8), type_id_of(&1i8));
/// ```
#[inline]
pub fn type_id_of(value: &dyn Reflect) -> TypeId {
    value.reflect_type_id()
}

// -----------------------------------------------------------------------------
// Tests
