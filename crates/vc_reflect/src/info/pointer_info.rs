use core::any::TypeId;
use core::fmt;

use vc_ptr::Ptr;

use crate::info::{Type, TypeInfo, Typed, impl_type_fn};
use crate::ops::Pointer;

/// Compile-time info of an owning pointer, the indirect kind.
///
/// A slot holding such a value holds an address, not the pointee, so the
/// pointee is only reached through [`deref`](PointerInfo::deref).
/// `Option<Box<T>>` is described as a nullable pointer.
///
/// # Examples
///
/// ```
/// use vc_ptr::Ptr;
/// use vc_reflect::info::Typed;
///
/// let none: Option<Box<u8>> = None;
/// let info = <Option<Box<u8>> as Typed>::type_info().as_pointer().unwrap();
///
/// assert!(unsafe { info.deref(Ptr::from_ref(&none)) }.is_none());
/// ```
#[derive(Clone)]
pub struct PointerInfo {
    ty: Type,
    target_id: TypeId,
    target_info: fn() -> &'static TypeInfo,
    deref: for<'a> unsafe fn(Ptr<'a>) -> Option<Ptr<'a>>,
}

impl PointerInfo {
    impl_type_fn!(ty);

    /// Create a new [`PointerInfo`].
    #[inline]
    pub const fn new<TPtr: Pointer>() -> Self {
        Self {
            ty: Type::of::<TPtr>(),
            target_id: TypeId::of::<TPtr::Target>(),
            target_info: <TPtr::Target as Typed>::type_info,
            deref: pointer_deref::<TPtr>,
        }
    }

    /// Returns the [`TypeId`] of the pointee.
    #[inline]
    pub const fn target_id(&self) -> TypeId {
        self.target_id
    }

    /// Returns the pointee's [`TypeInfo`].
    #[inline]
    pub fn target_info(&self) -> &'static TypeInfo {
        (self.target_info)()
    }

    /// Follows the pointer stored behind `ptr`, `None` is a null pointer.
    ///
    /// # Safety
    ///
    /// `ptr` must point to a live value of the type this info describes.
    #[inline]
    pub unsafe fn deref<'a>(&self, ptr: Ptr<'a>) -> Option<Ptr<'a>> {
        ptr.debug_assert_aligned_to(self.ty.align());
        // SAFETY: the caller guarantees the pointee type.
        unsafe { (self.deref)(ptr) }
    }
}

impl fmt::Debug for PointerInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PointerInfo")
            .field("ty", &self.ty)
            .finish_non_exhaustive()
    }
}

unsafe fn pointer_deref<'a, P: Pointer>(ptr: Ptr<'a>) -> Option<Ptr<'a>> {
    // SAFETY: `PointerInfo::deref` callers guarantee that `ptr` points to a `P`.
    let ptr = unsafe { ptr.as_ref::<P>() };
    ptr.target().map(Ptr::from_ref)
}
