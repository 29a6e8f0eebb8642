use core::fmt;

use vc_ptr::Ptr;

use crate::info::{Type, impl_type_fn};
use crate::ops::Text;

/// Compile-time info of a string type.
///
/// # Examples
///
/// ```
/// use vc_ptr::Ptr;
/// use vc_reflect::info::Typed;
///
/// let s = String::from("hello");
/// let info = <String as Typed>::type_info().as_string().unwrap();
///
/// assert_eq!(unsafe { info.as_str(Ptr::from_ref(&s)) }, "hello");
/// ```
#[derive(Clone)]
pub struct StringInfo {
    ty: Type,
    as_str: for<'a> unsafe fn(Ptr<'a>) -> &'a str,
}

impl StringInfo {
    impl_type_fn!(ty);

    /// Create a new [`StringInfo`].
    #[inline]
    pub const fn new<T: Text>() -> Self {
        Self {
            ty: Type::of::<T>(),
            as_str: text_as_str::<T>,
        }
    }

    /// Borrows the string content behind `text`.
    ///
    /// # Safety
    ///
    /// `text` must point to a live value of the type this info describes.
    #[inline]
    pub unsafe fn as_str<'a>(&self, text: Ptr<'a>) -> &'a str {
        text.debug_assert_aligned_to(self.ty.align());
        // SAFETY: the caller guarantees the pointee type.
        unsafe { (self.as_str)(text) }
    }
}

impl fmt::Debug for StringInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StringInfo")
            .field("ty", &self.ty)
            .finish_non_exhaustive()
    }
}

unsafe fn text_as_str<'a, T: Text>(text: Ptr<'a>) -> &'a str {
    // SAFETY: `StringInfo::as_str` callers guarantee that `text` points to a `T`.
    unsafe { text.as_ref::<T>() }.as_text()
}
