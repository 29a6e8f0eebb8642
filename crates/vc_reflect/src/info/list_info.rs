use core::any::TypeId;
use core::fmt;

use vc_ptr::Ptr;

use crate::info::{Type, TypeInfo, Typed, impl_type_fn};
use crate::ops::List;

// -----------------------------------------------------------------------------
// SliceHeader

/// The `(data, len)` pair of a contiguous list.
///
/// `data` is `None` for a null list (for example `Option<Vec<T>>::None`),
/// which is different from an empty one.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct SliceHeader<'a> {
    pub data: Option<Ptr<'a>>,
    pub len: usize,
}

impl<'a> SliceHeader<'a> {
    /// The header of a null list.
    pub const NULL: Self = Self { data: None, len: 0 };

    /// Creates the header of a borrowed slice.
    #[inline]
    pub const fn from_slice<T>(slice: &'a [T]) -> Self {
        Self {
            data: Some(Ptr::from_ref(slice)),
            len: slice.len(),
        }
    }

    /// Returns `true` if the header describes a null list.
    #[inline]
    pub const fn is_null(&self) -> bool {
        self.data.is_none()
    }
}

impl fmt::Debug for SliceHeader<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SliceHeader")
            .field("data", &self.data)
            .field("len", &self.len)
            .finish()
    }
}

// -----------------------------------------------------------------------------
// ListInfo

/// A container for compile-time info of contiguous lists.
///
/// Items are stored inline, `item_stride` bytes apart, so the `i`-th item of
/// a list lives at `data + i * item_stride`.
///
/// # Examples
///
/// ```rust
/// # use core::any::TypeId;
/// use vc_reflect::info::Typed;
///
/// let info = <Vec<i32> as Typed>::type_info().as_list().unwrap();
///
/// assert_eq!(info.item_id(), TypeId::of::<i32>());
/// assert_eq!(info.item_stride(), 4);
/// ```
#[derive(Clone)]
pub struct ListInfo {
    ty: Type,
    item_id: TypeId,
    item_stride: usize,
    // `TypeInfo` is created on the first visit, use function pointers to delay it.
    item_info: fn() -> &'static TypeInfo,
    header: for<'a> unsafe fn(Ptr<'a>) -> SliceHeader<'a>,
}

impl ListInfo {
    impl_type_fn!(ty);

    /// Creates a new [`ListInfo`].
    #[inline]
    pub const fn new<TList: List>() -> Self {
        Self {
            ty: Type::of::<TList>(),
            item_id: TypeId::of::<TList::Item>(),
            item_stride: size_of::<TList::Item>(),
            item_info: <TList::Item as Typed>::type_info,
            header: list_header::<TList>,
        }
    }

    /// Returns the [`TypeId`] of list items.
    #[inline]
    pub const fn item_id(&self) -> TypeId {
        self.item_id
    }

    /// Returns the distance in bytes between two adjacent items.
    #[inline]
    pub const fn item_stride(&self) -> usize {
        self.item_stride
    }

    /// Returns the [`TypeInfo`] of list items.
    #[inline]
    pub fn item_info(&self) -> &'static TypeInfo {
        (self.item_info)()
    }

    /// Reads the slice header of the list behind `list`.
    ///
    /// # Safety
    ///
    /// `list` must point to a live value of the type this info describes.
    #[inline]
    pub unsafe fn header<'a>(&self, list: Ptr<'a>) -> SliceHeader<'a> {
        list.debug_assert_aligned_to(self.ty.align());
        // SAFETY: the caller guarantees the pointee type.
        unsafe { (self.header)(list) }
    }
}

impl fmt::Debug for ListInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListInfo")
            .field("ty", &self.ty)
            .field("item_stride", &self.item_stride)
            .finish_non_exhaustive()
    }
}

unsafe fn list_header<'a, L: List>(list: Ptr<'a>) -> SliceHeader<'a> {
    // SAFETY: `ListInfo::header` callers guarantee that `list` points to a `L`.
    let list = unsafe { list.as_ref::<L>() };
    match list.as_items() {
        Some(items) => SliceHeader::from_slice(items),
        None => SliceHeader::NULL,
    }
}
