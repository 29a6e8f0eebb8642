use core::fmt;
use core::marker::PhantomData;
use core::ptr::NonNull;

// -----------------------------------------------------------------------------
// Ptr

/// A fully type-erased, read-only view of memory, similar to `&'a dyn Any`.
///
/// The encoder walks values through `Ptr` instead of raw addresses: the view
/// carries the borrow of the value it was created from, so the container keeps
/// owning its memory while a compiled procedure reads from it.
///
/// # type-erased
///
/// The pointee type is not recorded. Whoever reads through the view must know
/// which type lives at the address (usually from a `TypeInfo`), and should
/// check alignment in debug builds with [`debug_assert_aligned`](Ptr::debug_assert_aligned).
///
/// # borrow-like
///
/// - It must always point to a valid value of whatever the pointee type is.
/// - The lifetime `'a` accurately represents how long the pointer is valid for.
/// - The target must not be mutated while the view is alive.
///
/// # Examples
///
/// ```
/// # use vc_ptr::Ptr;
/// let x = 8i32;
/// let ptr = Ptr::from_ref(&x);
///
/// ptr.debug_assert_aligned::<i32>();
/// let rx = unsafe { ptr.as_ref::<i32>() };
/// assert_eq!(*rx, 8);
/// ```
#[derive(Copy, Clone, PartialEq, Eq)]
#[repr(transparent)]
pub struct Ptr<'a>(NonNull<u8>, PhantomData<&'a u8>);

impl<'a> Ptr<'a> {
    /// Create a `Ptr` from a raw `NonNull<u8>` pointer.
    ///
    /// # Safety
    ///
    /// - The provided lifetime `'a` must be valid for the pointee.
    /// - `ptr` must point to a valid object of the intended pointee type.
    ///
    /// # Examples
    ///
    /// ```
    /// # use vc_ptr::Ptr;
    /// # use core::ptr::NonNull;
    /// let x = 8i32;
    ///
    /// let ptr: Ptr<'_> = unsafe {
    ///     Ptr::new(NonNull::from_ref(&x).cast())
    /// };
    /// assert!(ptr.is_aligned::<i32>());
    /// ```
    #[inline(always)]
    pub const unsafe fn new(ptr: NonNull<u8>) -> Ptr<'a> {
        Ptr(ptr, PhantomData)
    }

    /// Creates a `Ptr` from a reference with same lifetime.
    ///
    /// For unsized values (slices, `str`) the view points at the first byte
    /// of the data; the length is dropped.
    ///
    /// # Examples
    ///
    /// ```
    /// # use vc_ptr::Ptr;
    /// let x = [1u16, 2, 3];
    /// let ptr = Ptr::from_ref(&x[..]);
    /// assert_eq!(unsafe { *ptr.as_ref::<u16>() }, 1);
    /// ```
    #[inline(always)]
    pub const fn from_ref<T: ?Sized>(val: &'a T) -> Ptr<'a> {
        Ptr(NonNull::from_ref(val).cast(), PhantomData)
    }

    /// Gets the underlying pointer, erasing the associated lifetime.
    ///
    /// If possible, it is encouraged to use [`as_ref`](Self::as_ref) over this function.
    #[inline(always)]
    pub const fn as_ptr(self) -> *const u8 {
        self.0.as_ptr()
    }

    /// Gets the underlying `NonNull`, erasing the associated lifetime.
    #[inline(always)]
    pub const fn as_non_null(self) -> NonNull<u8> {
        self.0
    }

    /// Convert this [`Ptr`] into a `&T` with the same lifetime `'a`.
    ///
    /// # Safety
    ///
    /// - `Ptr` points to a valid object.
    /// - `T` must match the actual type of the pointee.
    /// - `Ptr` must be properly aligned for `T`.
    #[inline(always)]
    pub const unsafe fn as_ref<T>(self) -> &'a T {
        // SAFETY: Type correct, ptr aligned and pointee valid object.
        unsafe { &*self.0.as_ptr().cast::<T>() }
    }

    /// Check if the pointer is aligned to type `T`.
    #[inline]
    pub fn is_aligned<T>(&self) -> bool {
        self.0.as_ptr().cast::<T>().is_aligned()
    }

    /// A function that only checks alignment in debug mode.
    #[cfg_attr(debug_assertions, track_caller)]
    #[cfg_attr(not(debug_assertions), inline(always))]
    pub fn debug_assert_aligned<T>(&self) {
        debug_assert!(
            self.is_aligned::<T>(),
            "pointer is not aligned. Address {:p} does not have alignment {} for type {}",
            self.0,
            align_of::<T>(),
            core::any::type_name::<T>(),
        );
    }

    /// Like [`debug_assert_aligned`](Self::debug_assert_aligned), for an alignment
    /// only known at runtime (e.g. read from a type descriptor).
    #[cfg_attr(debug_assertions, track_caller)]
    #[cfg_attr(not(debug_assertions), inline(always))]
    pub fn debug_assert_aligned_to(&self, align: usize) {
        debug_assert!(
            self.0.as_ptr().addr().is_multiple_of(align),
            "pointer is not aligned. Address {:p} does not have alignment {}",
            self.0,
            align,
        );
    }

    /// Moves the view forward by `count` bytes.
    ///
    /// This is how a struct field is reached from the start of the struct.
    ///
    /// # Safety
    /// - The result must stay inside the same allocated object.
    /// - The resulting pointer must outlive the lifetime of this pointer.
    #[inline]
    pub const unsafe fn byte_add(self, count: usize) -> Self {
        // SAFETY: The caller keeps the offset inside the pointee.
        Self(unsafe { self.0.add(count) }, PhantomData)
    }

    /// Returns the view of the `index`-th element of an array whose
    /// elements are `stride` bytes apart, starting at `self`.
    ///
    /// # Safety
    /// - `index` must be lower than the number of elements.
    /// - `stride` must be the element size of the array.
    ///
    /// # Examples
    ///
    /// ```
    /// # use vc_ptr::Ptr;
    /// let x = [10u64, 20, 30];
    /// let base = Ptr::from_ref(&x[..]);
    /// let third = unsafe { base.element(2, size_of::<u64>()) };
    /// assert_eq!(unsafe { *third.as_ref::<u64>() }, 30);
    /// ```
    #[inline]
    pub const unsafe fn element(self, index: usize, stride: usize) -> Self {
        // SAFETY: `index < len` is upheld by the caller.
        unsafe { self.byte_add(index * stride) }
    }
}

impl<'a, T: ?Sized> From<&'a T> for Ptr<'a> {
    #[inline]
    fn from(val: &'a T) -> Self {
        Self::from_ref(val)
    }
}

impl From<Ptr<'_>> for NonNull<u8> {
    #[inline(always)]
    fn from(ptr: Ptr<'_>) -> Self {
        ptr.0
    }
}

impl fmt::Pointer for Ptr<'_> {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Pointer::fmt(&self.0, f)
    }
}

impl fmt::Debug for Ptr<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Ptr({:?})", self.0)
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::Ptr;

    #[repr(C)]
    struct Pair {
        a: u8,
        b: u32,
    }

    #[test]
    fn field_through_offset() {
        let pair = Pair { a: 1, b: 0xdead };
        let base = Ptr::from_ref(&pair);

        let b = unsafe { base.byte_add(core::mem::offset_of!(Pair, b)) };
        b.debug_assert_aligned::<u32>();
        assert_eq!(unsafe { *b.as_ref::<u32>() }, 0xdead);
        assert_eq!(unsafe { *base.as_ref::<u8>() }, pair.a);
    }

    #[test]
    fn elements_by_stride() {
        let items = [3i16, -4, 5];
        let base = Ptr::from_ref(&items[..]);

        let collected: [i16; 3] =
            core::array::from_fn(|i| unsafe { *base.element(i, size_of::<i16>()).as_ref() });
        assert_eq!(collected, items);
    }

    #[test]
    fn same_address_compares_equal() {
        let x = 7u32;
        assert_eq!(Ptr::from_ref(&x), Ptr::from(&x));
    }
}
