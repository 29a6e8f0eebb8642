//! Cache line padding following crossbeam-utils 0.8.
//!
//! See <https://docs.rs/crate/crossbeam-utils/latest>

use core::fmt;
use core::ops::{Deref, DerefMut};

/// Pads and aligns a value to the length of a cache line.
///
/// The head and tail counters of [`ArrayQueue`](super::ArrayQueue) are written
/// by different threads; keeping them on separate cache lines stops one
/// thread's writes from invalidating the other's line.
///
/// 128 bytes covers x86-64 and aarch64 (which prefetch cache lines in pairs),
/// the remaining targets use 64 bytes.
///
/// # Examples
///
/// ```
/// use vc_os::utils::CachePadded;
///
/// let padded = CachePadded::new(7u32);
/// assert_eq!(*padded, 7);
/// assert!(align_of::<CachePadded<u32>>() >= 64);
/// ```
#[cfg_attr(any(target_arch = "x86_64", target_arch = "aarch64"), repr(align(128)))]
#[cfg_attr(
    not(any(target_arch = "x86_64", target_arch = "aarch64")),
    repr(align(64))
)]
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct CachePadded<T> {
    value: T,
}

impl<T> CachePadded<T> {
    /// Pads and aligns a value to the length of a cache line.
    #[inline(always)]
    pub const fn new(value: T) -> Self {
        Self { value }
    }
}

impl<T> Deref for CachePadded<T> {
    type Target = T;

    #[inline(always)]
    fn deref(&self) -> &T {
        &self.value
    }
}

impl<T> DerefMut for CachePadded<T> {
    #[inline(always)]
    fn deref_mut(&mut self) -> &mut T {
        &mut self.value
    }
}

impl<T: fmt::Debug> fmt::Debug for CachePadded<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CachePadded")
            .field("value", &self.value)
            .finish()
    }
}
