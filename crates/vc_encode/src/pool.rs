//! Bounded object pools.
//!
//! A [`Pool`] keeps up to `capacity` idle items in a lock-free [`ArrayQueue`].
//! [`Pool::acquire`] pops one (or creates a fresh one when the pool is empty)
//! and wraps it in a [`Pooled`] guard, the item goes back when the guard
//! drops. How items are created and reset is decided by a [`Recycle`] policy.
//!
//! ```
//! use vc_encode::{Buffer, pool::{BufferRecycle, Pool}};
//!
//! let pool: Pool<Buffer, _> = Pool::new(4, BufferRecycle::new(64, 1024));
//!
//! {
//!     let mut buf = pool.acquire();
//!     buf.extend(b"hello");
//! } // released here
//!
//! assert_eq!(pool.idle(), 1);
//! assert!(pool.acquire().is_empty());
//! ```

use core::fmt;
use core::mem::ManuallyDrop;
use core::ops::{Deref, DerefMut};

use vc_os::utils::ArrayQueue;

use crate::buffer::Buffer;

// -----------------------------------------------------------------------------
// Recycle

/// Creation and reset policy of pooled items.
pub trait Recycle<T>: Send + Sync {
    /// Creates a new item for an empty pool.
    fn create(&self) -> T;

    /// Resets `item` before it returns to the pool.
    ///
    /// Returns `false` when the item should be dropped instead.
    fn recycle(&self, item: &mut T) -> bool;
}

/// Policy of the output buffer pool.
///
/// Buffers start with `initial_capacity` and are not pooled again once they
/// grew past `max_capacity`, a single huge value does not pin its memory.
#[derive(Debug, Clone, Copy)]
pub struct BufferRecycle {
    initial_capacity: usize,
    max_capacity: usize,
}

impl BufferRecycle {
    #[inline]
    pub const fn new(initial_capacity: usize, max_capacity: usize) -> Self {
        Self {
            initial_capacity,
            max_capacity,
        }
    }
}

impl Recycle<Buffer> for BufferRecycle {
    #[inline]
    fn create(&self) -> Buffer {
        Buffer::with_capacity(self.initial_capacity)
    }

    #[inline]
    fn recycle(&self, item: &mut Buffer) -> bool {
        item.clear();
        item.capacity() <= self.max_capacity
    }
}

// -----------------------------------------------------------------------------
// Pool

/// A bounded, thread-safe pool of reusable items.
pub struct Pool<T, R> {
    queue: ArrayQueue<T>,
    recycle: R,
}

impl<T, R: Recycle<T>> Pool<T, R> {
    /// Creates an empty pool that keeps at most `capacity` idle items.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero.
    pub fn new(capacity: usize, recycle: R) -> Self {
        Self {
            queue: ArrayQueue::new(capacity),
            recycle,
        }
    }

    /// Takes an idle item, or creates one if none is idle.
    ///
    /// The item is private to the returned guard until the guard drops.
    #[inline]
    pub fn acquire(&self) -> Pooled<'_, T, R> {
        let item = self.queue.pop().unwrap_or_else(|| self.recycle.create());
        Pooled {
            item: ManuallyDrop::new(item),
            pool: self,
        }
    }

    fn release(&self, mut item: T) {
        if self.recycle.recycle(&mut item) {
            // A full pool drops the item.
            let _ = self.queue.push(item);
        }
    }

    /// Returns the number of idle items.
    #[inline]
    pub fn idle(&self) -> usize {
        self.queue.len()
    }

    /// Returns the maximum number of idle items.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.queue.capacity()
    }
}

impl<T, R: fmt::Debug> fmt::Debug for Pool<T, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pool")
            .field("idle", &self.queue.len())
            .field("capacity", &self.queue.capacity())
            .field("recycle", &self.recycle)
            .finish()
    }
}

// -----------------------------------------------------------------------------
// Pooled

/// Exclusive access to a pooled item, released exactly once on drop.
pub struct Pooled<'a, T, R: Recycle<T>> {
    item: ManuallyDrop<T>,
    pool: &'a Pool<T, R>,
}

impl<T, R: Recycle<T>> Deref for Pooled<'_, T, R> {
    type Target = T;

    #[inline]
    fn deref(&self) -> &T {
        &self.item
    }
}

impl<T, R: Recycle<T>> DerefMut for Pooled<'_, T, R> {
    #[inline]
    fn deref_mut(&mut self) -> &mut T {
        &mut self.item
    }
}

impl<T, R: Recycle<T>> Drop for Pooled<'_, T, R> {
    fn drop(&mut self) {
        // SAFETY: `item` is never touched again after this point.
        let item = unsafe { ManuallyDrop::take(&mut self.item) };
        self.pool.release(item);
    }
}

impl<T: fmt::Debug, R: Recycle<T>> fmt::Debug for Pooled<'_, T, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&*self.item, f)
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use std::thread;

    use super::{BufferRecycle, Pool};
    use crate::buffer::Buffer;

    type Buffers = Pool<Buffer, BufferRecycle>;

    #[test]
    fn reuses_released_buffers() {
        let pool = Buffers::new(2, BufferRecycle::new(16, 1024));

        let cap = {
            let mut buf = pool.acquire();
            buf.extend(&[7; 100]);
            buf.capacity()
        };

        let buf = pool.acquire();
        assert!(buf.is_empty());
        assert_eq!(buf.capacity(), cap);
    }

    #[test]
    fn drops_oversized_buffers() {
        let pool = Buffers::new(2, BufferRecycle::new(16, 32));
        pool.acquire().extend(&[0; 64]);
        assert_eq!(pool.idle(), 0);

        pool.acquire().extend(&[0; 8]);
        assert_eq!(pool.idle(), 1);
    }

    #[test]
    fn full_pool_drops_extra_items() {
        let pool = Buffers::new(1, BufferRecycle::new(4, 64));
        let a = pool.acquire();
        let b = pool.acquire();
        drop(a);
        drop(b);
        assert_eq!(pool.idle(), 1);
        assert_eq!(pool.capacity(), 1);
    }

    #[test]
    fn released_on_panic() {
        let pool = Buffers::new(1, BufferRecycle::new(4, 64));
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let mut buf = pool.acquire();
            buf.push(b'x');
            panic!("boom");
        }));
        assert!(result.is_err());
        assert_eq!(pool.idle(), 1);
        assert!(pool.acquire().is_empty());
    }

    #[test]
    fn concurrent_acquire_release() {
        let pool = Buffers::new(4, BufferRecycle::new(8, 1024));

        thread::scope(|s| {
            for t in 0..8u8 {
                let pool = &pool;
                s.spawn(move || {
                    for _ in 0..200 {
                        let mut buf = pool.acquire();
                        assert!(buf.is_empty());
                        buf.extend(&[t; 8]);
                        assert!(buf.as_bytes().iter().all(|&b| b == t));
                    }
                });
            }
        });

        assert!(pool.idle() <= 4);
    }
}
