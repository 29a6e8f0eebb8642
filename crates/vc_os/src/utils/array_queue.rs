//! Bounded MPMC queue following crossbeam-queue 0.3.
//!
//! See <https://docs.rs/crate/crossbeam-queue/latest>
#![expect(unsafe_code, reason = "slots are written and read through raw cells")]

use alloc::boxed::Box;
use core::cell::UnsafeCell;
use core::fmt;
use core::mem::{self, MaybeUninit};
use core::panic::{RefUnwindSafe, UnwindSafe};

use crate::sync::atomic::{self, AtomicUsize, Ordering};
use crate::utils::{Backoff, CachePadded};

// -----------------------------------------------------------------------------
// Slot

struct Slot<T> {
    /// `tail` when the slot is free for the next push,
    /// `head + 1` when it holds the next value to pop.
    stamp: AtomicUsize,
    value: UnsafeCell<MaybeUninit<T>>,
}

// -----------------------------------------------------------------------------
// ArrayQueue

/// A bounded multi-producer multi-consumer queue.
///
/// The slots are allocated once and never grow: pushing into a full queue
/// hands the value back. Object pools rely on that, a release into a full
/// pool drops the item.
///
/// `head` and `tail` are stamps, the low bits index a slot and the high bits
/// count laps around the buffer.
///
/// # Examples
///
/// ```
/// use vc_os::utils::ArrayQueue;
///
/// let q = ArrayQueue::new(2);
///
/// assert_eq!(q.push('a'), Ok(()));
/// assert_eq!(q.push('b'), Ok(()));
/// assert_eq!(q.push('c'), Err('c'));
/// assert_eq!(q.pop(), Some('a'));
/// assert_eq!(q.len(), 1);
/// ```
pub struct ArrayQueue<T> {
    head: CachePadded<AtomicUsize>,
    tail: CachePadded<AtomicUsize>,
    slots: Box<[Slot<T>]>,
    /// Stamp of `{ lap: 1, index: 0 }`, a power of two above the capacity.
    one_lap: usize,
}

// SAFETY: values move between threads through slots guarded by the stamps.
unsafe impl<T: Send> Sync for ArrayQueue<T> {}
// SAFETY: as above.
unsafe impl<T: Send> Send for ArrayQueue<T> {}
impl<T> UnwindSafe for ArrayQueue<T> {}
impl<T> RefUnwindSafe for ArrayQueue<T> {}

impl<T> ArrayQueue<T> {
    /// Creates a queue holding at most `cap` values.
    ///
    /// # Panics
    ///
    /// Panics if `cap` is zero.
    pub fn new(cap: usize) -> Self {
        assert!(cap > 0, "capacity must be non-zero");

        let slots = (0..cap)
            .map(|i| Slot {
                stamp: AtomicUsize::new(i),
                value: UnsafeCell::new(MaybeUninit::uninit()),
            })
            .collect();

        Self {
            head: CachePadded::new(AtomicUsize::new(0)),
            tail: CachePadded::new(AtomicUsize::new(0)),
            slots,
            one_lap: (cap + 1).next_power_of_two(),
        }
    }

    #[inline(always)]
    fn index(&self, stamp: usize) -> usize {
        stamp & (self.one_lap - 1)
    }

    /// The stamp following `stamp`, wrapping to the next lap at the end.
    #[inline(always)]
    fn advance(&self, stamp: usize) -> usize {
        if self.index(stamp) + 1 < self.slots.len() {
            stamp + 1
        } else {
            (stamp & !(self.one_lap - 1)).wrapping_add(self.one_lap)
        }
    }

    #[inline(always)]
    fn slot(&self, stamp: usize) -> &Slot<T> {
        let index = self.index(stamp);
        debug_assert!(index < self.slots.len());
        // SAFETY: `index` is below the capacity for every stamp in use.
        unsafe { self.slots.get_unchecked(index) }
    }

    /// Pushes `value`, or returns it if the queue is full.
    pub fn push(&self, value: T) -> Result<(), T> {
        let backoff = Backoff::new();
        let mut tail = self.tail.load(Ordering::Relaxed);

        loop {
            let slot = self.slot(tail);
            let stamp = slot.stamp.load(Ordering::Acquire);

            if stamp == tail {
                let next = self.advance(tail);
                match self.tail.compare_exchange_weak(
                    tail,
                    next,
                    Ordering::SeqCst,
                    Ordering::Relaxed,
                ) {
                    Ok(_) => {
                        // SAFETY: winning the exchange gives exclusive access to the free slot.
                        unsafe { slot.value.get().write(MaybeUninit::new(value)) };
                        slot.stamp.store(tail + 1, Ordering::Release);
                        return Ok(());
                    }
                    Err(current) => {
                        tail = current;
                        backoff.spin();
                    }
                }
            } else if stamp.wrapping_add(self.one_lap) == tail + 1 {
                atomic::fence(Ordering::SeqCst);
                // Slot still holds the previous lap's value.
                if self.head.load(Ordering::Relaxed).wrapping_add(self.one_lap) == tail {
                    return Err(value);
                }
                backoff.spin();
                tail = self.tail.load(Ordering::Relaxed);
            } else {
                // A pop moved the head but has not released the slot yet.
                backoff.snooze();
                tail = self.tail.load(Ordering::Relaxed);
            }
        }
    }

    /// Pops the oldest value, `None` if the queue is empty.
    pub fn pop(&self) -> Option<T> {
        let backoff = Backoff::new();
        let mut head = self.head.load(Ordering::Relaxed);

        loop {
            let slot = self.slot(head);
            let stamp = slot.stamp.load(Ordering::Acquire);

            if stamp == head + 1 {
                let next = self.advance(head);
                match self.head.compare_exchange_weak(
                    head,
                    next,
                    Ordering::SeqCst,
                    Ordering::Relaxed,
                ) {
                    Ok(_) => {
                        // SAFETY: the stamp says the slot was written, and winning
                        // the exchange makes this the only reader.
                        let value = unsafe { slot.value.get().read().assume_init() };
                        slot.stamp
                            .store(head.wrapping_add(self.one_lap), Ordering::Release);
                        return Some(value);
                    }
                    Err(current) => {
                        head = current;
                        backoff.spin();
                    }
                }
            } else if stamp == head {
                atomic::fence(Ordering::SeqCst);
                if self.tail.load(Ordering::Relaxed) == head {
                    return None;
                }
                backoff.spin();
                head = self.head.load(Ordering::Relaxed);
            } else {
                backoff.snooze();
                head = self.head.load(Ordering::Relaxed);
            }
        }
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.head.load(Ordering::SeqCst) == self.tail.load(Ordering::SeqCst)
    }

    /// Returns the number of values, a snapshot under concurrent use.
    pub fn len(&self) -> usize {
        loop {
            let tail = self.tail.load(Ordering::SeqCst);
            let head = self.head.load(Ordering::SeqCst);
            if self.tail.load(Ordering::SeqCst) == tail {
                return self.len_between(head, tail);
            }
        }
    }

    fn len_between(&self, head: usize, tail: usize) -> usize {
        let (hix, tix) = (self.index(head), self.index(tail));
        match hix.cmp(&tix) {
            core::cmp::Ordering::Less => tix - hix,
            core::cmp::Ordering::Greater => self.capacity() - hix + tix,
            core::cmp::Ordering::Equal if head == tail => 0,
            core::cmp::Ordering::Equal => self.capacity(),
        }
    }
}

impl<T> Drop for ArrayQueue<T> {
    fn drop(&mut self) {
        if !mem::needs_drop::<T>() {
            return;
        }

        let head = *self.head.get_mut();
        let tail = *self.tail.get_mut();
        let first = self.index(head);

        for i in 0..self.len_between(head, tail) {
            let index = (first + i) % self.capacity();
            // SAFETY: slots between head and tail hold initialized values.
            unsafe { self.slots[index].value.get_mut().assume_init_drop() };
        }
    }
}

impl<T> fmt::Debug for ArrayQueue<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArrayQueue")
            .field("len", &self.len())
            .field("capacity", &self.capacity())
            .finish()
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::thread::scope;

    use super::ArrayQueue;

    #[test]
    fn wraps_around_laps() {
        let q = ArrayQueue::new(2);

        for round in 0..5 {
            assert_eq!(q.push(round), Ok(()));
            assert_eq!(q.push(round + 10), Ok(()));
            assert_eq!(q.push(99), Err(99));
            assert_eq!(q.len(), 2);

            assert_eq!(q.pop(), Some(round));
            assert_eq!(q.pop(), Some(round + 10));
            assert!(q.pop().is_none());
            assert!(q.is_empty());
        }
    }

    #[test]
    fn drop_releases_remaining_values() {
        let counter = Arc::new(());
        {
            let q = ArrayQueue::new(4);
            for _ in 0..3 {
                q.push(Arc::clone(&counter)).unwrap();
            }
            q.pop();
            assert_eq!(Arc::strong_count(&counter), 3);
        }
        assert_eq!(Arc::strong_count(&counter), 1);
    }

    #[test]
    fn every_value_popped_once_per_producer() {
        const COUNT: usize = if cfg!(miri) { 50 } else { 20_000 };
        const THREADS: usize = 4;

        let q = ArrayQueue::<usize>::new(3);
        let hits = (0..COUNT).map(|_| AtomicUsize::new(0)).collect::<Vec<_>>();

        scope(|s| {
            for _ in 0..THREADS {
                s.spawn(|| {
                    for _ in 0..COUNT {
                        let n = loop {
                            if let Some(n) = q.pop() {
                                break n;
                            }
                        };
                        hits[n].fetch_add(1, Ordering::Relaxed);
                    }
                });
                s.spawn(|| {
                    for i in 0..COUNT {
                        while q.push(i).is_err() {}
                    }
                });
            }
        });

        assert!(hits.iter().all(|c| c.load(Ordering::Relaxed) == THREADS));
    }
}
