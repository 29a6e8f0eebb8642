//! Exponential backoff in the manner of crossbeam-utils 0.8.
//!
//! See <https://docs.rs/crate/crossbeam-utils/latest>

use core::cell::Cell;
use core::fmt;

/// Steps after which `snooze` yields the thread instead of spinning.
const YIELD_AFTER: u32 = 5;

/// Exponential backoff for the retry loops of [`ArrayQueue`](super::ArrayQueue).
///
/// Step `n` spins about `2^n` times, capped at step [`YIELD_AFTER`].
#[derive(Default)]
pub struct Backoff {
    step: Cell<u32>,
}

impl Backoff {
    #[inline(always)]
    pub const fn new() -> Self {
        Self { step: Cell::new(0) }
    }

    /// Waits a little after losing a race to another thread.
    #[inline(always)]
    pub fn spin(&self) {
        let step = self.step.get();
        (0..1u32 << step).for_each(|_| core::hint::spin_loop());
        self.step.set((step + 1).min(YIELD_AFTER));
    }

    /// Waits for another thread to finish a half-done operation.
    ///
    /// Spins longer than [`spin`](Self::spin), then gives the time slice back
    /// to the scheduler once the step limit is reached.
    #[inline]
    pub fn snooze(&self) {
        let step = self.step.get();
        if step >= YIELD_AFTER {
            std::thread::yield_now();
            return;
        }
        (0..1u32 << (2 * step)).for_each(|_| core::hint::spin_loop());
        self.step.set(step + 1);
    }
}

impl fmt::Debug for Backoff {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Backoff")
            .field("step", &self.step.get())
            .finish()
    }
}
