//! Useful synchronization primitives.
//!
//! Re-exports the standard library's lock types together with
//! [`atomic`], so dependent crates take every primitive from one place.
//!
//! See the [standard library] for further details.
//!
//! [standard library]: https://doc.rust-lang.org/std/sync/index.html

// -----------------------------------------------------------------------------
// Modules

pub mod atomic;

// -----------------------------------------------------------------------------
// Exports

pub use alloc::sync::{Arc, Weak};

pub use std::sync::{LazyLock, OnceLock, PoisonError, RwLock};
