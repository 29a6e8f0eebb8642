//! Low-level concurrent building blocks built on atomic operations.
//!
//! - [`ArrayQueue`] : A bounded MPMC queue (from crossbeam-queue) using a fixed-size
//!   circular array. Object pools park their idle items in it.
//! - [`Backoff`] : Exponential backoff for spin loops.
//! - [`CachePadded`] : Pads a value to the cache line size to avoid false sharing.

// -----------------------------------------------------------------------------
// Modules

mod array_queue;
mod backoff;
mod cache_padded;

// -----------------------------------------------------------------------------
// Exports

pub use array_queue::ArrayQueue;
pub use backoff::Backoff;
pub use cache_padded::CachePadded;
