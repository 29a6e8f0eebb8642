//! Platform utilities shared by the encoder crates.
//!
//! - [`sync`]: the synchronization primitives used across the workspace.
//! - [`utils`]: lock-free building blocks, mainly the bounded [`ArrayQueue`]
//!   that backs every object pool.
//!
//! [`ArrayQueue`]: utils::ArrayQueue
#![cfg_attr(docsrs, feature(doc_cfg))]

extern crate alloc;

// -----------------------------------------------------------------------------
// Modules

pub mod sync;
pub mod utils;
