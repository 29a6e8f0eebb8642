//! A compiled, cached encoder for reflected values.
//!
//! The first time a type is encoded, its [`TypeInfo`](vc_reflect::info::TypeInfo)
//! is compiled into a [`Procedure`] that walks the value's memory directly
//! (field offsets, slice headers, map entries). The procedure is cached by
//! `TypeId`, so later calls skip all type analysis. Output buffers and map
//! cursors come from pools, a warm encode only allocates its result.
//!
//! ## Menu
//!
//! - [`encode`]: encodes with the process-wide [`Engine`].
//! - [`Engine`]: owns a [`ProcedureCache`], a [`Compiler`] and the pools.
//! - [`EngineConfig`]: pool sizes, buffer capacities and the nesting limit.
//! - [`Buffer`], [`pool`], [`cursor`]: the reusable pieces of the hot path.
//!
//! ## Output
//!
//! | Value                                 | Output       |
//! |---------------------------------------|--------------|
//! | `struct A { i: i32 }` with `i = 10`   | `{10}`       |
//! | `vec![5, 4, 3]`                       | `[5,4,3,]`   |
//! | `HashMap::from([("one", 1)])`         | `{"one":1,}` |
//! | `String::from("a\"b")`                | `"a\"b"`     |
//! | `None::<Vec<u8>>`, `None::<Box<T>>`   | `null`       |
//!
//! Struct fields are positional and unseparated. Map entries are
//! **unordered**: the order of a hash map can differ between calls, compare
//! map output as a set of entries.
//!
//! ## Examples
//!
//! ```
//! use vc_reflect::derive::Reflect;
//!
//! #[derive(Reflect)]
//! struct Item {
//!     id: u32,
//!     name: String,
//!     tags: Vec<&'static str>,
//! }
//!
//! let item = Item { id: 10, name: "a\"b".into(), tags: vec!["x"] };
//! let out = vc_encode::encode(&item).unwrap();
//! assert_eq!(out, br#"{10"a\"b"["x",]}"#);
//!
//! let err = vc_encode::encode(&1.5f64).unwrap_err();
//! assert!(matches!(err, vc_encode::EncodeError::Unsupported(_)));
//! ```
#![expect(unsafe_code, reason = "procedures read values through type-erased views.")]
#![cfg_attr(docsrs, feature(doc_cfg))]

extern crate alloc;

// -----------------------------------------------------------------------------
// Modules

mod buffer;
mod cache;
mod compiler;
mod config;
mod engine;
mod error;
mod procedure;

pub mod cursor;
pub mod pool;

// -----------------------------------------------------------------------------
// Top-Level exports

pub use buffer::Buffer;
pub use cache::ProcedureCache;
pub use compiler::{Compiler, CursorPool};
pub use config::EngineConfig;
pub use engine::Engine;
pub use error::{CompileError, ConfigError, EncodeError};
pub use procedure::Procedure;

use alloc::vec::Vec;

use vc_reflect::Reflect;

/// Encodes `value` with the process-wide [`Engine`].
///
/// See [`Engine::encode`].
#[inline]
pub fn encode(value: &dyn Reflect) -> Result<Vec<u8>, EncodeError> {
    Engine::global().encode(value)
}
