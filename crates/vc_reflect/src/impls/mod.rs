//! Provide some utilities for implementing reflection traits.
//!
//! - [`NonGenericTypeInfoCell`]: Used to implement [`Typed`] for non-generic types.
//! - [`GenericTypeInfoCell`]: Used to implement [`Typed`] for generic types.
//!
//! ## Implemented Menu
//!
//! - native:
//!     - `i8`-`i128`, `u8`-`u128`, `isize`, `usize` (Int)
//!     - `&'static str` (String)
//!     - `[T; N]` (List)
//!     - `bool`, `char`, `f32`, `f64`, `()`, `fn() -> R`, `fn(A) -> R` (Opaque)
//! - core:
//!     - `Option<Vec<T>>` (List, `None` is the null list)
//!     - `Option<Box<T>>` (Pointer, `None` is the null pointer)
//! - alloc:
//!     - `String` (String), `Vec<T>` (List), `Box<T>` (Pointer)
//!     - `BTreeMap<K, V>` (Map)
//! - std:
//!     - `HashMap<K, V, S>` (Map)
//! - vc_utils:
//!     - `hashbrown::HashMap<K, V, S>`, so also `vc_utils::hash::HashMap` (Map)
//!
//! [`Typed`]: crate::info::Typed

// -----------------------------------------------------------------------------
// Modules

mod cell;
mod utils;

mod alloc;
mod core;
mod native;
mod std;
mod vc_utils;

// -----------------------------------------------------------------------------
// Exports

pub use cell::{GenericTypeInfoCell, NonGenericTypeInfoCell};
