//! Compile-time reflection for the encoder.
//!
//! Rust has no runtime type introspection, so every type that can be encoded
//! describes itself once through [`Typed`](info::Typed). The description is a
//! [`TypeInfo`](info::TypeInfo): its kind, its identity (`TypeId`), and the raw
//! accessors the encoder needs (field offsets, slice headers, map entries).
//!
//! ## Menu
//!
//! - [`info`]: type descriptors and the [`Typed`](info::Typed) trait.
//! - [`ops`]: the small traits container types implement to be described.
//! - [`impls`]: descriptors for std types and the static cells used to store them.
//! - [`Reflect`]: object-safe access to the descriptor and memory of a value.
//! - [`derive::Reflect`]: `#[derive(Reflect)]` for structs.
//!
//! ## Examples
//!
//! ```
//! use vc_reflect::{derive::Reflect, info::ReflectKind, type_and_ptr_of};
//!
//! #[derive(Reflect)]
//! struct Point {
//!     x: i32,
//!     y: i32,
//! }
//!
//! let p = Point { x: 1, y: 2 };
//! let (info, _ptr) = type_and_ptr_of(&p);
//!
//! assert_eq!(info.kind(), ReflectKind::Struct);
//! assert_eq!(info.as_struct().unwrap().field_len(), 2);
//! ```
//!
//! Packed structs cannot be derived, their fields may be unaligned:
//!
//! ```compile_fail
//! use vc_reflect::derive::Reflect;
//!
//! #[derive(Reflect)]
//! #[repr(C, packed)]
//! struct Packed {
//!     a: u8,
//!     b: u32,
//! }
//! ```
#![expect(unsafe_code, reason = "reading through type-erased views is unsafe.")]
#![cfg_attr(docsrs, feature(doc_cfg))]

// -----------------------------------------------------------------------------
// Extern Self

// Usually, we need to use `crate` in the crate itself and use `vc_reflect` in doc testing.
// But `macro_utils::Manifest` can only choose one, so we must have an
// `extern self` to ensure `vc_reflect` can be used as an alias for `crate`.
extern crate self as vc_reflect;

extern crate alloc;

// -----------------------------------------------------------------------------
// Modules

mod reflection;

pub mod impls;
pub mod info;
pub mod ops;

// -----------------------------------------------------------------------------
// Top-Level exports

pub use reflection::{Reflect, type_and_ptr_of, type_id_of};
pub use vc_reflect_derive as derive;
