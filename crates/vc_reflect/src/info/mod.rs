//! Provide compile-time type infomation implementations.
//!
//! ## Menu
//!
//! - [`Type`]: A `TypeId` plus the type's name, size and alignment.
//!   The `TypeId` is the identity used as a cache key by the encoder.
//!
//! - [`TypeInfo`]: A enum representing compile-time type infomations, the inner is one of following:
//!     - [`StructInfo`]: For struct (e.g. `A{..}`, `A(..)`, `A`) infomation, fields in declaration order.
//!     - [`ListInfo`]: For contiguous lists (e.g. `Vec<T>`, `[T; N]`), item type and slice header accessor.
//!     - [`MapInfo`]: For map-like (e.g. `HashMap<K, V>`) infomation, key/value types and an entry visitor.
//!     - [`IntInfo`]: For fixed width integers, see [`IntRepr`].
//!     - [`StringInfo`]: For `String` and `&'static str`.
//!     - [`PointerInfo`]: For owning pointers (e.g. `Box<T>`, `Option<Box<T>>`), the indirect kind.
//!     - [`OpaqueInfo`]: For types without any inner structure exposed (e.g. `bool`, `f64`).
//!
//! - [`NamedField`]: A struct field, including name, byte offset and field type info.
//!
//! - [`ReflectKind`]: representing reflect type kind, for example `Struct`, `List`, `Opaque` .
//!
//! - [`Typed`]: A trait for obtaining `TypeInfo` data.

// -----------------------------------------------------------------------------
// Modules

mod field_info;
mod int_info;
mod list_info;
mod map_info;
mod opaque_info;
mod pointer_info;
mod string_info;
mod struct_info;
mod ty;
mod type_info;
mod typed;

// -----------------------------------------------------------------------------
// Internal API

pub(crate) use ty::impl_type_fn;

// -----------------------------------------------------------------------------
// Exports

pub use field_info::NamedField;
pub use int_info::{IntInfo, IntRepr};
pub use list_info::{ListInfo, SliceHeader};
pub use map_info::MapInfo;
pub use opaque_info::OpaqueInfo;
pub use pointer_info::PointerInfo;
pub use string_info::StringInfo;
pub use struct_info::StructInfo;
pub use ty::Type;
pub use type_info::{ReflectKind, ReflectKindError, TypeInfo};
pub use typed::Typed;
