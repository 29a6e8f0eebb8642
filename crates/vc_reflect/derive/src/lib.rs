//! See following macros:
//!
//! - [`Reflect`]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![allow(clippy::std_instead_of_core, reason = "proc-macro lib")]
#![allow(clippy::std_instead_of_alloc, reason = "proc-macro lib")]

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

static REFLECT_ATTRIBUTE_NAME: &str = "reflect";

// -----------------------------------------------------------------------------
// Modules

mod derive_data;
mod impls;
mod path;

// -----------------------------------------------------------------------------
// Macros

/// # Reflection Derivation
///
/// `#[derive(Reflect)]` implements `Typed` for a struct, which in turn provides
/// `Reflect`. The generated `TypeInfo` is a `StructInfo` listing every field
/// in declaration order with its name, type and byte offset
/// (from [`core::mem::offset_of!`]).
///
/// - Named structs: fields are named after their identifiers (`r#` is stripped).
/// - Tuple structs: fields are named `"0"`, `"1"` ... .
/// - Unit structs: no field.
///
/// Enums, unions and `#[repr(packed)]` structs are rejected.
///
/// ## Generics
///
/// Every type parameter receives a `Typed` bound, and the type information is
/// stored in a `GenericTypeInfoCell` (one entry per instantiation).
/// Lifetime parameters are rejected, as `Typed` requires `'static`.
///
/// ```rust, ignore
/// #[derive(Reflect)]
/// struct Pair<T> {
///     left: T,
///     right: T,
/// }
/// ```
///
/// ## ignore
///
/// The `ignore` attribute removes a field from the type information,
/// as if it did not exist.
///
/// ```rust, ignore
/// #[derive(Reflect)]
/// struct A {
///     id: u32,
///     #[reflect(ignore)]
///     ratio: f32,
/// }
/// ```
///
/// This attribute can only be used on fields.
///
/// ## Crate path
///
/// The generated code names `vc_reflect` through the path found in the caller's
/// `Cargo.toml`: `::vc_reflect` when it is a direct dependency,
/// `::vc_marshal::reflect` when only the umbrella crate is.
#[proc_macro_derive(Reflect, attributes(reflect))]
pub fn derive_full_reflect(input: TokenStream) -> TokenStream {
    let ast = parse_macro_input!(input as DeriveInput);

    match derive_data::ReflectStruct::from_input(&ast) {
        Ok(reflect_struct) => impls::impl_trait_typed(&reflect_struct).into(),
        Err(err) => err.into_compile_error().into(),
    }
}
