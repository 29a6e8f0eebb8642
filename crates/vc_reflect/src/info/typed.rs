use crate::info::TypeInfo;

// -----------------------------------------------------------------------------
// Typed

/// Types that can describe themselves without an instance.
///
/// `#[derive(Reflect)]` implements it for structs, and [`impls`](crate::impls)
/// covers integers, strings, lists, maps and owning pointers from std.
///
/// ```
/// use vc_reflect::{derive::Reflect, info::{Typed, TypeInfo}};
///
/// #[derive(Reflect)]
/// struct A{ /* ... */ }
///
/// let info: &'static TypeInfo = <A as Typed>::type_info();
/// ```
///
/// # Safety
///
/// The encoder reads values through the returned descriptor without any
/// further check, so an implementation must describe `Self` truthfully:
///
/// - The descriptor's [`Type`](crate::info::Type) is the one of `Self`, its
///   info is built with `Self` as the type parameter (`StructInfo::new::<Self>`,
///   `MapInfo::new::<Self>` ...).
/// - Every [`NamedField`](crate::info::NamedField) of a struct is a real field
///   of `Self`, of the declared type, at the offset given by `offset_of!`.
///
/// `#[derive(Reflect)]` upholds both.
///
/// # Manual impls
///
/// The descriptor is built once and stored in a static cell:
/// [`NonGenericTypeInfoCell`] for plain types, [`GenericTypeInfoCell`] when
/// the `static` is shared by every instantiation of a generic type. Field
/// offsets come from [`offset_of!`](core::mem::offset_of).
///
/// For non-generic type:
///
/// ```
/// use core::mem::offset_of;
/// use vc_reflect::{
///     info::{Typed, TypeInfo, StructInfo, NamedField},
///     impls::NonGenericTypeInfoCell
/// };
///
/// struct NonGenericStruct {
///   foo: usize,
///   bar: String,
/// }
///
/// // SAFETY: `Self` is described, with the offsets of its own fields.
/// unsafe impl Typed for NonGenericStruct {
///     fn type_info() -> &'static TypeInfo {
///         static CELL: NonGenericTypeInfoCell = NonGenericTypeInfoCell::new();
///         CELL.get_or_init(|| TypeInfo::Struct(
///             StructInfo::new::<Self>(&[
///                 NamedField::new::<usize>("foo", offset_of!(Self, foo)),
///                 NamedField::new::<String>("bar", offset_of!(Self, bar)),
///             ])
///         ))
///     }
/// }
/// ```
///
/// For generic types:
///
/// ```
/// use core::mem::offset_of;
/// use vc_reflect::{
///     info::{Typed, TypeInfo, StructInfo, NamedField},
///     impls::GenericTypeInfoCell
/// };
///
/// struct GenericTupleStruct<T>(T);
///
/// // SAFETY: as above.
/// unsafe impl<T: Typed> Typed for GenericTupleStruct<T> {
///     fn type_info() -> &'static TypeInfo {
///         static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
///         CELL.get_or_insert::<Self>(|| TypeInfo::Struct(
///             StructInfo::new::<Self>(&[
///                 NamedField::new::<T>("0", offset_of!(Self, 0)),
///             ])
///         ))
///     }
/// }
/// ```
///
/// [`NonGenericTypeInfoCell`]: crate::impls::NonGenericTypeInfoCell
/// [`GenericTypeInfoCell`]: crate::impls::GenericTypeInfoCell
pub unsafe trait Typed: 'static {
    /// Returns the descriptor of `Self`, the same reference on every call.
    ///
    /// Use [`Reflect::reflect_type_info`](crate::Reflect::reflect_type_info)
    /// for dynamic dispatch.
    fn type_info() -> &'static TypeInfo;
}
