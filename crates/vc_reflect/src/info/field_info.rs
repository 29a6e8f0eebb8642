use core::any::TypeId;

use crate::info::{Type, TypeInfo, Typed};

// -----------------------------------------------------------------------------
// NamedField

/// Information for a struct field.
///
/// Tuple struct fields are named by their index (`"0"`, `"1"`, ...).
///
/// # Examples
///
/// ```
/// use vc_reflect::{derive::Reflect, info::Typed};
///
/// #[derive(Reflect)]
/// struct Foo {
///     field_a: f32,
/// }
///
/// let info = Foo::type_info().as_struct().unwrap();
/// let field_info = info.field_at(0).unwrap();
///
/// assert!(field_info.type_is::<f32>());
/// assert_eq!(field_info.name(), "field_a");
/// assert_eq!(field_info.offset(), 0);
/// ```
#[derive(Clone, Debug)]
pub struct NamedField {
    ty: Type,
    name: &'static str,
    offset: usize,
    // `TypeInfo` is created on first access; using a function pointer delays it.
    type_info: fn() -> &'static TypeInfo,
}

impl NamedField {
    /// Creates a new [`NamedField`] for the given field `name` and type `T`,
    /// located `offset` bytes after the start of the struct.
    ///
    /// The offset should come from [`core::mem::offset_of!`]. It is checked
    /// against the layout of the owning struct by [`StructInfo::new`].
    ///
    /// [`StructInfo::new`]: crate::info::StructInfo::new
    #[inline]
    pub const fn new<T: Typed>(name: &'static str, offset: usize) -> Self {
        Self {
            ty: Type::of::<T>(),
            name,
            offset,
            type_info: T::type_info,
        }
    }

    /// Returns the [`Type`] of the field.
    #[inline(always)]
    pub const fn ty(&self) -> &Type {
        &self.ty
    }

    /// Returns the `TypeId`.
    #[inline]
    pub const fn ty_id(&self) -> TypeId {
        self.ty.id()
    }

    /// Check if the given type matches this one.
    #[inline]
    pub fn type_is<T: 'static>(&self) -> bool {
        self.ty.is::<T>()
    }

    /// Returns the field name.
    #[inline]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Returns the byte offset of the field inside its struct.
    #[inline]
    pub const fn offset(&self) -> usize {
        self.offset
    }

    /// Returns the field's [`TypeInfo`].
    #[inline]
    pub fn type_info(&self) -> &'static TypeInfo {
        (self.type_info)()
    }
}
