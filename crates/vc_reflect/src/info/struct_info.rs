use alloc::boxed::Box;

use crate::info::{NamedField, Type, Typed, impl_type_fn};

/// A container for compile-time struct info.
///
/// Named structs, tuple structs and unit structs share this info,
/// tuple struct fields are named `"0"`, `"1"` ... .
///
/// # Examples
///
/// ```rust
/// use vc_reflect::{derive::Reflect, info::Typed};
///
/// #[derive(Reflect)]
/// struct A {
///     val: f32,
///     name: String,
/// }
///
/// let info = <A as Typed>::type_info().as_struct().unwrap();
///
/// assert_eq!(info.field_len(), 2);
/// assert_eq!(info.index_of("name"), Some(1));
/// ```
#[derive(Clone, Debug)]
pub struct StructInfo {
    ty: Type,
    fields: Box<[NamedField]>,
}

impl StructInfo {
    impl_type_fn!(ty);

    /// Create a new [`StructInfo`].
    ///
    /// The order of internal fields is fixed, depends on the input order.
    ///
    /// # Panics
    ///
    /// Panics if a field does not fit inside `T`, or if its offset would not
    /// be aligned for the field type in every `T` (for example a field of a
    /// `#[repr(packed)]` struct).
    pub fn new<T: Typed>(fields: &[NamedField]) -> Self {
        let ty = Type::of::<T>();
        for field in fields {
            check_layout(&ty, field);
        }

        Self {
            ty,
            fields: fields.into(),
        }
    }

    /// Returns the [`NamedField`] for the given `name`, if present.
    ///
    /// This is O(N) complexity.
    pub fn field(&self, name: &str) -> Option<&NamedField> {
        self.fields.iter().find(|field| field.name() == name)
    }

    /// Returns the [`NamedField`] at the given index, if present.
    #[inline]
    pub fn field_at(&self, index: usize) -> Option<&NamedField> {
        self.fields.get(index)
    }

    /// Returns an iterator over the fields in **declaration order**.
    #[inline]
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &NamedField> {
        self.fields.iter()
    }

    /// Returns the index for the given field `name`, if present.
    ///
    /// This is O(N) complexity.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|field| field.name() == name)
    }

    /// Returns the number of fields.
    #[inline]
    pub fn field_len(&self) -> usize {
        self.fields.len()
    }
}

fn check_layout(ty: &Type, field: &NamedField) {
    let field_ty = field.ty();
    let in_bounds = field
        .offset()
        .checked_add(field_ty.size())
        .is_some_and(|end| end <= ty.size());
    assert!(
        in_bounds,
        "field `{}` of `{}` ({} bytes at offset {}) exceeds the {} bytes of the struct",
        field.name(),
        ty.path(),
        field_ty.size(),
        field.offset(),
        ty.size(),
    );

    let aligned = field_ty.align() <= ty.align() && field.offset() % field_ty.align() == 0;
    assert!(
        aligned,
        "field `{}` of `{}` at offset {} is not aligned to {} bytes",
        field.name(),
        ty.path(),
        field.offset(),
        field_ty.align(),
    );
}

// -----------------------------------------------------------------------------
// Tests
