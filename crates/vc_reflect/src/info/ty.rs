use core::any::TypeId;
use core::fmt;

// -----------------------------------------------------------------------------
// Type

/// The base representation of a Rust type.
///
/// Includes a [`TypeId`], the type name and the memory layout.
///
/// Two `Type`s compare equal if and only if their `TypeId`s are equal,
/// so the `TypeId` is the identity token of a type.
///
/// # Examples
///
/// ```
/// # use core::any::TypeId;
/// use vc_reflect::info::Type;
///
/// let ty = Type::of::<String>();
///
/// assert!(ty.is::<String>());
/// assert_eq!(ty.id(), TypeId::of::<String>());
/// assert_eq!(ty.size(), size_of::<String>());
/// assert_eq!(ty.path(), "alloc::string::String");
/// ```
#[derive(Copy, Clone)]
pub struct Type {
    type_id: TypeId,
    type_path: fn() -> &'static str,
    size: usize,
    align: usize,
}

impl Type {
    /// Creates a new [`Type`] from a sized `'static` type.
    #[inline]
    pub const fn of<T: 'static>() -> Self {
        Self {
            type_id: TypeId::of::<T>(),
            type_path: core::any::type_name::<T>,
            size: size_of::<T>(),
            align: align_of::<T>(),
        }
    }

    /// Returns the [`TypeId`] of the type.
    #[inline(always)]
    pub const fn id(&self) -> TypeId {
        self.type_id
    }

    /// Check if the given type matches this one.
    #[inline]
    pub fn is<T: 'static>(&self) -> bool {
        self.type_id == TypeId::of::<T>()
    }

    /// Returns the full type path, as reported by [`core::any::type_name`].
    ///
    /// Only intended for diagnostics, the text is not guaranteed to be stable
    /// across compiler versions.
    #[inline]
    pub fn path(&self) -> &'static str {
        (self.type_path)()
    }

    /// Returns `size_of::<T>()`.
    #[inline(always)]
    pub const fn size(&self) -> usize {
        self.size
    }

    /// Returns `align_of::<T>()`.
    #[inline(always)]
    pub const fn align(&self) -> usize {
        self.align
    }
}

impl PartialEq for Type {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.type_id == other.type_id
    }
}

impl Eq for Type {}

impl fmt::Debug for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Type")
            .field("type_path", &self.path())
            .field("size", &self.size)
            .field("align", &self.align)
            .finish()
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.path())
    }
}

// -----------------------------------------------------------------------------
// impl_type_fn

/// Implement the `Type` accessors for an info struct holding a `ty` field.
macro_rules! impl_type_fn {
    ($field:ident) => {
        /// Returns the underlying `Type`.
        #[inline(always)]
        pub const fn ty(&self) -> &$crate::info::Type {
            &self.$field
        }

        /// Returns the `TypeId`.
        #[inline]
        pub const fn type_id(&self) -> ::core::any::TypeId {
            self.$field.id()
        }

        /// Check if the given type matches this one.
        #[inline]
        pub fn type_is<T: 'static>(&self) -> bool {
            self.$field.is::<T>()
        }

        /// Returns the type path.
        #[inline]
        pub fn type_path(&self) -> &'static str {
            self.$field.path()
        }
    };
}

pub(crate) use impl_type_fn;

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::Type;

    #[test]
    fn identity_is_type_id() {
        assert_eq!(Type::of::<u32>(), Type::of::<u32>());
        assert_ne!(Type::of::<u32>(), Type::of::<i32>());
        assert_eq!(Type::of::<u32>().align(), align_of::<u32>());
        assert_eq!(alloc::format!("{}", Type::of::<u8>()), "u8");
    }
}
