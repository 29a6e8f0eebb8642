use core::fmt;

use crate::info::{Type, impl_type_fn};

// -----------------------------------------------------------------------------
// IntRepr

/// The in-memory representation of a primitive integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IntRepr {
    I8,
    I16,
    I32,
    I64,
    I128,
    Isize,
    U8,
    U16,
    U32,
    U64,
    U128,
    Usize,
}

impl IntRepr {
    /// Returns the width in bytes.
    pub const fn size(self) -> usize {
        match self {
            Self::I8 | Self::U8 => 1,
            Self::I16 | Self::U16 => 2,
            Self::I32 | Self::U32 => 4,
            Self::I64 | Self::U64 => 8,
            Self::I128 | Self::U128 => 16,
            Self::Isize | Self::Usize => size_of::<usize>(),
        }
    }

    /// Returns `true` for the signed representations.
    pub const fn is_signed(self) -> bool {
        matches!(
            self,
            Self::I8 | Self::I16 | Self::I32 | Self::I64 | Self::I128 | Self::Isize
        )
    }
}

impl fmt::Display for IntRepr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::I8 => "i8",
            Self::I16 => "i16",
            Self::I32 => "i32",
            Self::I64 => "i64",
            Self::I128 => "i128",
            Self::Isize => "isize",
            Self::U8 => "u8",
            Self::U16 => "u16",
            Self::U32 => "u32",
            Self::U64 => "u64",
            Self::U128 => "u128",
            Self::Usize => "usize",
        };
        f.pad(name)
    }
}

// -----------------------------------------------------------------------------
// IntInfo

/// Compile-time info of a primitive integer type.
///
/// # Examples
///
/// ```
/// use vc_reflect::info::{IntRepr, Typed};
///
/// let info = <u16 as Typed>::type_info().as_int().unwrap();
/// assert_eq!(info.repr(), IntRepr::U16);
/// assert!(!info.repr().is_signed());
/// ```
#[derive(Debug, Clone)]
pub struct IntInfo {
    ty: Type,
    repr: IntRepr,
}

impl IntInfo {
    impl_type_fn!(ty);

    /// Create a new [`IntInfo`].
    ///
    /// `repr` must describe `T` exactly, procedures read `repr.size()` bytes.
    #[inline]
    pub const fn new<T: 'static>(repr: IntRepr) -> Self {
        debug_assert!(repr.size() == size_of::<T>());
        Self {
            ty: Type::of::<T>(),
            repr,
        }
    }

    /// Returns the integer representation.
    #[inline]
    pub const fn repr(&self) -> IntRepr {
        self.repr
    }
}
