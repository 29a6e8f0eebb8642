use core::any::TypeId;
use core::{error, fmt};

use crate::info::{IntInfo, ListInfo, MapInfo, OpaqueInfo};
use crate::info::{PointerInfo, StringInfo, StructInfo, Type};

// -----------------------------------------------------------------------------
// ReflectKind

/// An enumeration of the "kinds" of a reflected type.
///
/// The set is closed: a new kind means a new [`TypeInfo`] variant and a new
/// arm in every exhaustive `match` over it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReflectKind {
    Struct,
    List,
    Map,
    Int,
    String,
    Pointer,
    Opaque,
}

impl fmt::Display for ReflectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Struct => f.pad("Struct"),
            Self::List => f.pad("List"),
            Self::Map => f.pad("Map"),
            Self::Int => f.pad("Int"),
            Self::String => f.pad("String"),
            Self::Pointer => f.pad("Pointer"),
            Self::Opaque => f.pad("Opaque"),
        }
    }
}

/// Error returned when a `TypeInfo` value is not the expected `ReflectKind`.
#[derive(Debug)]
pub struct ReflectKindError {
    pub expected: ReflectKind,
    pub received: ReflectKind,
}

impl fmt::Display for ReflectKindError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "reflect kind mismatch: expected {}, received {}",
            self.expected, self.received
        )
    }
}

impl error::Error for ReflectKindError {}

// -----------------------------------------------------------------------------
// TypeInfo

/// Compile-time type information for various reflected types.
///
/// A `TypeInfo` is immutable and lives for the whole program once created.
/// It describes the *shape* of a type, never a particular value, so everything
/// derived from it (such as a compiled encoder) only depends on the type.
///
/// # Obtain
///
/// - [`Typed::type_info`] when the type is known at compile time.
/// - [`Reflect::reflect_type_info`] from a `&dyn Reflect`.
///
/// [`Typed::type_info`]: crate::info::Typed::type_info
/// [`Reflect::reflect_type_info`]: crate::Reflect::reflect_type_info
///
/// # Examples
///
/// ```
/// use vc_reflect::info::{ReflectKind, Typed};
///
/// let info = <Vec<u8> as Typed>::type_info();
/// assert_eq!(info.kind(), ReflectKind::List);
/// assert!(info.as_map().is_err());
/// ```
#[derive(Debug, Clone)]
pub enum TypeInfo {
    Struct(StructInfo),
    List(ListInfo),
    Map(MapInfo),
    Int(IntInfo),
    String(StringInfo),
    Pointer(PointerInfo),
    Opaque(OpaqueInfo),
}

// Helper macro that implements type-safe accessor methods like `as_struct`.
macro_rules! impl_cast_method {
    ($name:ident : $kind:ident => $info:ident) => {
        /// Convert [`TypeInfo`] to specific type information.
        pub const fn $name(&self) -> Result<&$info, ReflectKindError> {
            match self {
                Self::$kind(info) => Ok(info),
                _ => Err(ReflectKindError {
                    expected: ReflectKind::$kind,
                    received: self.kind(),
                }),
            }
        }
    };
}

impl TypeInfo {
    impl_cast_method!(as_struct: Struct => StructInfo);
    impl_cast_method!(as_list: List => ListInfo);
    impl_cast_method!(as_map: Map => MapInfo);
    impl_cast_method!(as_int: Int => IntInfo);
    impl_cast_method!(as_string: String => StringInfo);
    impl_cast_method!(as_pointer: Pointer => PointerInfo);
    impl_cast_method!(as_opaque: Opaque => OpaqueInfo);

    /// Returns the underlying [`Type`] metadata for this `TypeInfo`.
    pub const fn ty(&self) -> &Type {
        match self {
            Self::Struct(info) => info.ty(),
            Self::List(info) => info.ty(),
            Self::Map(info) => info.ty(),
            Self::Int(info) => info.ty(),
            Self::String(info) => info.ty(),
            Self::Pointer(info) => info.ty(),
            Self::Opaque(info) => info.ty(),
        }
    }

    /// Returns the [kind](ReflectKind) of this `TypeInfo`.
    pub const fn kind(&self) -> ReflectKind {
        match self {
            Self::Struct(_) => ReflectKind::Struct,
            Self::List(_) => ReflectKind::List,
            Self::Map(_) => ReflectKind::Map,
            Self::Int(_) => ReflectKind::Int,
            Self::String(_) => ReflectKind::String,
            Self::Pointer(_) => ReflectKind::Pointer,
            Self::Opaque(_) => ReflectKind::Opaque,
        }
    }

    /// Returns the `TypeId`, the identity token of the described type.
    #[inline]
    pub const fn type_id(&self) -> TypeId {
        self.ty().id()
    }

    /// Check if the given type matches this one.
    #[inline]
    pub fn type_is<T: 'static>(&self) -> bool {
        self.ty().is::<T>()
    }

    /// Returns the type path.
    #[inline]
    pub fn type_path(&self) -> &'static str {
        self.ty().path()
    }

    /// Returns `true` if a value of this type stores its content behind a
    /// pointer, so reading it from a container slot needs one more dereference.
    ///
    /// ```
    /// use vc_reflect::info::Typed;
    /// use std::collections::HashMap;
    ///
    /// assert!(<Box<HashMap<u8, u8>> as Typed>::type_info().is_indirect());
    /// assert!(!<HashMap<u8, u8> as Typed>::type_info().is_indirect());
    /// ```
    #[inline]
    pub const fn is_indirect(&self) -> bool {
        matches!(self, Self::Pointer(_))
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use alloc::string::String;
    use alloc::vec::Vec;

    use crate::info::{ReflectKind, Typed};

    #[test]
    fn kind_matches_variant() {
        assert_eq!(u8::type_info().kind(), ReflectKind::Int);
        assert_eq!(String::type_info().kind(), ReflectKind::String);
        assert_eq!(<Vec<u8>>::type_info().kind(), ReflectKind::List);
        assert_eq!(bool::type_info().kind(), ReflectKind::Opaque);
    }

    #[test]
    fn wrong_cast_reports_both_kinds() {
        let err = u8::type_info().as_struct().unwrap_err();
        assert_eq!(err.expected, ReflectKind::Struct);
        assert_eq!(err.received, ReflectKind::Int);
        assert_eq!(
            alloc::format!("{err}"),
            "reflect kind mismatch: expected Struct, received Int"
        );
    }
}
