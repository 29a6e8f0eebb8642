use crate::info::{Type, impl_type_fn};

/// Metadata for types whose internals are opaque to the reflection system.
///
/// The encoder has no rule for such types (floats, `bool`, function pointers ...),
/// they are described only so that they can be named in an error.
#[derive(Debug, Clone)]
pub struct OpaqueInfo {
    ty: Type,
}

impl OpaqueInfo {
    impl_type_fn!(ty);

    /// Create a new [`OpaqueInfo`].
    #[inline]
    pub const fn new<T: 'static>() -> Self {
        Self { ty: Type::of::<T>() }
    }
}
