use thiserror::Error;

use vc_reflect::info::ReflectKind;

// -----------------------------------------------------------------------------
// CompileError

/// A type that cannot be turned into a [`Procedure`](crate::Procedure).
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum CompileError {
    #[error("no encoding rule for kind {kind} (type `{type_path}`)")]
    UnsupportedType {
        kind: ReflectKind,
        type_path: &'static str,
    },

    #[error("type `{type_path}` nests deeper than the limit of {limit}")]
    DepthLimit {
        type_path: &'static str,
        limit: usize,
    },

    /// A `Typed` impl returned the descriptor of another type.
    #[error("descriptor of `{type_path}` was given for a different type")]
    DescriptorMismatch { type_path: &'static str },
}

impl CompileError {
    /// Returns the kind that has no encoding rule, if that is the cause.
    ///
    /// ```
    /// use vc_encode::CompileError;
    /// use vc_reflect::info::ReflectKind;
    ///
    /// let err = CompileError::UnsupportedType { kind: ReflectKind::Opaque, type_path: "bool" };
    /// assert_eq!(err.unsupported_kind(), Some(ReflectKind::Opaque));
    /// ```
    pub const fn unsupported_kind(&self) -> Option<ReflectKind> {
        match self {
            Self::UnsupportedType { kind, .. } => Some(*kind),
            Self::DepthLimit { .. } | Self::DescriptorMismatch { .. } => None,
        }
    }
}

// -----------------------------------------------------------------------------
// EncodeError

/// Failure of an encode call. No partial output is returned with it.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum EncodeError {
    #[error("unsupported type: {0}")]
    Unsupported(#[from] CompileError),

    #[error("map `{type_path}` reported {expected} entries but visited {visited}")]
    MapLenMismatch {
        type_path: &'static str,
        expected: usize,
        visited: usize,
    },

    /// The procedure of a recursive type was reached after its owner dropped.
    #[error("recursive encoder of `{type_path}` is no longer available")]
    Unresolved { type_path: &'static str },
}

// -----------------------------------------------------------------------------
// ConfigError

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("`{0}` must be greater than zero")]
    Zero(&'static str),

    #[error(
        "`initial_buffer_capacity` ({initial}) exceeds `max_pooled_buffer_capacity` ({max})"
    )]
    CapacityOrder { initial: usize, max: usize },
}
