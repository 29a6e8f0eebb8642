use core::fmt;

use vc_os::sync::Arc;
use vc_ptr::Ptr;

use crate::buffer::Buffer;
use crate::error::EncodeError;

// -----------------------------------------------------------------------------
// Procedure

type ProcedureFn = dyn Fn(&mut Buffer, Ptr<'_>) -> Result<(), EncodeError> + Send + Sync;

/// A compiled encoder for one type.
///
/// Appends the encoding of the value behind a [`Ptr`] to a [`Buffer`]. A
/// procedure holds no per-call state: clones share the same closure and can
/// run on any number of threads at once.
#[derive(Clone)]
pub struct Procedure {
    func: Arc<ProcedureFn>,
    type_path: &'static str,
}

impl Procedure {
    /// Wraps a closure that encodes values of the type named `type_path`.
    ///
    /// The closure may assume its `Ptr` argument points to a live, aligned
    /// value of that type.
    #[inline]
    pub(crate) fn new<F>(type_path: &'static str, func: F) -> Self
    where
        F: Fn(&mut Buffer, Ptr<'_>) -> Result<(), EncodeError> + Send + Sync + 'static,
    {
        Self {
            func: Arc::new(func),
            type_path,
        }
    }

    /// Returns the name of the type this procedure encodes.
    #[inline]
    pub fn type_path(&self) -> &'static str {
        self.type_path
    }

    /// Appends the encoding of the value behind `ptr` to `buf`.
    ///
    /// On error, `buf` may hold partial output.
    ///
    /// # Safety
    ///
    /// `ptr` must point to a live value of the type this procedure was
    /// compiled for.
    #[inline]
    pub unsafe fn call(&self, buf: &mut Buffer, ptr: Ptr<'_>) -> Result<(), EncodeError> {
        (self.func)(buf, ptr)
    }

    /// Returns `true` if both handles share the same compiled closure.
    #[inline]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.func, &other.func)
    }
}

impl fmt::Debug for Procedure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Procedure")
            .field("type_path", &self.type_path)
            .finish_non_exhaustive()
    }
}
