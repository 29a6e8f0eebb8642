use core::any::TypeId;
use core::fmt;

use vc_os::sync::{PoisonError, RwLock};
use vc_reflect::info::TypeInfo;
use vc_utils::TypeIdMap;

use crate::compiler::Compiler;
use crate::error::CompileError;
use crate::procedure::Procedure;

// -----------------------------------------------------------------------------
// ProcedureCache

/// Compiled procedures keyed by `TypeId`.
///
/// Lookups take the read lock. On a miss the procedure is compiled without
/// holding any lock, then stored under the write lock. Two threads missing
/// the same type both compile it and the last store wins, which is harmless
/// because both procedures behave the same. Entries are never evicted.
pub struct ProcedureCache(RwLock<TypeIdMap<Procedure>>);

impl ProcedureCache {
    /// Creates an empty cache.
    #[inline]
    pub const fn new() -> Self {
        Self(RwLock::new(TypeIdMap::new()))
    }

    /// Returns the cached procedure of `type_id`, if any.
    #[inline]
    pub fn get(&self, type_id: TypeId) -> Option<Procedure> {
        self.0
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&type_id)
            .cloned()
    }

    /// Returns the procedure of the type described by `info`, compiling and
    /// storing it with `compiler` on a miss.
    ///
    /// A failed compilation stores nothing.
    pub fn get_or_compile(
        &self,
        info: &'static TypeInfo,
        compiler: &Compiler,
    ) -> Result<Procedure, CompileError> {
        let type_id = info.type_id();
        if let Some(procedure) = self.get(type_id) {
            log::trace!("encoder cache hit for `{}`", info.type_path());
            return Ok(procedure);
        }

        let procedure = compiler.compile(info)?;
        log::debug!(
            "compiled encoder for `{}` ({})",
            info.type_path(),
            info.kind()
        );
        self.insert(type_id, procedure.clone());
        Ok(procedure)
    }

    #[inline(never)]
    fn insert(&self, type_id: TypeId, procedure: Procedure) {
        let path = procedure.type_path();
        let replaced = self
            .0
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(type_id, procedure);

        if replaced.is_some() {
            log::warn!("encoder for `{path}` was compiled concurrently, replaced the stored one");
        }
    }

    /// Returns `true` if a procedure is stored for `type_id`.
    #[inline]
    pub fn contains(&self, type_id: TypeId) -> bool {
        self.0
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(&type_id)
    }

    /// Returns the number of cached procedures.
    #[inline]
    pub fn len(&self) -> usize {
        self.0.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for ProcedureCache {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ProcedureCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProcedureCache")
            .field("len", &self.len())
            .finish()
    }
}

// -----------------------------------------------------------------------------
// Tests
