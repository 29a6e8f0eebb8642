use core::hash::{BuildHasher, Hasher};

use foldhash::fast::{FixedState, FoldHasher};

// -----------------------------------------------------------------------------
// FixedHashState

const SEED: u64 = 0x51_7c_c1_b7_27_22_0a_95;

/// The `foldhash` hasher built by [`FixedHashState`].
pub type FixedHasher = FoldHasher<'static>;

/// A `foldhash` state with a seed baked in at compile time.
///
/// Equal inputs hash equally in every process.
///
/// ```
/// use core::hash::BuildHasher;
/// use vc_utils::hash::FixedHashState;
///
/// assert_eq!(FixedHashState.hash_one("key"), FixedHashState.hash_one("key"));
/// ```
#[derive(Copy, Clone, Default, Debug)]
pub struct FixedHashState;

impl BuildHasher for FixedHashState {
    type Hasher = FixedHasher;

    #[inline(always)]
    fn build_hasher(&self) -> FixedHasher {
        FixedState::with_seed(SEED).build_hasher()
    }
}

// -----------------------------------------------------------------------------
// TypeIdHashState

/// Uses the last `u64` written as the hash.
///
/// Meant for keys that already are well-distributed 64-bit values, such as
/// [`TypeId`](core::any::TypeId), which hashes itself with one `write_u64`.
/// Byte writes are folded in so other keys still work, just less well.
#[derive(Copy, Clone, Default, Debug)]
pub struct TypeIdHasher {
    hash: u64,
}

impl Hasher for TypeIdHasher {
    #[inline]
    fn finish(&self) -> u64 {
        self.hash
    }

    fn write(&mut self, bytes: &[u8]) {
        for &byte in bytes {
            self.hash = (self.hash << 8 | self.hash >> 56) ^ u64::from(byte);
        }
    }

    #[inline]
    fn write_u64(&mut self, value: u64) {
        self.hash = value;
    }
}

/// Builds [`TypeIdHasher`]s.
///
/// ```
/// use core::hash::BuildHasher;
/// use vc_utils::hash::TypeIdHashState;
///
/// assert_eq!(TypeIdHashState.hash_one(42u64), 42);
/// ```
#[derive(Copy, Clone, Default, Debug)]
pub struct TypeIdHashState;

impl BuildHasher for TypeIdHashState {
    type Hasher = TypeIdHasher;

    #[inline(always)]
    fn build_hasher(&self) -> TypeIdHasher {
        TypeIdHasher::default()
    }
}
