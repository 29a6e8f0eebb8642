//! Hashers with fixed behavior, and the `hashbrown` map built on them.
//!
//! - [`FixedHashState`]: `foldhash` with a compile-time seed.
//! - [`TypeIdHashState`]: passes `TypeId` hashes through unchanged.

// -----------------------------------------------------------------------------
// Modules

mod hasher;

pub mod hash_map;

// -----------------------------------------------------------------------------
// Exports

pub use hasher::{FixedHashState, FixedHasher};
pub use hasher::{TypeIdHashState, TypeIdHasher};

pub use hash_map::HashMap;

// -----------------------------------------------------------------------------
// Re-export crates

pub use foldhash;
pub use hashbrown;
