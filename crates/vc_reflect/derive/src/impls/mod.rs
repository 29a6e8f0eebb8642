//! Code generation for the derived traits.

mod trait_typed;

pub(crate) use trait_typed::impl_trait_typed;
