//! This crate provides the borrowed memory view used by the encoder.
//!
//! Compiled encoding procedures never hold bare addresses. They receive a
//! [`Ptr<'a>`], a type-erased `&T` equivalent that keeps the lifetime of the
//! value being encoded, and step through it with byte offsets (struct fields)
//! or strides (list elements).
//!
//! **Ptr**
//!
//! [`Ptr<'a>`] is `Copy`, read-only and non-null. Creating one from a reference
//! is safe; reading through it is `unsafe` because the pointee type is erased.
#![expect(unsafe_code, reason = "Raw pointers are inherently unsafe.")]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![no_std]

// -----------------------------------------------------------------------------
// Modules

mod type_erased;

// -----------------------------------------------------------------------------
// Top-level exports

pub use type_erased::Ptr;
