//! Value normalization
//!
//! Converts a raw extracted field into the caller's canonical runtime
//! representation. Missing fields become `Null`; representations that
//! cannot be expressed as the target type fail with
//! `TypeCoercionError`. There is no default-value substitution.

mod errors;
mod normalizer;

pub use errors::{CoercionResult, TypeCoercionError};
pub use normalizer::{DefaultNormalizer, ValueNormalizer};
