//! Raw result documents
//!
//! A document is one semi-structured record returned by the store. Field
//! representations may differ from row to row, so extraction is
//! type-directed: the caller asks for the type it expects and the
//! document either narrows/widens safely or reports a mismatch.
//!
//! # Accessor contract
//!
//! - Absent field or JSON `null` is `Ok(None)`, never an error
//! - Numeric narrowing only for integral values within range, decided on
//!   the exact number text
//! - Any other representation is `DocumentError::TypeMismatch`

mod document;
mod errors;
mod numeric;
mod raw;

pub use document::{json_kind, Document};
pub use errors::{DocumentError, DocumentResult};
pub use numeric::{
    exact_decimal, exact_integer, integer_part, MAX_DECIMAL_EXPONENT, MAX_INTEGER_DIGITS,
};
pub use raw::RawValue;
