//! Canonical type system for docbridge
//!
//! The caller of an execution describes each output column with a
//! `CanonicalType`. Decoded rows carry one `CanonicalValue` per column,
//! in output schema order.
//!
//! # Supported types
//!
//! - Fixed width: boolean, byte, short, integer, long, float, double, char
//! - Arbitrary precision: big integer, big decimal
//! - Temporal: date, time, timestamp
//! - Opaque: string, varbinary, object (any JSON)

mod canonical;
mod row;
mod schema;
mod value;

pub use canonical::{CanonicalType, UnknownTypeName};
pub use row::Row;
pub use schema::{OutputColumn, OutputSchema};
pub use value::CanonicalValue;
