//! Query execution bridge
//!
//! `QueryExecution` owns the per-query lifecycle:
//! - translates the held query and checks its columns against the
//!   expected types
//! - issues the query text over a borrowed `Connection`
//! - decodes each result document into a `Row` on `next`
//!
//! Decoding is type-directed: `RowDecoder` resolves one accessor per
//! column from a fixed dispatch table keyed by canonical type.

mod config;
mod decoder;
mod errors;
mod execution;
mod state;

pub use config::{BridgeConfig, DecodeErrorPolicy};
pub use decoder::{accessor_for, has_typed_accessor, Accessor, RowDecoder};
pub use errors::{ExecutionError, ExecutionResult};
pub use execution::QueryExecution;
pub use state::ExecutionState;
