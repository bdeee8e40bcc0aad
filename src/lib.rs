//! docbridge - typed rows from a schema-less document store
//!
//! A query execution bridge: translates a planned query into the store's
//! query language, issues it over a borrowed connection and decodes the
//! heterogeneous result documents into rows matching a fixed output
//! schema.
//!
//! ```ignore
//! use docbridge::connection::InMemoryConnection;
//! use docbridge::execution::QueryExecution;
//! use docbridge::translator::{N1qlTranslator, QueryExpression};
//! use docbridge::types::CanonicalType;
//!
//! let query = QueryExpression::new("users").select("name").select("age");
//! let conn = InMemoryConnection::new().with_default_result(rows);
//! let mut exec = QueryExecution::new(
//!     N1qlTranslator,
//!     query,
//!     [CanonicalType::String, CanonicalType::Integer],
//!     &conn,
//! );
//! exec.execute()?;
//! while let Some(row) = exec.next()? {
//!     println!("{}", row.to_json());
//! }
//! exec.close();
//! ```

pub mod cli;
pub mod connection;
pub mod document;
pub mod execution;
pub mod normalizer;
pub mod observability;
pub mod translator;
pub mod types;
