//! Connection and cursor capabilities
//!
//! The transport that talks to the document store lives outside this
//! crate. The bridge sees it through two narrow traits:
//!
//! - `Connection` issues query text and returns a cursor
//! - `DocumentCursor` yields result documents one at a time
//!
//! The connection is borrowed by an execution and never closed by it.
//! The cursor is owned by the execution and released by dropping it.

mod cancel;
mod connection;
mod errors;
mod memory;

pub use cancel::CancelToken;
pub use connection::{Connection, DocumentCursor};
pub use errors::{ResourceError, ResourceErrorKind, ResourceResult};
pub use memory::{InMemoryConnection, InMemoryCursor};
