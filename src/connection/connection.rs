//! Connection and cursor traits

use crate::document::Document;

use super::cancel::CancelToken;
use super::errors::ResourceResult;

/// Forward-only source of result documents.
///
/// Dropping the cursor releases whatever transport resource backs it.
pub trait DocumentCursor {
    /// Returns the next document, or `None` once exhausted.
    ///
    /// May block for at most one round trip to fetch the next batch.
    fn next_document(&mut self) -> ResourceResult<Option<Document>>;
}

impl<C: DocumentCursor + ?Sized> DocumentCursor for Box<C> {
    fn next_document(&mut self) -> ResourceResult<Option<Document>> {
        (**self).next_document()
    }
}

/// Externally managed connection to a document store
pub trait Connection {
    /// Cursor type returned by `execute_query`
    type Cursor: DocumentCursor;

    /// Sends `query_text` and returns a cursor over its results.
    ///
    /// Blocks until the store acknowledges the query. Implementations
    /// may poll `cancel` while waiting. Fails with `ResourceError` on
    /// transport, network or authentication faults.
    fn execute_query(&self, query_text: &str, cancel: &CancelToken) -> ResourceResult<Self::Cursor>;

    /// Best-effort request to abandon in-flight work. Default: no-op.
    fn cancel(&self) {}
}

impl<C: Connection + ?Sized> Connection for &C {
    type Cursor = C::Cursor;

    fn execute_query(&self, query_text: &str, cancel: &CancelToken) -> ResourceResult<Self::Cursor> {
        (**self).execute_query(query_text, cancel)
    }

    fn cancel(&self) {
        (**self).cancel()
    }
}
