//! Scripted in-memory connection
//!
//! Answers query text with pre-registered result rows or faults. Used
//! by tests and by the CLI `decode` command to replay captured results.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use serde_json::Value;

use crate::document::{json_kind, Document};

use super::cancel::CancelToken;
use super::connection::{Connection, DocumentCursor};
use super::errors::{ResourceError, ResourceResult};

#[derive(Debug, Clone)]
enum Script {
    Rows {
        rows: Vec<Value>,
        then: Option<ResourceError>,
    },
    Fault(ResourceError),
}

/// In-memory connection keyed by exact query text
#[derive(Debug, Default)]
pub struct InMemoryConnection {
    scripts: HashMap<String, Script>,
    fallback: Option<Script>,
    issued: Mutex<Vec<String>>,
    cancels: AtomicUsize,
    open_cursors: Arc<AtomicUsize>,
}

impl InMemoryConnection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answers `query_text` with `rows`
    pub fn with_result(mut self, query_text: impl Into<String>, rows: Vec<Value>) -> Self {
        self.scripts
            .insert(query_text.into(), Script::Rows { rows, then: None });
        self
    }

    /// Answers `query_text` with `rows`, then fails the cursor with `fault`
    pub fn with_result_then_fault(
        mut self,
        query_text: impl Into<String>,
        rows: Vec<Value>,
        fault: ResourceError,
    ) -> Self {
        self.scripts.insert(
            query_text.into(),
            Script::Rows {
                rows,
                then: Some(fault),
            },
        );
        self
    }

    /// Fails `query_text` with `fault` when it is issued
    pub fn with_fault(mut self, query_text: impl Into<String>, fault: ResourceError) -> Self {
        self.scripts.insert(query_text.into(), Script::Fault(fault));
        self
    }

    /// Answers any query text without its own script with `rows`
    pub fn with_default_result(mut self, rows: Vec<Value>) -> Self {
        self.fallback = Some(Script::Rows { rows, then: None });
        self
    }

    /// Query texts issued so far, in order
    pub fn issued_queries(&self) -> Vec<String> {
        self.issued
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Number of `cancel` calls received
    pub fn cancel_count(&self) -> usize {
        self.cancels.load(Ordering::SeqCst)
    }

    /// Number of cursors handed out and not yet dropped
    pub fn open_cursors(&self) -> usize {
        self.open_cursors.load(Ordering::SeqCst)
    }
}

impl Connection for InMemoryConnection {
    type Cursor = InMemoryCursor;

    fn execute_query(&self, query_text: &str, _cancel: &CancelToken) -> ResourceResult<InMemoryCursor> {
        self.issued
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(query_text.to_string());

        let script = self
            .scripts
            .get(query_text)
            .or(self.fallback.as_ref())
            .ok_or_else(|| {
                ResourceError::protocol(format!("no result scripted for query: {}", query_text))
            })?;

        match script {
            Script::Fault(fault) => Err(fault.clone()),
            Script::Rows { rows, then } => Ok(InMemoryCursor::open(
                rows.clone(),
                then.clone(),
                Arc::clone(&self.open_cursors),
            )),
        }
    }

    fn cancel(&self) {
        self.cancels.fetch_add(1, Ordering::SeqCst);
    }
}

/// Cursor over scripted rows
#[derive(Debug)]
pub struct InMemoryCursor {
    rows: std::vec::IntoIter<Value>,
    then: Option<ResourceError>,
    open: Arc<AtomicUsize>,
}

impl InMemoryCursor {
    fn open(rows: Vec<Value>, then: Option<ResourceError>, open: Arc<AtomicUsize>) -> Self {
        open.fetch_add(1, Ordering::SeqCst);
        Self {
            rows: rows.into_iter(),
            then,
            open,
        }
    }
}

impl DocumentCursor for InMemoryCursor {
    fn next_document(&mut self) -> ResourceResult<Option<Document>> {
        match self.rows.next() {
            Some(value) => {
                let found = json_kind(&value);
                Document::from_value(value).map(Some).map_err(|_| {
                    ResourceError::protocol(format!("result row is {}, not an object", found))
                })
            }
            None => match self.then.take() {
                Some(fault) => Err(fault),
                None => Ok(None),
            },
        }
    }
}

impl Drop for InMemoryCursor {
    fn drop(&mut self) {
        self.open.fetch_sub(1, Ordering::SeqCst);
    }
}
