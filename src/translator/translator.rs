//! Translator capability

use serde::{Deserialize, Serialize};

use super::errors::TranslationResult;

/// Native query text plus its ordered output columns
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslatedQuery {
    /// Query text sent to the store verbatim
    pub query_text: String,
    /// Result document field for each output position
    pub output_columns: Vec<String>,
}

impl TranslatedQuery {
    pub fn new(query_text: impl Into<String>, output_columns: Vec<String>) -> Self {
        Self {
            query_text: query_text.into(),
            output_columns,
        }
    }
}

/// Converts an abstract query into the store's query language
pub trait Translator {
    /// Abstract query type this translator accepts
    type Query;

    /// Translates `query`.
    ///
    /// Fails with `TranslationError` when the query uses constructs the
    /// target language cannot express.
    fn translate(&self, query: &Self::Query) -> TranslationResult<TranslatedQuery>;
}

impl<T: Translator + ?Sized> Translator for &T {
    type Query = T::Query;

    fn translate(&self, query: &Self::Query) -> TranslationResult<TranslatedQuery> {
        (**self).translate(query)
    }
}
