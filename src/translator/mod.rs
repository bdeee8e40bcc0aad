//! Query translation
//!
//! A translator turns an abstract query into the store's native query
//! text plus the ordered list of output column names. The execution
//! bridge only depends on the `Translator` trait; `N1qlTranslator` is a
//! reference implementation over the `QueryExpression` AST.
//!
//! # Output columns
//!
//! Column `i` of the translated query names the result document field
//! decoded into position `i` of every row.

mod ast;
mod errors;
mod n1ql;
mod translator;

pub use ast::{FilterOp, Predicate, QueryExpression, SelectColumn, SortDirection, SortSpec};
pub use errors::{TranslationError, TranslationResult};
pub use n1ql::N1qlTranslator;
pub use translator::{TranslatedQuery, Translator};
