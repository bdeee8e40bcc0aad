//! Expected output schema
//!
//! Built once per execution by pairing the translator's output columns
//! with the caller's expected types. Immutable afterwards.

use serde::{Deserialize, Serialize};

use super::canonical::CanonicalType;
use super::row::Row;

/// One output column: document field name and expected type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputColumn {
    /// Field name looked up in each result document
    pub name: String,
    /// Expected canonical type
    pub canonical_type: CanonicalType,
}

impl OutputColumn {
    pub fn new(name: impl Into<String>, canonical_type: CanonicalType) -> Self {
        Self {
            name: name.into(),
            canonical_type,
        }
    }
}

/// Ordered output schema for one execution
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputSchema {
    columns: Vec<OutputColumn>,
}

impl OutputSchema {
    /// Creates a schema from columns in output order
    pub fn new(columns: Vec<OutputColumn>) -> Self {
        Self { columns }
    }

    /// Pairs column names with types positionally.
    ///
    /// Returns `None` when the lengths differ.
    pub fn zip(names: &[String], types: &[CanonicalType]) -> Option<Self> {
        if names.len() != types.len() {
            return None;
        }
        let columns = names
            .iter()
            .zip(types)
            .map(|(name, ty)| OutputColumn::new(name.clone(), *ty))
            .collect();
        Some(Self { columns })
    }

    /// Returns the columns in output order
    pub fn columns(&self) -> &[OutputColumn] {
        &self.columns
    }

    /// Returns the number of columns
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Returns true if there are no columns
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Returns the expected types in output order
    pub fn types(&self) -> impl Iterator<Item = CanonicalType> + '_ {
        self.columns.iter().map(|c| c.canonical_type)
    }

    /// Returns true if `row` has one value per column and every value is
    /// assignable to its column type
    pub fn conforms(&self, row: &Row) -> bool {
        row.len() == self.columns.len()
            && self
                .columns
                .iter()
                .zip(row.iter())
                .all(|(col, value)| value.is_assignable_to(col.canonical_type))
    }
}
