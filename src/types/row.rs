//! Canonical rows

use std::ops::Index;

use serde_json::Value;

use super::value::CanonicalValue;

/// One decoded row, positionally matching the output schema
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    values: Vec<CanonicalValue>,
}

impl Row {
    /// Creates a row from values in schema order
    pub fn new(values: Vec<CanonicalValue>) -> Self {
        Self { values }
    }

    /// Returns the number of columns
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if the row has no columns
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Returns the value at `index`
    pub fn get(&self, index: usize) -> Option<&CanonicalValue> {
        self.values.get(index)
    }

    /// Returns the values in schema order
    pub fn values(&self) -> &[CanonicalValue] {
        &self.values
    }

    /// Returns an iterator over the values
    pub fn iter(&self) -> impl Iterator<Item = &CanonicalValue> {
        self.values.iter()
    }

    /// Consumes the row, returning its values
    pub fn into_values(self) -> Vec<CanonicalValue> {
        self.values
    }

    /// Renders the row as a JSON array
    pub fn to_json(&self) -> Value {
        Value::Array(self.values.iter().map(CanonicalValue::to_json).collect())
    }
}

impl Index<usize> for Row {
    type Output = CanonicalValue;

    fn index(&self, index: usize) -> &Self::Output {
        &self.values[index]
    }
}

impl From<Vec<CanonicalValue>> for Row {
    fn from(values: Vec<CanonicalValue>) -> Self {
        Self::new(values)
    }
}

impl IntoIterator for Row {
    type Item = CanonicalValue;
    type IntoIter = std::vec::IntoIter<CanonicalValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_row_accessors() {
        let row = Row::new(vec![CanonicalValue::from("Ana"), CanonicalValue::Null]);
        assert_eq!(row.len(), 2);
        assert!(!row.is_empty());
        assert_eq!(row[0], CanonicalValue::from("Ana"));
        assert!(row.get(1).unwrap().is_null());
        assert!(row.get(2).is_none());
    }

    #[test]
    fn test_row_to_json() {
        let row = Row::new(vec![CanonicalValue::from("Ana"), CanonicalValue::Integer(7)]);
        assert_eq!(row.to_json(), json!(["Ana", 7]));
    }
}
