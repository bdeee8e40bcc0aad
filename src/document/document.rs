//! Result document with typed accessors

use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

use super::errors::{DocumentError, DocumentResult};
use super::numeric::exact_fixed;

/// One raw result document (a JSON object)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Document {
    fields: Map<String, Value>,
}

impl Document {
    /// Creates an empty document
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps an existing JSON object
    pub fn from_map(fields: Map<String, Value>) -> Self {
        Self { fields }
    }

    /// Wraps a JSON value, which must be an object
    pub fn from_value(value: Value) -> DocumentResult<Self> {
        match value {
            Value::Object(fields) => Ok(Self { fields }),
            other => Err(DocumentError::NotAnObject {
                found: json_kind(&other),
            }),
        }
    }

    /// Adds or replaces a field
    pub fn with_field(mut self, name: impl Into<String>, value: Value) -> Self {
        self.fields.insert(name.into(), value);
        self
    }

    /// Returns true if the field is present (even when null)
    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    /// Returns the number of fields
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns true if the document has no fields
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Returns the underlying JSON object
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.fields
    }

    /// Consumes the document, returning it as a JSON value
    pub fn into_value(self) -> Value {
        Value::Object(self.fields)
    }

    /// Generic accessor: the raw value, `None` when absent or null
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.get(name).filter(|v| !v.is_null())
    }

    /// Reads a string field
    pub fn get_string(&self, name: &str) -> DocumentResult<Option<&str>> {
        match self.get(name) {
            None => Ok(None),
            Some(Value::String(s)) => Ok(Some(s)),
            Some(other) => Err(mismatch(name, "string", other)),
        }
    }

    /// Reads a 32-bit integer field, narrowing integral numbers in range
    pub fn get_int(&self, name: &str) -> DocumentResult<Option<i32>> {
        let Some(n) = self.number(name, "integer")? else {
            return Ok(None);
        };
        exact_fixed::<i32>(n)
            .map(Some)
            .map_err(|_| out_of_range(name, "integer", n))
    }

    /// Reads a 64-bit integer field, narrowing integral numbers in range
    pub fn get_long(&self, name: &str) -> DocumentResult<Option<i64>> {
        let Some(n) = self.number(name, "long")? else {
            return Ok(None);
        };
        exact_fixed::<i64>(n)
            .map(Some)
            .map_err(|_| out_of_range(name, "long", n))
    }

    /// Reads any numeric field as a double
    pub fn get_double(&self, name: &str) -> DocumentResult<Option<f64>> {
        let Some(n) = self.number(name, "double")? else {
            return Ok(None);
        };
        n.as_f64()
            .filter(|f| f.is_finite())
            .map(Some)
            .ok_or_else(|| out_of_range(name, "double", n))
    }

    /// Reads a boolean field
    pub fn get_boolean(&self, name: &str) -> DocumentResult<Option<bool>> {
        match self.get(name) {
            None => Ok(None),
            Some(Value::Bool(b)) => Ok(Some(*b)),
            Some(other) => Err(mismatch(name, "boolean", other)),
        }
    }

    /// Reads a numeric field with its exact textual representation
    pub fn get_number(&self, name: &str) -> DocumentResult<Option<&Number>> {
        self.number(name, "number")
    }

    fn number(&self, name: &str, expected: &'static str) -> DocumentResult<Option<&Number>> {
        match self.get(name) {
            None => Ok(None),
            Some(Value::Number(n)) => Ok(Some(n)),
            Some(other) => Err(mismatch(name, expected, other)),
        }
    }
}

impl TryFrom<Value> for Document {
    type Error = DocumentError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        Self::from_value(value)
    }
}

impl From<Map<String, Value>> for Document {
    fn from(fields: Map<String, Value>) -> Self {
        Self::from_map(fields)
    }
}

/// Returns the JSON kind of a value, used in error messages
pub fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn mismatch(field: &str, expected: &'static str, found: &Value) -> DocumentError {
    DocumentError::TypeMismatch {
        field: field.to_string(),
        expected,
        found: json_kind(found),
    }
}

fn out_of_range(field: &str, target: &'static str, n: &Number) -> DocumentError {
    DocumentError::OutOfRange {
        field: field.to_string(),
        target,
        value: n.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc(value: Value) -> Document {
        Document::from_value(value).unwrap()
    }

    #[test]
    fn test_non_object_rejected() {
        let err = Document::from_value(json!([1, 2])).unwrap_err();
        assert_eq!(err, DocumentError::NotAnObject { found: "array" });
    }

    #[test]
    fn test_absent_and_null_are_none() {
        let d = doc(json!({"a": null}));
        assert_eq!(d.get_string("a").unwrap(), None);
        assert_eq!(d.get_string("missing").unwrap(), None);
        assert_eq!(d.get_int("a").unwrap(), None);
        assert!(d.get("a").is_none());
        assert!(d.contains("a"));
    }

    #[test]
    fn test_string_accessor_rejects_array() {
        let d = doc(json!({"name": ["Ana"]}));
        let err = d.get_string("name").unwrap_err();
        assert_eq!(
            err,
            DocumentError::TypeMismatch {
                field: "name".into(),
                expected: "string",
                found: "array",
            }
        );
    }

    #[test]
    fn test_int_narrowing() {
        let d = doc(json!({"a": 30, "b": 30.0, "c": 30.5, "d": 4_000_000_000i64, "e": "30"}));
        assert_eq!(d.get_int("a").unwrap(), Some(30));
        assert_eq!(d.get_int("b").unwrap(), Some(30));
        assert!(matches!(d.get_int("c"), Err(DocumentError::OutOfRange { .. })));
        assert!(matches!(d.get_int("d"), Err(DocumentError::OutOfRange { .. })));
        assert!(matches!(d.get_int("e"), Err(DocumentError::TypeMismatch { .. })));
    }

    #[test]
    fn test_long_accepts_wide_values() {
        let d = doc(json!({"a": 4_000_000_000i64, "b": u64::MAX}));
        assert_eq!(d.get_long("a").unwrap(), Some(4_000_000_000));
        assert!(matches!(d.get_long("b"), Err(DocumentError::OutOfRange { .. })));
    }

    #[test]
    fn test_double_widens_integers() {
        let d = doc(json!({"a": 3, "b": 2.5, "c": true}));
        assert_eq!(d.get_double("a").unwrap(), Some(3.0));
        assert_eq!(d.get_double("b").unwrap(), Some(2.5));
        assert!(d.get_double("c").is_err());
    }

    #[test]
    fn test_boolean_is_strict() {
        let d = doc(json!({"a": true, "b": 1}));
        assert_eq!(d.get_boolean("a").unwrap(), Some(true));
        assert!(d.get_boolean("b").is_err());
    }

    #[test]
    fn test_narrowing_uses_exact_text() {
        let d: Document = serde_json::from_str(
            r#"{"a": 1.0000000000000001, "b": 9007199254740993.0, "c": 9007199254740993.5}"#,
        )
        .unwrap();
        assert!(matches!(d.get_int("a"), Err(DocumentError::OutOfRange { .. })));
        assert_eq!(d.get_long("b").unwrap(), Some(9_007_199_254_740_993));
        assert!(matches!(d.get_long("c"), Err(DocumentError::OutOfRange { .. })));
    }

    #[test]
    fn test_number_keeps_exact_text() {
        let d: Document = serde_json::from_str(r#"{"n": 123456789012345678901234567890.125}"#).unwrap();
        let n = d.get_number("n").unwrap().unwrap();
        assert_eq!(n.to_string(), "123456789012345678901234567890.125");
    }
}
