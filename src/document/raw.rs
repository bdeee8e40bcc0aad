//! Extracted field values, before normalization

use serde_json::{Number, Value};

/// A field value as produced by a document accessor.
///
/// Typed accessors yield the matching variant; the generic accessor
/// yields `Json`. `Absent` covers both a missing field and JSON `null`.
#[derive(Debug, Clone, PartialEq)]
pub enum RawValue {
    Absent,
    String(String),
    Int(i32),
    Long(i64),
    Double(f64),
    Boolean(bool),
    /// Exact numeric text, for arbitrary-precision targets
    Number(Number),
    Json(Value),
}

impl RawValue {
    /// Returns true for `Absent` and `Json(null)`
    pub fn is_absent(&self) -> bool {
        matches!(self, RawValue::Absent | RawValue::Json(Value::Null))
    }

    /// Short description of the representation, used in errors
    pub fn kind(&self) -> &'static str {
        match self {
            RawValue::Absent => "absent",
            RawValue::String(_) => "string",
            RawValue::Int(_) => "int",
            RawValue::Long(_) => "long",
            RawValue::Double(_) => "double",
            RawValue::Boolean(_) => "boolean",
            RawValue::Number(_) => "number",
            RawValue::Json(v) => super::json_kind(v),
        }
    }
}

impl<T> From<Option<T>> for RawValue
where
    T: Into<RawValue>,
{
    fn from(value: Option<T>) -> Self {
        value.map_or(RawValue::Absent, Into::into)
    }
}

impl From<&str> for RawValue {
    fn from(s: &str) -> Self {
        RawValue::String(s.to_string())
    }
}

impl From<i32> for RawValue {
    fn from(v: i32) -> Self {
        RawValue::Int(v)
    }
}

impl From<i64> for RawValue {
    fn from(v: i64) -> Self {
        RawValue::Long(v)
    }
}

impl From<f64> for RawValue {
    fn from(v: f64) -> Self {
        RawValue::Double(v)
    }
}

impl From<bool> for RawValue {
    fn from(v: bool) -> Self {
        RawValue::Boolean(v)
    }
}

impl From<&Number> for RawValue {
    fn from(n: &Number) -> Self {
        RawValue::Number(n.clone())
    }
}

impl From<&Value> for RawValue {
    fn from(v: &Value) -> Self {
        RawValue::Json(v.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_absent_covers_json_null() {
        assert!(RawValue::Absent.is_absent());
        assert!(RawValue::Json(Value::Null).is_absent());
        assert!(!RawValue::Json(json!(0)).is_absent());
    }

    #[test]
    fn test_option_conversion() {
        assert_eq!(RawValue::from(None::<i32>), RawValue::Absent);
        assert_eq!(RawValue::from(Some(5)), RawValue::Int(5));
    }

    #[test]
    fn test_kind() {
        assert_eq!(RawValue::Json(json!([1])).kind(), "array");
        assert_eq!(RawValue::Long(1).kind(), "long");
    }
}
