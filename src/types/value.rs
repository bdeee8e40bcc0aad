//! Canonical runtime values

use std::fmt;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use bigdecimal::BigDecimal;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use num_bigint::BigInt;
use serde_json::Value;

use super::canonical::CanonicalType;

/// A decoded value in its canonical runtime representation
#[derive(Debug, Clone, PartialEq)]
pub enum CanonicalValue {
    /// Missing or null field
    Null,
    String(String),
    Char(char),
    Boolean(bool),
    Byte(i8),
    Short(i16),
    Integer(i32),
    Long(i64),
    BigInteger(BigInt),
    Float(f32),
    Double(f64),
    BigDecimal(BigDecimal),
    Date(NaiveDate),
    Time(NaiveTime),
    Timestamp(NaiveDateTime),
    Object(Value),
    Varbinary(Vec<u8>),
}

impl CanonicalValue {
    /// Returns the canonical type of this value, or `None` for `Null`
    pub fn canonical_type(&self) -> Option<CanonicalType> {
        let ty = match self {
            CanonicalValue::Null => return None,
            CanonicalValue::String(_) => CanonicalType::String,
            CanonicalValue::Char(_) => CanonicalType::Char,
            CanonicalValue::Boolean(_) => CanonicalType::Boolean,
            CanonicalValue::Byte(_) => CanonicalType::Byte,
            CanonicalValue::Short(_) => CanonicalType::Short,
            CanonicalValue::Integer(_) => CanonicalType::Integer,
            CanonicalValue::Long(_) => CanonicalType::Long,
            CanonicalValue::BigInteger(_) => CanonicalType::BigInteger,
            CanonicalValue::Float(_) => CanonicalType::Float,
            CanonicalValue::Double(_) => CanonicalType::Double,
            CanonicalValue::BigDecimal(_) => CanonicalType::BigDecimal,
            CanonicalValue::Date(_) => CanonicalType::Date,
            CanonicalValue::Time(_) => CanonicalType::Time,
            CanonicalValue::Timestamp(_) => CanonicalType::Timestamp,
            CanonicalValue::Object(_) => CanonicalType::Object,
            CanonicalValue::Varbinary(_) => CanonicalType::Varbinary,
        };
        Some(ty)
    }

    /// Returns true if this is `Null`
    pub fn is_null(&self) -> bool {
        matches!(self, CanonicalValue::Null)
    }

    /// Returns true if this value may occupy a column of type `ty`.
    ///
    /// `Null` is assignable to every type.
    pub fn is_assignable_to(&self, ty: CanonicalType) -> bool {
        self.canonical_type().map_or(true, |own| own == ty)
    }

    /// Returns the string payload, if any
    pub fn as_str(&self) -> Option<&str> {
        match self {
            CanonicalValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Renders the value as JSON for output.
    ///
    /// Arbitrary-precision numbers and temporal values become strings so
    /// no digits are lost; binary data becomes standard base64.
    pub fn to_json(&self) -> Value {
        match self {
            CanonicalValue::Null => Value::Null,
            CanonicalValue::String(s) => Value::String(s.clone()),
            CanonicalValue::Char(c) => Value::String(c.to_string()),
            CanonicalValue::Boolean(b) => Value::Bool(*b),
            CanonicalValue::Byte(v) => Value::from(*v),
            CanonicalValue::Short(v) => Value::from(*v),
            CanonicalValue::Integer(v) => Value::from(*v),
            CanonicalValue::Long(v) => Value::from(*v),
            CanonicalValue::BigInteger(v) => Value::String(v.to_string()),
            CanonicalValue::Float(v) => Value::from(f64::from(*v)),
            CanonicalValue::Double(v) => Value::from(*v),
            CanonicalValue::BigDecimal(v) => Value::String(v.to_string()),
            CanonicalValue::Date(d) => Value::String(d.format("%Y-%m-%d").to_string()),
            CanonicalValue::Time(t) => Value::String(t.format("%H:%M:%S%.f").to_string()),
            CanonicalValue::Timestamp(ts) => {
                Value::String(ts.format("%Y-%m-%dT%H:%M:%S%.f").to_string())
            }
            CanonicalValue::Object(v) => v.clone(),
            CanonicalValue::Varbinary(bytes) => Value::String(STANDARD.encode(bytes)),
        }
    }
}

impl fmt::Display for CanonicalValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CanonicalValue::Null => write!(f, "NULL"),
            CanonicalValue::String(s) => write!(f, "{}", s),
            CanonicalValue::Object(v) => write!(f, "{}", v),
            other => match other.to_json() {
                Value::String(s) => write!(f, "{}", s),
                v => write!(f, "{}", v),
            },
        }
    }
}

impl From<&str> for CanonicalValue {
    fn from(s: &str) -> Self {
        CanonicalValue::String(s.to_string())
    }
}

impl From<String> for CanonicalValue {
    fn from(s: String) -> Self {
        CanonicalValue::String(s)
    }
}

impl From<i32> for CanonicalValue {
    fn from(v: i32) -> Self {
        CanonicalValue::Integer(v)
    }
}

impl From<i64> for CanonicalValue {
    fn from(v: i64) -> Self {
        CanonicalValue::Long(v)
    }
}

impl From<f64> for CanonicalValue {
    fn from(v: f64) -> Self {
        CanonicalValue::Double(v)
    }
}

impl From<bool> for CanonicalValue {
    fn from(v: bool) -> Self {
        CanonicalValue::Boolean(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::str::FromStr;

    #[test]
    fn test_null_is_assignable_everywhere() {
        for ty in CanonicalType::ALL {
            assert!(CanonicalValue::Null.is_assignable_to(ty));
        }
    }

    #[test]
    fn test_assignability_is_exact() {
        assert!(CanonicalValue::Integer(1).is_assignable_to(CanonicalType::Integer));
        assert!(!CanonicalValue::Integer(1).is_assignable_to(CanonicalType::Long));
    }

    #[test]
    fn test_big_numbers_render_as_strings() {
        let big = BigInt::from_str("123456789012345678901234567890").unwrap();
        assert_eq!(
            CanonicalValue::BigInteger(big).to_json(),
            json!("123456789012345678901234567890")
        );

        let dec = BigDecimal::from_str("3.14159265358979323846").unwrap();
        assert_eq!(
            CanonicalValue::BigDecimal(dec).to_json(),
            json!("3.14159265358979323846")
        );
    }

    #[test]
    fn test_temporal_and_binary_rendering() {
        let date = NaiveDate::from_ymd_opt(2024, 2, 29).unwrap();
        assert_eq!(CanonicalValue::Date(date).to_json(), json!("2024-02-29"));

        let bytes = CanonicalValue::Varbinary(b"hi".to_vec());
        assert_eq!(bytes.to_json(), json!("aGk="));
    }

    #[test]
    fn test_display() {
        assert_eq!(CanonicalValue::Null.to_string(), "NULL");
        assert_eq!(CanonicalValue::from("Ana").to_string(), "Ana");
        assert_eq!(CanonicalValue::Integer(42).to_string(), "42");
        assert_eq!(CanonicalValue::Char('x').to_string(), "x");
    }
}
