//! Canonical type identifiers
//!
//! Names are lowercase with underscores (`big_decimal`). A few common
//! aliases are accepted when parsing (`int`, `bigint`, `decimal`).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Runtime type expected for one output column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CanonicalType {
    /// UTF-8 string
    String,
    /// Single character
    Char,
    /// Boolean
    Boolean,
    /// 8-bit signed integer
    Byte,
    /// 16-bit signed integer
    Short,
    /// 32-bit signed integer
    Integer,
    /// 64-bit signed integer
    Long,
    /// Arbitrary-precision integer
    BigInteger,
    /// 32-bit floating point
    Float,
    /// 64-bit floating point
    Double,
    /// Arbitrary-precision decimal
    BigDecimal,
    /// Calendar date
    Date,
    /// Time of day
    Time,
    /// Date and time without zone
    Timestamp,
    /// Any JSON value, passed through untouched
    Object,
    /// Binary data
    Varbinary,
}

impl CanonicalType {
    /// All canonical types, in declaration order
    pub const ALL: [CanonicalType; 16] = [
        CanonicalType::String,
        CanonicalType::Char,
        CanonicalType::Boolean,
        CanonicalType::Byte,
        CanonicalType::Short,
        CanonicalType::Integer,
        CanonicalType::Long,
        CanonicalType::BigInteger,
        CanonicalType::Float,
        CanonicalType::Double,
        CanonicalType::BigDecimal,
        CanonicalType::Date,
        CanonicalType::Time,
        CanonicalType::Timestamp,
        CanonicalType::Object,
        CanonicalType::Varbinary,
    ];

    /// Returns the type name used in errors and on the command line
    pub fn as_str(&self) -> &'static str {
        match self {
            CanonicalType::String => "string",
            CanonicalType::Char => "char",
            CanonicalType::Boolean => "boolean",
            CanonicalType::Byte => "byte",
            CanonicalType::Short => "short",
            CanonicalType::Integer => "integer",
            CanonicalType::Long => "long",
            CanonicalType::BigInteger => "big_integer",
            CanonicalType::Float => "float",
            CanonicalType::Double => "double",
            CanonicalType::BigDecimal => "big_decimal",
            CanonicalType::Date => "date",
            CanonicalType::Time => "time",
            CanonicalType::Timestamp => "timestamp",
            CanonicalType::Object => "object",
            CanonicalType::Varbinary => "varbinary",
        }
    }
}

impl fmt::Display for CanonicalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Type name that does not denote a canonical type
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown canonical type: {0}")]
pub struct UnknownTypeName(pub String);

impl FromStr for CanonicalType {
    type Err = UnknownTypeName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_ascii_lowercase();
        let ty = match name.as_str() {
            "string" | "text" => CanonicalType::String,
            "char" => CanonicalType::Char,
            "boolean" | "bool" => CanonicalType::Boolean,
            "byte" | "tinyint" => CanonicalType::Byte,
            "short" | "smallint" => CanonicalType::Short,
            "integer" | "int" => CanonicalType::Integer,
            "long" => CanonicalType::Long,
            "big_integer" | "biginteger" | "bigint" => CanonicalType::BigInteger,
            "float" | "real" => CanonicalType::Float,
            "double" => CanonicalType::Double,
            "big_decimal" | "bigdecimal" | "decimal" => CanonicalType::BigDecimal,
            "date" => CanonicalType::Date,
            "time" => CanonicalType::Time,
            "timestamp" => CanonicalType::Timestamp,
            "object" | "json" => CanonicalType::Object,
            "varbinary" | "bytes" => CanonicalType::Varbinary,
            _ => return Err(UnknownTypeName(s.to_string())),
        };
        Ok(ty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_round_trip_through_from_str() {
        for ty in CanonicalType::ALL {
            assert_eq!(ty.as_str().parse::<CanonicalType>().unwrap(), ty);
        }
    }

    #[test]
    fn test_aliases() {
        assert_eq!("int".parse::<CanonicalType>().unwrap(), CanonicalType::Integer);
        assert_eq!("BigInt".parse::<CanonicalType>().unwrap(), CanonicalType::BigInteger);
        assert_eq!(" decimal ".parse::<CanonicalType>().unwrap(), CanonicalType::BigDecimal);
    }

    #[test]
    fn test_unknown_name() {
        let err = "uuid".parse::<CanonicalType>().unwrap_err();
        assert_eq!(err, UnknownTypeName("uuid".to_string()));
        assert!(err.to_string().contains("uuid"));
    }

    #[test]
    fn test_serde_uses_snake_case() {
        let json = serde_json::to_string(&CanonicalType::BigDecimal).unwrap();
        assert_eq!(json, "\"big_decimal\"");
        let ty: CanonicalType = serde_json::from_str("\"timestamp\"").unwrap();
        assert_eq!(ty, CanonicalType::Timestamp);
    }
}
