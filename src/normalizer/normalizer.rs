//! Value normalizer capability and default conversion rules

use std::str::FromStr;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use bigdecimal::BigDecimal;
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use num_bigint::{BigInt, TryFromBigIntError};
use serde_json::{Number, Value};

use crate::document::{exact_decimal, exact_integer, integer_part, RawValue};
use crate::types::{CanonicalType, CanonicalValue};

use super::errors::{CoercionResult, TypeCoercionError};

/// Coerces raw field values into canonical values
pub trait ValueNormalizer {
    /// Converts `raw` to `target`.
    ///
    /// Absent input yields `CanonicalValue::Null`. Input that cannot be
    /// represented as `target` yields `TypeCoercionError`.
    fn coerce(&self, raw: RawValue, target: CanonicalType) -> CoercionResult<CanonicalValue>;
}

impl<N: ValueNormalizer + ?Sized> ValueNormalizer for &N {
    fn coerce(&self, raw: RawValue, target: CanonicalType) -> CoercionResult<CanonicalValue> {
        (**self).coerce(raw, target)
    }
}

/// Default conversion rules.
///
/// Numbers only widen, or narrow when the value is integral and in
/// range. Strings are never parsed as numbers or booleans. Temporal
/// types accept ISO-8601 text; timestamps also accept epoch millis.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultNormalizer;

impl DefaultNormalizer {
    pub fn new() -> Self {
        Self
    }
}

impl ValueNormalizer for DefaultNormalizer {
    fn coerce(&self, raw: RawValue, target: CanonicalType) -> CoercionResult<CanonicalValue> {
        if raw.is_absent() {
            return Ok(CanonicalValue::Null);
        }
        let found = raw.kind();
        let fail = |detail: String| TypeCoercionError::new(target, found, detail);

        match target {
            CanonicalType::String => text(raw)
                .map(CanonicalValue::String)
                .ok_or_else(|| fail(format!("{} is not a string", found))),

            CanonicalType::Char => {
                let s = text(raw).ok_or_else(|| fail(format!("{} is not a string", found)))?;
                let mut chars = s.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Ok(CanonicalValue::Char(c)),
                    _ => Err(fail(format!("expected one character, got {:?}", s))),
                }
            }

            CanonicalType::Boolean => match raw {
                RawValue::Boolean(b) | RawValue::Json(Value::Bool(b)) => {
                    Ok(CanonicalValue::Boolean(b))
                }
                _ => Err(fail(format!("{} is not a boolean", found))),
            },

            CanonicalType::Byte => fixed::<i8>(&raw, "byte")
                .map(CanonicalValue::Byte)
                .map_err(fail),

            CanonicalType::Short => fixed::<i16>(&raw, "short")
                .map(CanonicalValue::Short)
                .map_err(fail),

            CanonicalType::Integer => fixed::<i32>(&raw, "integer")
                .map(CanonicalValue::Integer)
                .map_err(fail),

            CanonicalType::Long => fixed::<i64>(&raw, "long")
                .map(CanonicalValue::Long)
                .map_err(fail),

            CanonicalType::BigInteger => integral(&raw).map(CanonicalValue::BigInteger).map_err(fail),

            CanonicalType::Float => {
                let v = floating(&raw).map_err(fail)?;
                if v.abs() > f64::from(f32::MAX) {
                    return Err(fail(format!("{} does not fit float", v)));
                }
                Ok(CanonicalValue::Float(v as f32))
            }

            CanonicalType::Double => floating(&raw).map(CanonicalValue::Double).map_err(fail),

            CanonicalType::BigDecimal => decimal(&raw).map(CanonicalValue::BigDecimal).map_err(fail),

            CanonicalType::Date => {
                let s = text(raw).ok_or_else(|| fail(format!("{} is not a date string", found)))?;
                NaiveDate::parse_from_str(&s, "%Y-%m-%d")
                    .map(CanonicalValue::Date)
                    .map_err(|e| fail(format!("invalid date {:?}: {}", s, e)))
            }

            CanonicalType::Time => {
                let s = text(raw).ok_or_else(|| fail(format!("{} is not a time string", found)))?;
                NaiveTime::parse_from_str(&s, "%H:%M:%S%.f")
                    .map(CanonicalValue::Time)
                    .map_err(|e| fail(format!("invalid time {:?}: {}", s, e)))
            }

            CanonicalType::Timestamp => timestamp(raw).map(CanonicalValue::Timestamp).map_err(fail),

            CanonicalType::Object => Ok(CanonicalValue::Object(into_json(raw))),

            CanonicalType::Varbinary => {
                let s = text(raw).ok_or_else(|| fail(format!("{} is not a base64 string", found)))?;
                STANDARD
                    .decode(s.as_bytes())
                    .map(CanonicalValue::Varbinary)
                    .map_err(|e| fail(format!("invalid base64: {}", e)))
            }
        }
    }
}

fn text(raw: RawValue) -> Option<String> {
    match raw {
        RawValue::String(s) | RawValue::Json(Value::String(s)) => Some(s),
        _ => None,
    }
}

fn number(raw: &RawValue) -> Option<&Number> {
    match raw {
        RawValue::Number(n) | RawValue::Json(Value::Number(n)) => Some(n),
        _ => None,
    }
}

/// Exact integral value of a numeric representation
fn integral(raw: &RawValue) -> Result<BigInt, String> {
    match raw {
        RawValue::Int(v) => Ok(BigInt::from(*v)),
        RawValue::Long(v) => Ok(BigInt::from(*v)),
        RawValue::Double(d) => {
            integer_part(&decimal(raw)?).map_err(|reason| format!("{} {}", d, reason))
        }
        _ => exact_integer(number(raw).ok_or_else(|| format!("{} is not a number", raw.kind()))?),
    }
}

/// Narrows a numeric representation to a fixed-width integer
fn fixed<T: TryFrom<BigInt, Error = TryFromBigIntError<BigInt>>>(
    raw: &RawValue,
    name: &str,
) -> Result<T, String> {
    T::try_from(integral(raw)?)
        .map_err(|e| format!("{} does not fit {}", e.into_original(), name))
}

fn floating(raw: &RawValue) -> Result<f64, String> {
    let v = match raw {
        RawValue::Int(v) => f64::from(*v),
        RawValue::Long(v) => *v as f64,
        RawValue::Double(d) => *d,
        _ => number(raw)
            .and_then(Number::as_f64)
            .ok_or_else(|| format!("{} is not a number", raw.kind()))?,
    };
    if v.is_finite() {
        Ok(v)
    } else {
        Err(format!("{} is not finite", v))
    }
}

fn decimal(raw: &RawValue) -> Result<BigDecimal, String> {
    match raw {
        RawValue::Int(v) => Ok(BigDecimal::from(*v)),
        RawValue::Long(v) => Ok(BigDecimal::from(*v)),
        RawValue::Double(d) if d.is_finite() => BigDecimal::from_str(&d.to_string())
            .map_err(|e| format!("{} is not a decimal: {}", d, e)),
        _ => exact_decimal(number(raw).ok_or_else(|| format!("{} is not a number", raw.kind()))?),
    }
}

fn timestamp(raw: RawValue) -> Result<NaiveDateTime, String> {
    if let Some(n) = number(&raw) {
        let millis = n
            .as_i64()
            .ok_or_else(|| format!("{} is not an epoch millisecond value", n))?;
        return DateTime::<Utc>::from_timestamp_millis(millis)
            .map(|dt| dt.naive_utc())
            .ok_or_else(|| format!("{} is out of range", millis));
    }
    if let RawValue::Long(millis) = raw {
        return DateTime::<Utc>::from_timestamp_millis(millis)
            .map(|dt| dt.naive_utc())
            .ok_or_else(|| format!("{} is out of range", millis));
    }

    let kind = raw.kind();
    let s = text(raw).ok_or_else(|| format!("{} is not a timestamp", kind))?;
    if let Ok(dt) = DateTime::parse_from_rfc3339(&s) {
        return Ok(dt.naive_utc());
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(&s, fmt).ok())
        .ok_or_else(|| format!("invalid timestamp {:?}", s))
}

fn into_json(raw: RawValue) -> Value {
    match raw {
        RawValue::Absent => Value::Null,
        RawValue::String(s) => Value::String(s),
        RawValue::Int(v) => Value::from(v),
        RawValue::Long(v) => Value::from(v),
        RawValue::Double(v) => Value::from(v),
        RawValue::Boolean(b) => Value::Bool(b),
        RawValue::Number(n) => Value::Number(n),
        RawValue::Json(v) => v,
    }
}
