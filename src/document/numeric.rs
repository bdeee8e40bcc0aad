//! Exact numeric conversions
//!
//! Integrality and range are decided on the number's exact decimal text,
//! never on an `f64` approximation. Exponent-form input is bounded so a
//! short field cannot expand into millions of digits.

use std::str::FromStr;

use bigdecimal::BigDecimal;
use num_bigint::{BigInt, Sign};
use serde_json::Number;

/// Largest number of integer digits an exponent-form value may expand to
pub const MAX_INTEGER_DIGITS: u64 = 4096;

/// Largest decimal exponent magnitude accepted for arbitrary-precision values
pub const MAX_DECIMAL_EXPONENT: u64 = 4096;

/// Parses a JSON number from its exact text
pub fn exact_decimal(n: &Number) -> Result<BigDecimal, String> {
    let text = n.to_string();
    let dec = BigDecimal::from_str(&text).map_err(|e| format!("{} is not a decimal: {}", text, e))?;
    let (_, scale) = dec.as_bigint_and_exponent();
    if scale.unsigned_abs() > MAX_DECIMAL_EXPONENT {
        return Err(format!(
            "{} has an exponent beyond {} digits",
            text, MAX_DECIMAL_EXPONENT
        ));
    }
    Ok(dec)
}

/// Integer value of a JSON number, if it has no fractional part
pub fn exact_integer(n: &Number) -> Result<BigInt, String> {
    if let Some(v) = n.as_i64() {
        return Ok(BigInt::from(v));
    }
    if let Some(v) = n.as_u64() {
        return Ok(BigInt::from(v));
    }
    let text = n.to_string();
    let dec = BigDecimal::from_str(&text).map_err(|e| format!("{} is not a number: {}", text, e))?;
    integer_part(&dec).map_err(|reason| format!("{} {}", text, reason))
}

/// Integer value of a decimal, rejecting fractions and oversized expansions.
///
/// Trailing zeros of the unscaled digits are folded into the exponent
/// first, so `30.0` and `3e1` are integral and `1e100000000` is rejected
/// without being expanded.
pub fn integer_part(dec: &BigDecimal) -> Result<BigInt, String> {
    let (digits, scale) = dec.as_bigint_and_exponent();
    if digits.sign() == Sign::NoSign {
        return Ok(digits);
    }

    let magnitude = digits.magnitude().to_string();
    let significant = magnitude.trim_end_matches('0').len();
    let trailing = magnitude.len() - significant;
    let scale = i128::from(scale) - trailing as i128;
    if scale > 0 {
        return Err("has a fractional part".to_string());
    }

    let shift = scale.unsigned_abs();
    if significant as u128 + shift > u128::from(MAX_INTEGER_DIGITS) {
        return Err(format!("has more than {} digits", MAX_INTEGER_DIGITS));
    }

    let mantissa = BigInt::from_str(&magnitude[..significant])
        .map_err(|e| format!("has unreadable digits: {}", e))?;
    let mantissa = if digits.sign() == Sign::Minus {
        -mantissa
    } else {
        mantissa
    };
    let shift = u32::try_from(shift).map_err(|_| "is out of range".to_string())?;
    Ok(mantissa * BigInt::from(10u32).pow(shift))
}

/// Narrows a JSON number to a fixed-width integer type
pub fn exact_fixed<T: TryFrom<BigInt>>(n: &Number) -> Result<T, String> {
    let wide = exact_integer(n)?;
    T::try_from(wide).map_err(|_| format!("{} is out of range", n))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    fn number(text: &str) -> Number {
        match serde_json::from_str(text).unwrap() {
            Value::Number(n) => n,
            other => panic!("not a number: {}", other),
        }
    }

    #[test]
    fn test_integral_forms() {
        assert_eq!(exact_integer(&number("30")).unwrap(), BigInt::from(30));
        assert_eq!(exact_integer(&number("30.0")).unwrap(), BigInt::from(30));
        assert_eq!(exact_integer(&number("-3e1")).unwrap(), BigInt::from(-30));
        assert_eq!(exact_integer(&number("0.0")).unwrap(), BigInt::from(0));
        assert_eq!(exact_integer(&number("1500e-2")).unwrap(), BigInt::from(15));
    }

    #[test]
    fn test_fraction_hidden_below_f64_precision() {
        assert!(exact_integer(&number("1.0000000000000001")).is_err());
        assert!(exact_integer(&number("7.00000000000000001")).is_err());
        assert!(exact_integer(&number("9007199254740993.5")).is_err());
    }

    #[test]
    fn test_large_integral_value_is_exact() {
        assert_eq!(
            exact_fixed::<i64>(&number("9007199254740993.0")).unwrap(),
            9_007_199_254_740_993
        );
    }

    #[test]
    fn test_fixed_range() {
        assert_eq!(exact_fixed::<i32>(&number("2147483647.0")).unwrap(), i32::MAX);
        assert!(exact_fixed::<i32>(&number("2147483648")).is_err());
        assert!(exact_fixed::<i64>(&number("18446744073709551615")).is_err());
        assert!(exact_fixed::<i8>(&number("1e3")).is_err());
    }

    #[test]
    fn test_exponent_expansion_is_bounded() {
        let err = exact_integer(&number("1e100000000")).unwrap_err();
        assert!(err.contains("digits"), "{}", err);
        assert!(exact_integer(&number("1e4095")).is_ok());
        assert!(exact_integer(&number("1e4096")).is_err());
        assert!(exact_integer(&number("1e-100000000")).is_err());
    }

    #[test]
    fn test_decimal_exponent_is_bounded() {
        assert!(exact_decimal(&number("1.5e-20")).is_ok());
        assert!(exact_decimal(&number("1e100000000")).is_err());
        assert!(exact_decimal(&number("1e-100000000")).is_err());
    }
}
