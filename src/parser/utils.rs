//! This module contains auxiliary parsers

use num::{BigInt, BigRational};
use std::str::FromStr;

/// Parses a decimal number like `-12.50` into an exact rational
///
/// Returns `None` when the string is not a plain decimal number.
pub(crate) fn parse_rational(number: &str) -> Option<BigRational> {
    let mut num = String::new();
    let mut den = "1".to_string();
    let mut decimal = false;
    for c in number.trim().chars() {
        match c {
            '.' if !decimal => decimal = true,
            '-' | '+' if num.is_empty() => num.push(c),
            c if c.is_ascii_digit() => {
                num.push(c);
                if decimal {
                    den.push('0')
                };
            }
            _ => return None,
        }
    }
    Some(BigRational::new(
        BigInt::from_str(num.as_str()).ok()?,
        BigInt::from_str(den.as_str()).ok()?,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ratio(numer: i64, denom: i64) -> BigRational {
        BigRational::new(BigInt::from(numer), BigInt::from(denom))
    }

    #[test]
    fn rationals() {
        assert_eq!(parse_rational("5"), Some(ratio(5, 1)));
        assert_eq!(parse_rational("5.25"), Some(ratio(21, 4)));
        assert_eq!(parse_rational("-0.5"), Some(ratio(-1, 2)));
        assert_eq!(parse_rational("+3."), Some(ratio(3, 1)));
        assert_eq!(parse_rational(".75"), Some(ratio(3, 4)));
        assert_eq!(parse_rational("-0"), Some(ratio(0, 1)));
    }

    #[test]
    fn not_rationals() {
        assert_eq!(parse_rational(""), None);
        assert_eq!(parse_rational("-"), None);
        assert_eq!(parse_rational("1.2.3"), None);
        assert_eq!(parse_rational("5-"), None);
        assert_eq!(parse_rational("1e10"), None);
        assert_eq!(parse_rational("NaN"), None);
    }
}
