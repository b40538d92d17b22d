//! Resource quantities (`500m`, `256Mi`, `1.5`, `2e3`).
//!
//! Quantities are kept verbatim as written in the manifest and parsed on
//! demand into nano-units so that differently spelled equal values compare
//! equal.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use thiserror::Error;

/// Maximum number of significant digits accepted in a quantity.
const MAX_DIGITS: usize = 27;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QuantityError {
    #[error("empty quantity")]
    Empty,
    #[error("invalid number in quantity '{0}'")]
    InvalidNumber(String),
    #[error("unknown suffix in quantity '{0}'")]
    UnknownSuffix(String),
    #[error("quantity '{0}' is out of range")]
    Overflow(String),
}

/// A quantity as written in a manifest.
///
/// Deserializes from strings as well as bare YAML numbers (`cpu: 1`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Quantity(pub String);

impl Quantity {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Value in nano-units (10^-9 of the base unit).
    pub fn nano_value(&self) -> Result<i128, QuantityError> {
        parse_nano(self.0.trim())
    }

    /// Compare two quantities by value. Unparseable quantities are never equal.
    pub fn same_value(&self, other: &Quantity) -> bool {
        match (self.nano_value(), other.nano_value()) {
            (Ok(a), Ok(b)) => a == b,
            _ => false,
        }
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl<'de> Deserialize<'de> for Quantity {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Str(String),
            Int(i64),
            Float(f64),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Str(s) => Quantity(s),
            Raw::Int(i) => Quantity(i.to_string()),
            Raw::Float(f) => Quantity(f.to_string()),
        })
    }
}

fn parse_nano(raw: &str) -> Result<i128, QuantityError> {
    if raw.is_empty() {
        return Err(QuantityError::Empty);
    }

    let split = raw
        .find(|c: char| !(c.is_ascii_digit() || c == '.' || c == '+' || c == '-'))
        .unwrap_or(raw.len());
    let (number, suffix) = raw.split_at(split);

    let (negative, number) = match number.as_bytes().first() {
        Some(b'-') => (true, &number[1..]),
        Some(b'+') => (false, &number[1..]),
        _ => (false, number),
    };

    let (int_part, frac_part) = match number.split_once('.') {
        Some((i, f)) => (i, f),
        None => (number, ""),
    };
    let digits_ok = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
    if (int_part.is_empty() && frac_part.is_empty())
        || !digits_ok(int_part)
        || !digits_ok(frac_part)
    {
        return Err(QuantityError::InvalidNumber(raw.to_string()));
    }

    let digits = format!("{}{}", int_part, frac_part);
    let digits = digits.trim_start_matches('0');
    if digits.len() > MAX_DIGITS {
        return Err(QuantityError::Overflow(raw.to_string()));
    }
    let mantissa: i128 = if digits.is_empty() {
        0
    } else {
        digits
            .parse()
            .map_err(|_| QuantityError::InvalidNumber(raw.to_string()))?
    };

    let (multiplier, exp10) = suffix_factor(suffix)
        .ok_or_else(|| QuantityError::UnknownSuffix(raw.to_string()))?;
    let exp10 = exp10 + 9 - frac_part.len() as i32;

    let overflow = || QuantityError::Overflow(raw.to_string());
    let scaled = mantissa.checked_mul(multiplier).ok_or_else(overflow)?;
    let value = if exp10 >= 0 {
        let pow = 10i128.checked_pow(exp10 as u32).ok_or_else(overflow)?;
        scaled.checked_mul(pow).ok_or_else(overflow)?
    } else {
        match 10i128.checked_pow((-exp10) as u32) {
            Some(pow) => scaled / pow,
            None => 0,
        }
    };

    Ok(if negative { -value } else { value })
}

/// Returns (binary multiplier, decimal exponent) for a suffix.
fn suffix_factor(suffix: &str) -> Option<(i128, i32)> {
    let binary = |power: u32| Some((1024i128.pow(power), 0));
    match suffix {
        "" => Some((1, 0)),
        "n" => Some((1, -9)),
        "u" => Some((1, -6)),
        "m" => Some((1, -3)),
        "k" => Some((1, 3)),
        "M" => Some((1, 6)),
        "G" => Some((1, 9)),
        "T" => Some((1, 12)),
        "P" => Some((1, 15)),
        "E" => Some((1, 18)),
        "Ki" => binary(1),
        "Mi" => binary(2),
        "Gi" => binary(3),
        "Ti" => binary(4),
        "Pi" => binary(5),
        "Ei" => binary(6),
        s => {
            let exp = s.strip_prefix('e').or_else(|| s.strip_prefix('E'))?;
            let exp: i32 = exp.parse().ok()?;
            (-40..=40).contains(&exp).then_some((1, exp))
        }
    }
}
