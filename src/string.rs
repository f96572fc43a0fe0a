//! This module contains the text conversions: rendering bit patterns, and
//! parsing the user's input.

use super::error::Error;
use super::float::{BitLayout, Classification, Precision};
use super::utils::{mask, to_bit_string};
use core::fmt::Display;
use core::str::FromStr;

impl BitLayout {
    /// Returns the sign bit as a string ("0" or "1").
    pub fn sign_bits(&self) -> String {
        to_bit_string(self.get_sign() as u64, 1)
    }

    /// Returns the exponent field as a string of 8 or 11 bits.
    pub fn exponent_bits(&self) -> String {
        let len = self.get_precision().get_exponent_len();
        to_bit_string(self.get_raw_exponent(), len)
    }

    /// Returns the mantissa field as a string of 23 or 52 bits.
    pub fn mantissa_bits(&self) -> String {
        let len = self.get_precision().get_mantissa_len();
        to_bit_string(self.get_mantissa(), len)
    }

    /// Returns two uppercase hex digits per byte, most significant byte
    /// first, with no prefix.
    pub fn render_hex(&self) -> String {
        self.to_be_bytes()
            .iter()
            .map(|byte| format!("{:02X}", byte))
            .collect()
    }

    /// Returns all of the bits, most significant bit first.
    pub fn render_binary(&self) -> String {
        let width = self.get_precision().get_width();
        to_bit_string(self.get_bits() & mask(width), width)
    }

    /// Returns the bits with a space between the sign, the exponent and the
    /// mantissa fields.
    pub fn render_binary_grouped(&self) -> String {
        format!(
            "{} {} {}",
            self.sign_bits(),
            self.exponent_bits(),
            self.mantissa_bits()
        )
    }
}

/// See `BitLayout::render_hex`.
pub fn render_hex(layout: &BitLayout) -> String {
    layout.render_hex()
}

/// See `BitLayout::render_binary_grouped`.
pub fn render_binary_grouped(layout: &BitLayout) -> String {
    layout.render_binary_grouped()
}

impl Display for BitLayout {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.render_binary_grouped())
    }
}

impl Display for Precision {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "{} (exponent:{} mantissa:{} bias:{})",
            self.as_str(),
            self.get_exponent_len(),
            self.get_mantissa_len(),
            self.get_bias()
        )
    }
}

impl Display for Classification {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Precision {
    type Err = Error;

    /// Accepts the bit width ("32", "64") or the name of the format.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let value = value.trim();
        match value.to_ascii_lowercase().as_str() {
            "32" | "f32" | "single" | "binary32" => Ok(Precision::Single),
            "64" | "f64" | "double" | "binary64" => Ok(Precision::Double),
            _ => Err(Error::UnknownPrecision(value.to_string())),
        }
    }
}

/// Parse the decimal number in `value`. Surrounding whitespace is ignored.
/// Accepts an optional sign, digits with an optional fraction and exponent
/// (e.g. `-1.5e-3`, `.5`, `5.`), and the special values `inf`, `infinity`
/// and `nan` in any case. Everything else, including the empty string, is
/// rejected with `Error::InvalidInput`.
pub fn parse_decimal(value: &str) -> crate::Result<f64> {
    let trimmed = value.trim();
    match trimmed.parse::<f64>() {
        Ok(num) => {
            tracing::trace!(input = trimmed, value = num, "parsed decimal");
            Ok(num)
        }
        Err(err) => {
            tracing::debug!(input = value, %err, "rejected decimal input");
            Err(Error::InvalidInput(value.to_string()))
        }
    }
}

#[cfg(test)]
use super::cast::encode;

#[test]
fn test_render_single() {
    let a = encode(1.0, Precision::Single);
    assert_eq!(a.render_hex(), "3F800000");
    assert_eq!(a.render_binary_grouped(), "0 01111111 00000000000000000000000");
    assert_eq!(a.render_binary(), "00111111100000000000000000000000");
    assert_eq!(a.sign_bits(), "0");
    assert_eq!(a.exponent_bits(), "01111111");
    assert_eq!(a.mantissa_bits().len(), 23);

    let a = encode(-1.0, Precision::Single);
    assert_eq!(render_hex(&a), "BF800000");
    assert_eq!(a.sign_bits(), "1");

    let a = encode(0.0, Precision::Single);
    assert_eq!(a.render_hex(), "00000000");

    let a = encode(0.1, Precision::Single);
    assert_eq!(a.render_hex(), "3DCCCCCD");
    assert_eq!(
        render_binary_grouped(&a),
        "0 01111011 10011001100110011001101"
    );
    assert_eq!(format!("{}", a), render_binary_grouped(&a));
}

#[test]
fn test_render_double() {
    let a = encode(1.0, Precision::Double);
    assert_eq!(a.render_hex(), "3FF0000000000000");
    assert_eq!(a.exponent_bits(), "01111111111");
    assert_eq!(a.mantissa_bits(), "0".repeat(52));

    let a = encode(-0.1, Precision::Double);
    assert_eq!(a.render_hex(), "BFB999999999999A");

    let a = encode(f64::INFINITY, Precision::Double);
    assert_eq!(a.render_hex(), "7FF0000000000000");
    assert_eq!(
        a.render_binary_grouped(),
        format!("0 11111111111 {}", "0".repeat(52))
    );
    assert_eq!(a.render_binary().len(), 64);

    let a = encode(f64::NEG_INFINITY, Precision::Single);
    assert_eq!(a.render_hex(), "FF800000");
}

#[test]
fn test_parse_precision() {
    assert_eq!("32".parse::<Precision>(), Ok(Precision::Single));
    assert_eq!(" 64 ".parse::<Precision>(), Ok(Precision::Double));
    assert_eq!("Single".parse::<Precision>(), Ok(Precision::Single));
    assert_eq!("DOUBLE".parse::<Precision>(), Ok(Precision::Double));
    assert_eq!("f32".parse::<Precision>(), Ok(Precision::Single));
    assert_eq!(
        "16".parse::<Precision>(),
        Err(Error::UnknownPrecision("16".to_string()))
    );
    assert!("".parse::<Precision>().is_err());
}

#[test]
fn test_parse_decimal() {
    assert_eq!(parse_decimal("1"), Ok(1.0));
    assert_eq!(parse_decimal("  -2.5 "), Ok(-2.5));
    assert_eq!(parse_decimal("+0.1"), Ok(0.1));
    assert_eq!(parse_decimal(".5"), Ok(0.5));
    assert_eq!(parse_decimal("5."), Ok(5.0));
    assert_eq!(parse_decimal("1e3"), Ok(1000.0));
    assert_eq!(parse_decimal("1E-3"), Ok(0.001));
    assert_eq!(parse_decimal("1e400"), Ok(f64::INFINITY));
    assert_eq!(parse_decimal("-Infinity"), Ok(f64::NEG_INFINITY));
    assert_eq!(parse_decimal("inf"), Ok(f64::INFINITY));
    assert!(parse_decimal("NaN").unwrap().is_nan());
    let zero = parse_decimal("-0").unwrap();
    assert!(zero == 0.0 && zero.is_sign_negative());
}

#[test]
fn test_parse_decimal_rejects() {
    for text in ["", "   ", "abc", "1.2.3", "1e", "e5", ".", "--1", "0x10", "1,5"]
    {
        assert_eq!(
            parse_decimal(text),
            Err(Error::InvalidInput(text.to_string())),
            "{:?}",
            text
        );
    }
    let err = parse_decimal("abc").unwrap_err();
    assert_eq!(err.to_string(), "\"abc\" is not a valid decimal number");
}
