use super::cast::encode;
use super::fields::FieldDecomposition;
use super::float::{BitLayout, Classification, Precision};
use super::string::parse_decimal;

/// The result of converting one number: the encoded pattern and its fields.
/// This bundles everything that a front end needs to display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Conversion {
    layout: BitLayout,
    fields: FieldDecomposition,
}

impl Conversion {
    /// Encode `value` with `precision` and decompose the result.
    pub fn new(value: f64, precision: Precision) -> Self {
        let layout = encode(value, precision);
        let fields = layout.decompose();
        tracing::trace!(
            value,
            precision = precision.as_str(),
            bits = layout.get_bits(),
            classification = fields.get_classification().as_str(),
            "converted"
        );
        Conversion { layout, fields }
    }

    pub fn get_layout(&self) -> &BitLayout {
        &self.layout
    }

    pub fn get_fields(&self) -> &FieldDecomposition {
        &self.fields
    }

    /// Returns the value that was converted.
    pub fn get_input(&self) -> f64 {
        self.layout.get_input()
    }

    pub fn get_precision(&self) -> Precision {
        self.layout.get_precision()
    }

    /// Returns the hex encoding with a `0x` prefix.
    pub fn hex(&self) -> String {
        format!("0x{}", self.layout.render_hex())
    }

    /// Returns the sign, exponent and mantissa bits separated by spaces.
    pub fn binary(&self) -> String {
        self.layout.render_binary_grouped()
    }

    pub fn sign_bit(&self) -> String {
        self.layout.sign_bits()
    }

    pub fn exponent_bits(&self) -> String {
        self.layout.exponent_bits()
    }

    pub fn mantissa_bits(&self) -> String {
        self.layout.mantissa_bits()
    }

    pub fn actual_exponent(&self) -> i64 {
        self.fields.get_actual_exponent()
    }

    pub fn bias(&self) -> i64 {
        self.fields.get_bias()
    }

    pub fn classification(&self) -> Classification {
        self.fields.get_classification()
    }

    pub fn is_special(&self) -> bool {
        self.fields.is_special()
    }
}

/// Parse `text` and convert it with `precision`. Text that is not a number
/// is rejected before it reaches the encoder.
pub fn convert(text: &str, precision: Precision) -> crate::Result<Conversion> {
    let value = parse_decimal(text)?;
    tracing::debug!(text, precision = precision.as_str(), "converting");
    Ok(Conversion::new(value, precision))
}

#[cfg(test)]
use super::error::Error;

#[test]
fn test_convert_one() {
    let c = convert("1.0", Precision::Single).unwrap();
    assert_eq!(c.hex(), "0x3F800000");
    assert_eq!(c.binary(), "0 01111111 00000000000000000000000");
    assert_eq!(c.sign_bit(), "0");
    assert_eq!(c.exponent_bits(), "01111111");
    assert_eq!(c.mantissa_bits(), "0".repeat(23));
    assert_eq!(c.actual_exponent(), 0);
    assert_eq!(c.bias(), 127);
    assert_eq!(c.classification(), Classification::Normalized);
    assert!(!c.is_special());
    assert_eq!(c.get_input(), 1.0);
    assert_eq!(c.get_precision(), Precision::Single);
}

#[test]
fn test_convert_special() {
    let c = convert("-0", Precision::Double).unwrap();
    assert_eq!(c.hex(), "0x8000000000000000");
    assert_eq!(c.classification(), Classification::Zero);
    assert!(c.is_special());
    assert_eq!(c.actual_exponent(), -1023);

    let c = convert("nan", Precision::Single).unwrap();
    assert_eq!(c.exponent_bits(), "11111111");
    assert!(c.mantissa_bits().contains('1'));
    assert_eq!(c.classification(), Classification::NaN);

    let c = convert("1e39", Precision::Single).unwrap();
    assert_eq!(c.hex(), "0x7F800000");
    assert_eq!(c.classification(), Classification::Infinity);
}

#[test]
fn test_convert_rejects_invalid() {
    assert_eq!(
        convert("", Precision::Single),
        Err(Error::InvalidInput(String::new()))
    );
    assert_eq!(
        convert("twelve", Precision::Double),
        Err(Error::InvalidInput("twelve".to_string()))
    );
}

#[test]
fn test_conversion_is_consistent() {
    let c = Conversion::new(3.75, Precision::Double);
    assert_eq!(*c.get_fields(), c.get_layout().decompose());
    assert_eq!(c.get_fields().reassemble(), *c.get_layout());
    assert_eq!(c, Conversion::new(3.75, Precision::Double));
}
