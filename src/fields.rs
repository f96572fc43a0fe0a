//! Decomposition of a bit pattern into its sign, exponent and mantissa
//! fields, and the meaning of each field.

use super::float::{BitLayout, Classification, Precision};

/// A field-by-field view of a `BitLayout`.
#[derive(Debug, Clone, Copy)]
pub struct FieldDecomposition {
    precision: Precision,
    // The sign bit (0 or 1).
    sign: u8,
    // The exponent field, as stored (biased).
    raw_exp: u64,
    // The mantissa field, without the implicit bit.
    mantissa: u64,
    category: Classification,
    // The value that was encoded.
    input: f64,
    // The value that the pattern stores.
    stored: f64,
}

impl FieldDecomposition {
    /// Returns the precision of the decomposed pattern.
    pub fn get_precision(&self) -> Precision {
        self.precision
    }

    /// Returns the sign bit. 1 means negative.
    pub fn get_sign(&self) -> u8 {
        self.sign
    }

    /// Returns the raw (biased) exponent field.
    pub fn get_raw_exponent(&self) -> u64 {
        self.raw_exp
    }

    /// Returns the exponent bias of the format.
    pub fn get_bias(&self) -> i64 {
        self.precision.get_bias()
    }

    /// Returns the raw exponent minus the bias. For zero and denormals this
    /// is the stored value minus the bias (e.g. -127), which is not the scale
    /// of the number; see `get_effective_exponent`.
    pub fn get_actual_exponent(&self) -> i64 {
        self.raw_exp as i64 - self.get_bias()
    }

    /// Returns the power of two that scales the significand. Denormals use
    /// the minimal exponent (1 - bias), not (0 - bias).
    pub fn get_effective_exponent(&self) -> i64 {
        match self.category {
            Classification::Zero | Classification::Denormalized => {
                1 - self.get_bias()
            }
            _ => self.get_actual_exponent(),
        }
    }

    /// Returns the mantissa field, without the implicit bit.
    pub fn get_mantissa(&self) -> u64 {
        self.mantissa
    }

    /// Returns the classification of the pattern.
    pub fn get_classification(&self) -> Classification {
        self.category
    }

    /// Returns the implicit leading bit of the significand: 1 for normal
    /// numbers, 0 for zero and denormals, and nothing for Inf and NaN.
    pub fn get_implicit_bit(&self) -> Option<u8> {
        match self.category {
            Classification::Normalized => Some(1),
            Classification::Zero | Classification::Denormalized => Some(0),
            Classification::Infinity | Classification::NaN => None,
        }
    }

    /// Returns true if the pattern is not a normal number.
    pub fn is_special(&self) -> bool {
        self.category.is_special()
    }

    /// Returns the absolute value of the value that was encoded.
    pub fn get_magnitude(&self) -> f64 {
        self.input.abs()
    }

    /// Returns the value that was encoded.
    pub fn get_input(&self) -> f64 {
        self.input
    }

    /// Returns the value that the pattern stores.
    pub fn get_stored(&self) -> f64 {
        self.stored
    }

    /// Returns the difference between the stored value and the encoded
    /// value, or None if either of them is not finite.
    pub fn get_conversion_error(&self) -> Option<f64> {
        if !self.input.is_finite() || !self.stored.is_finite() {
            return None;
        }
        Some(self.stored - self.input)
    }

    /// Put the sign, exponent and mantissa fields back together.
    pub fn reassemble(&self) -> BitLayout {
        let mut bits: u64 = self.sign as u64;
        bits <<= self.precision.get_exponent_len();
        bits |= self.raw_exp;
        bits <<= self.precision.get_mantissa_len();
        bits |= self.mantissa;
        BitLayout::new(self.precision, bits, self.input)
    }
}

/// Compares the fields. Values are compared by bits, so decomposing the
/// same NaN twice gives equal results.
impl PartialEq for FieldDecomposition {
    fn eq(&self, other: &Self) -> bool {
        self.precision == other.precision
            && self.sign == other.sign
            && self.raw_exp == other.raw_exp
            && self.mantissa == other.mantissa
            && self.category == other.category
            && self.input.to_bits() == other.input.to_bits()
            && self.stored.to_bits() == other.stored.to_bits()
    }
}

impl Eq for FieldDecomposition {}

/// Split `layout` into its fields. The precision is the one the layout was
/// encoded with. Every bit pattern is valid, so this never fails.
pub fn decompose(layout: &BitLayout) -> FieldDecomposition {
    let precision = layout.get_precision();
    let raw_exp = layout.get_raw_exponent();
    let mantissa = layout.get_mantissa();
    FieldDecomposition {
        precision,
        sign: layout.get_sign(),
        raw_exp,
        mantissa,
        category: Classification::from_fields(precision, raw_exp, mantissa),
        input: layout.get_input(),
        stored: layout.get_stored(),
    }
}

impl BitLayout {
    /// See `decompose`.
    pub fn decompose(&self) -> FieldDecomposition {
        decompose(self)
    }
}

#[cfg(test)]
use super::cast::encode;

#[test]
fn test_decompose_one() {
    let d = encode(1.0, Precision::Single).decompose();
    assert_eq!(d.get_sign(), 0);
    assert_eq!(d.get_raw_exponent(), 127);
    assert_eq!(d.get_actual_exponent(), 0);
    assert_eq!(d.get_effective_exponent(), 0);
    assert_eq!(d.get_mantissa(), 0);
    assert_eq!(d.get_classification(), Classification::Normalized);
    assert_eq!(d.get_implicit_bit(), Some(1));
    assert!(!d.is_special());
    assert_eq!(d.get_magnitude(), 1.0);
    assert_eq!(d.get_conversion_error(), Some(0.0));
}

#[test]
fn test_decompose_negative() {
    let d = encode(-1.0, Precision::Single).decompose();
    assert_eq!(d.get_sign(), 1);
    assert_eq!(d.get_magnitude(), 1.0);

    let d = encode(-2.5, Precision::Double).decompose();
    assert_eq!(d.get_sign(), 1);
    assert_eq!(d.get_actual_exponent(), 1);
    assert_eq!(d.get_mantissa(), 1 << 50);
    assert_eq!(d.get_bias(), 1023);
}

#[test]
fn test_decompose_zero_and_denormals() {
    let d = encode(0.0, Precision::Single).decompose();
    assert_eq!(d.get_classification(), Classification::Zero);
    assert_eq!(d.get_actual_exponent(), -127);
    assert_eq!(d.get_effective_exponent(), -126);
    assert_eq!(d.get_implicit_bit(), Some(0));
    assert!(d.is_special());

    let d = encode(-0.0, Precision::Double).decompose();
    assert_eq!(d.get_classification(), Classification::Zero);
    assert_eq!(d.get_sign(), 1);

    let d = encode(1e-40, Precision::Single).decompose();
    assert_eq!(d.get_classification(), Classification::Denormalized);
    assert_eq!(d.get_raw_exponent(), 0);
    assert_eq!(d.get_implicit_bit(), Some(0));
    assert_eq!(d.get_effective_exponent(), -126);

    let d = encode(f64::MIN_POSITIVE / 4.0, Precision::Double).decompose();
    assert_eq!(d.get_classification(), Classification::Denormalized);
    assert_eq!(d.get_mantissa(), 1 << 50);
    assert_eq!(d.get_effective_exponent(), -1022);

    // Too small for single precision.
    let d = encode(1e-50, Precision::Single).decompose();
    assert_eq!(d.get_classification(), Classification::Zero);
    assert_eq!(d.get_magnitude(), 1e-50);
    assert_eq!(d.get_conversion_error(), Some(-1e-50));
}

#[test]
fn test_decompose_inf_nan() {
    let d = encode(f64::INFINITY, Precision::Double).decompose();
    assert_eq!(d.get_raw_exponent(), 2047);
    assert_eq!(d.get_mantissa(), 0);
    assert_eq!(d.get_classification(), Classification::Infinity);
    assert_eq!(d.get_implicit_bit(), None);
    assert_eq!(d.get_conversion_error(), None);

    let d = encode(f64::NAN, Precision::Single).decompose();
    assert_eq!(d.get_raw_exponent(), 255);
    assert_ne!(d.get_mantissa(), 0);
    assert_eq!(d.get_classification(), Classification::NaN);

    // Too large for single precision.
    let d = encode(1e300, Precision::Single).decompose();
    assert_eq!(d.get_classification(), Classification::Infinity);
    let d = encode(-1e39, Precision::Single).decompose();
    assert_eq!(d.get_classification(), Classification::Infinity);
    assert_eq!(d.get_sign(), 1);
}

#[cfg(test)]
fn classify_native(layout: &BitLayout) -> Classification {
    use core::num::FpCategory;
    let category = match layout.get_precision() {
        Precision::Single => {
            f32::from_bits(layout.get_bits() as u32).classify()
        }
        Precision::Double => f64::from_bits(layout.get_bits()).classify(),
    };
    match category {
        FpCategory::Nan => Classification::NaN,
        FpCategory::Infinite => Classification::Infinity,
        FpCategory::Zero => Classification::Zero,
        FpCategory::Subnormal => Classification::Denormalized,
        FpCategory::Normal => Classification::Normalized,
    }
}

#[test]
fn test_classification_matches_magnitude() {
    let mut lfsr = super::utils::Lfsr::new();
    for p in [Precision::Single, Precision::Double] {
        for v in super::utils::get_special_test_values() {
            let a = encode(v, p);
            assert_eq!(a.decompose().get_classification(), classify_native(&a));
        }
        for _ in 0..2000 {
            let a = BitLayout::from_bits(p, lfsr.get64());
            assert_eq!(a.decompose().get_classification(), classify_native(&a));
        }
    }

    // Magnitudes beyond the largest finite single are Inf, and those below
    // half of the smallest denormal are zero.
    let sp = Precision::Single;
    let over = f32::MAX as f64 * 2.0;
    let under = 2f64.powi(-151);
    let classify = |v: f64| encode(v, sp).decompose().get_classification();
    assert_eq!(classify(over), Classification::Infinity);
    assert_eq!(classify(-under), Classification::Zero);
    assert_eq!(classify(f32::MAX as f64), Classification::Normalized);
}

#[test]
fn test_reassemble_round_trip() {
    let mut lfsr = super::utils::Lfsr::new();
    for p in [Precision::Single, Precision::Double] {
        for v in super::utils::get_special_test_values() {
            let a = encode(v, p);
            assert_eq!(a.decompose().reassemble(), a);
        }
        for _ in 0..2000 {
            let a = BitLayout::from_bits(p, lfsr.get64());
            let b = a.decompose().reassemble();
            assert_eq!(a.get_bits(), b.get_bits());
            assert_eq!(a.get_precision(), b.get_precision());
        }
    }
}

#[test]
fn test_decompose_idempotent() {
    for v in super::utils::get_special_test_values() {
        let a = encode(v, Precision::Single);
        assert_eq!(a.decompose(), a.decompose());
        assert_eq!(decompose(&a), a.decompose());
    }
}
