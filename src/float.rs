use super::utils::mask;

/// Defines the two supported IEEE-754 binary interchange formats.
/// See IEEE754-2019 Table 3.5 — Binary interchange format parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Precision {
    /// binary32: 1 sign bit, 8 exponent bits, 23 mantissa bits.
    Single,
    /// binary64: 1 sign bit, 11 exponent bits, 52 mantissa bits.
    Double,
}

impl Precision {
    /// Returns the length of the exponent field in bits.
    pub const fn get_exponent_len(&self) -> usize {
        match self {
            Precision::Single => 8,
            Precision::Double => 11,
        }
    }

    /// Returns the length of the stored mantissa in bits (without the
    /// implicit bit).
    pub const fn get_mantissa_len(&self) -> usize {
        match self {
            Precision::Single => 23,
            Precision::Double => 52,
        }
    }

    /// Returns the total width of the encoding in bits.
    pub const fn get_width(&self) -> usize {
        1 + self.get_exponent_len() + self.get_mantissa_len()
    }

    /// Returns the number of bytes in the encoding.
    pub const fn get_byte_len(&self) -> usize {
        self.get_width() / 8
    }

    /// Returns the exponent bias for the format, as a positive number.
    /// https://en.wikipedia.org/wiki/IEEE_754#Basic_and_interchange_formats
    pub fn get_bias(&self) -> i64 {
        let e = self.get_exponent_len();
        ((1u64 << (e - 1)) - 1) as i64
    }

    /// Returns the raw exponent value with all bits set, which is reserved
    /// for Inf and NaN.
    pub fn get_exponent_all_ones(&self) -> u64 {
        mask(self.get_exponent_len())
    }

    /// Returns a human readable name ("single" or "double").
    pub fn as_str(&self) -> &'static str {
        match self {
            Precision::Single => "single",
            Precision::Double => "double",
        }
    }
}

/// The kind of value that a bit pattern encodes. Unlike the classification
/// that arithmetic code usually needs, zero and denormals are kept apart here
/// because they are explained differently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Classification {
    Zero,
    Denormalized,
    Normalized,
    Infinity,
    NaN,
}

impl Classification {
    /// Classify the raw exponent and mantissa fields of `precision`.
    pub fn from_fields(precision: Precision, exp: u64, mantissa: u64) -> Self {
        if exp == 0 {
            if mantissa == 0 {
                return Classification::Zero;
            }
            return Classification::Denormalized;
        }
        if exp == precision.get_exponent_all_ones() {
            if mantissa == 0 {
                return Classification::Infinity;
            }
            return Classification::NaN;
        }
        Classification::Normalized
    }

    /// Returns true for every pattern that is not a normal number.
    pub fn is_special(&self) -> bool {
        !matches!(self, Classification::Normalized)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Classification::Zero => "Zero",
            Classification::Denormalized => "Denormalized",
            Classification::Normalized => "Normalized",
            Classification::Infinity => "Infinity",
            Classification::NaN => "NaN",
        }
    }
}

/// The encoded bit pattern of a number. The bits are right-aligned in a
/// `u64`; for single precision the upper 32 bits are always zero. The layout
/// also remembers the value it was encoded from, which may differ from the
/// stored value when the format could not represent it exactly.
#[derive(Debug, Clone, Copy)]
pub struct BitLayout {
    precision: Precision,
    bits: u64,
    input: f64,
}

impl BitLayout {
    pub(crate) fn new(precision: Precision, bits: u64, input: f64) -> Self {
        debug_assert!(bits <= mask(precision.get_width()));
        BitLayout {
            precision,
            bits,
            input,
        }
    }

    /// Wrap a raw bit pattern. Bits beyond the width of `precision` are
    /// dropped. The input value is set to the value the pattern decodes to.
    pub fn from_bits(precision: Precision, bits: u64) -> Self {
        let bits = bits & mask(precision.get_width());
        let input = decode_bits(precision, bits);
        Self::new(precision, bits, input)
    }

    /// Returns the precision of the encoding.
    pub fn get_precision(&self) -> Precision {
        self.precision
    }

    /// Returns the raw bits, right-aligned.
    pub fn get_bits(&self) -> u64 {
        self.bits
    }

    /// Returns the value that was encoded.
    pub fn get_input(&self) -> f64 {
        self.input
    }

    /// Returns the value that the bit pattern actually stores.
    pub fn get_stored(&self) -> f64 {
        decode_bits(self.precision, self.bits)
    }

    /// Returns the sign bit (0 or 1).
    pub fn get_sign(&self) -> u8 {
        (self.bits >> (self.precision.get_width() - 1)) as u8 & 1
    }

    /// Returns the raw (biased) exponent field.
    pub fn get_raw_exponent(&self) -> u64 {
        let m = self.precision.get_mantissa_len();
        (self.bits >> m) & mask(self.precision.get_exponent_len())
    }

    /// Returns the stored mantissa field, without the implicit bit.
    pub fn get_mantissa(&self) -> u64 {
        self.bits & mask(self.precision.get_mantissa_len())
    }

    /// Returns the big-endian bytes of the encoding (4 or 8 bytes).
    pub fn to_be_bytes(&self) -> Vec<u8> {
        let len = self.precision.get_byte_len();
        self.bits.to_be_bytes()[8 - len..].to_vec()
    }
}

/// Two layouts are equal if they hold the same pattern and were encoded from
/// the same value. Values are compared by bits so that NaN inputs compare
/// equal to themselves.
impl PartialEq for BitLayout {
    fn eq(&self, other: &Self) -> bool {
        self.precision == other.precision
            && self.bits == other.bits
            && self.input.to_bits() == other.input.to_bits()
    }
}

impl Eq for BitLayout {}

/// Interpret `bits` as a number of the format `precision`.
pub(crate) fn decode_bits(precision: Precision, bits: u64) -> f64 {
    match precision {
        Precision::Single => f32::from_bits(bits as u32) as f64,
        Precision::Double => f64::from_bits(bits),
    }
}

#[test]
fn test_precision_parameters() {
    assert_eq!(Precision::Single.get_bias(), 127);
    assert_eq!(Precision::Double.get_bias(), 1023);
    assert_eq!(Precision::Single.get_width(), 32);
    assert_eq!(Precision::Double.get_width(), 64);
    assert_eq!(Precision::Single.get_byte_len(), 4);
    assert_eq!(Precision::Double.get_byte_len(), 8);
    assert_eq!(Precision::Single.get_exponent_all_ones(), 255);
    assert_eq!(Precision::Double.get_exponent_all_ones(), 2047);
}

#[test]
fn test_classify_fields() {
    use Classification::*;
    let sp = Precision::Single;
    assert_eq!(Classification::from_fields(sp, 0, 0), Zero);
    assert_eq!(Classification::from_fields(sp, 0, 1), Denormalized);
    assert_eq!(Classification::from_fields(sp, 1, 0), Normalized);
    assert_eq!(Classification::from_fields(sp, 254, 5), Normalized);
    assert_eq!(Classification::from_fields(sp, 255, 0), Infinity);
    assert_eq!(Classification::from_fields(sp, 255, 1 << 22), NaN);

    // 255 is an ordinary exponent for double precision.
    let dp = Precision::Double;
    assert_eq!(Classification::from_fields(dp, 255, 0), Normalized);
    assert_eq!(Classification::from_fields(dp, 2047, 0), Infinity);
    assert_eq!(Classification::from_fields(dp, 2047, 3), NaN);

    assert!(Zero.is_special());
    assert!(Denormalized.is_special());
    assert!(!Normalized.is_special());
    assert!(NaN.is_special());
}

#[test]
fn test_layout_fields() {
    let a = BitLayout::from_bits(Precision::Single, 0xc0490fdb);
    assert_eq!(a.get_sign(), 1);
    assert_eq!(a.get_raw_exponent(), 128);
    assert_eq!(a.get_mantissa(), 0x490fdb);
    assert_eq!(a.to_be_bytes(), vec![0xc0, 0x49, 0x0f, 0xdb]);
    assert_eq!(a.get_input(), -core::f32::consts::PI as f64);

    // Bits beyond the format are dropped.
    let b = BitLayout::from_bits(Precision::Single, 0xffff_ffff_3f80_0000);
    assert_eq!(b.get_bits(), 0x3f80_0000);
    assert_eq!(b.get_stored(), 1.0);

    let c = BitLayout::from_bits(Precision::Double, 0x8000_0000_0000_0000);
    assert_eq!(c.get_sign(), 1);
    assert_eq!(c.get_raw_exponent(), 0);
    assert_eq!(c.to_be_bytes().len(), 8);
}
