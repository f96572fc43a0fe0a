use super::float::{BitLayout, Precision};
use super::utils::mask;
use core::cmp::Ordering;

/// Describes the bits that were shifted out of a significand, relative to
/// half of the last kept bit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LossFraction {
    ExactlyZero,  //0000000
    LessThanHalf, //0xxxxxx
    ExactlyHalf,  //1000000
    MoreThanHalf, //1xxxxxx
}

impl LossFraction {
    pub fn is_exactly_zero(&self) -> bool {
        matches!(self, Self::ExactlyZero)
    }
    pub fn is_exactly_half(&self) -> bool {
        matches!(self, Self::ExactlyHalf)
    }
    pub fn is_mt_half(&self) -> bool {
        matches!(self, Self::MoreThanHalf)
    }
}

/// Shift `val` right by `bits`, and report the loss. `val` must fit in 63
/// bits, so shifting by 64 or more always loses less than half.
pub(crate) fn shift_right_with_loss(val: u64, bits: u32) -> (u64, LossFraction) {
    if val == 0 || bits == 0 {
        return (val, LossFraction::ExactlyZero);
    }
    if bits >= 64 {
        return (0, LossFraction::LessThanHalf);
    }
    let lost = val & mask(bits as usize);
    if lost == 0 {
        return (val >> bits, LossFraction::ExactlyZero);
    }
    let half = 1u64 << (bits - 1);
    let loss = match lost.cmp(&half) {
        Ordering::Less => LossFraction::LessThanHalf,
        Ordering::Equal => LossFraction::ExactlyHalf,
        Ordering::Greater => LossFraction::MoreThanHalf,
    };
    (val >> bits, loss)
}

/// Returns true if the truncated significand `val` needs to be incremented
/// under round-to-nearest-even.
fn need_round_away_from_zero(val: u64, loss: LossFraction) -> bool {
    if loss.is_exactly_zero() {
        return false;
    }
    if loss.is_mt_half() {
        return true;
    }
    loss.is_exactly_half() && (val & 1) == 1
}

/// Narrow the binary64 pattern `bits` into a binary32 pattern, rounding to
/// the nearest even value. This matches the hardware conversion for every
/// input except the payload of NaNs, which is truncated and made quiet.
pub(crate) fn narrow_to_single(bits: u64) -> u32 {
    let dp = Precision::Double;
    let sp = Precision::Single;
    let dp_mantissa = dp.get_mantissa_len();
    let sp_mantissa = sp.get_mantissa_len();

    let sign = ((bits >> (dp.get_width() - 1)) as u32) << (sp.get_width() - 1);
    let biased_exp = (bits >> dp_mantissa) & dp.get_exponent_all_ones();
    let fraction = bits & mask(dp_mantissa);
    let sp_inf = (sp.get_exponent_all_ones() as u32) << sp_mantissa;

    // Check for NaN/Inf.
    if biased_exp == dp.get_exponent_all_ones() {
        if fraction == 0 {
            return sign | sp_inf;
        }
        // Keep the high bits of the payload and set the quiet bit.
        let payload = (fraction >> (dp_mantissa - sp_mantissa)) as u32;
        return sign | sp_inf | payload | (1 << (sp_mantissa - 1));
    }

    // Zero, and binary64 denormals, which are all far below half of the
    // smallest binary32 denormal.
    if biased_exp == 0 {
        return sign;
    }

    let exp = biased_exp as i64 - dp.get_bias();
    if exp > sp.get_bias() {
        return sign | sp_inf;
    }

    // Add the implicit bit.
    let significand = fraction | (1u64 << dp_mantissa);

    // Values below the minimal exponent become denormals, and lose one more
    // bit for every step below it.
    let min_exp = 1 - sp.get_bias();
    let extra = (min_exp - exp).max(0);
    let shift = (dp_mantissa - sp_mantissa) as i64 + extra;
    let (mut m, loss) = shift_right_with_loss(significand, shift.min(64) as u32);
    if need_round_away_from_zero(m, loss) {
        m += 1;
    }

    // `m` still holds the implicit bit, so it is added on top of the biased
    // exponent minus one. A carry out of the mantissa moves into the exponent
    // field, which turns the largest values into Inf and the largest
    // denormals into the smallest normal.
    let biased = (exp.max(min_exp) + sp.get_bias()) as u64;
    let encoded = ((biased - 1) << sp_mantissa) + m;
    debug_assert!(encoded <= sp_inf as u64);
    sign | encoded as u32
}

/// Encode `value` in the format `precision`. Narrowing to single precision
/// rounds to the nearest even value, overflows to Inf and underflows to
/// denormals or zero. This never fails.
pub fn encode(value: f64, precision: Precision) -> BitLayout {
    let bits = match precision {
        Precision::Single => narrow_to_single(value.to_bits()) as u64,
        Precision::Double => value.to_bits(),
    };
    BitLayout::new(precision, bits, value)
}

#[cfg(test)]
fn check_matches_hardware(v: f64) {
    let res = narrow_to_single(v.to_bits());
    let expected = v as f32;
    if v.is_nan() {
        assert!(f32::from_bits(res).is_nan(), "{:x}", v.to_bits());
        return;
    }
    assert_eq!(res, expected.to_bits(), "narrowing {:x}", v.to_bits());
}

#[test]
fn shift_right_fraction() {
    let res = shift_right_with_loss(0b10000000, 3);
    assert_eq!(res.0, 0b10000);
    assert!(res.1.is_exactly_zero());

    let res = shift_right_with_loss(0b10000111, 3);
    assert!(res.1.is_mt_half());

    let res = shift_right_with_loss(0b10000100, 3);
    assert!(res.1.is_exactly_half());

    let res = shift_right_with_loss(0b10000001, 3);
    assert_eq!(res.1, LossFraction::LessThanHalf);

    let res = shift_right_with_loss(0b1, 80);
    assert_eq!(res, (0, LossFraction::LessThanHalf));
}

#[test]
fn test_encode_double_is_identity() {
    for v in super::utils::get_special_test_values() {
        let a = encode(v, Precision::Double);
        assert_eq!(a.get_bits(), v.to_bits());
        assert_eq!(a.get_input().to_bits(), v.to_bits());
    }
}

#[test]
fn test_narrow_special_values() {
    for v in super::utils::get_special_test_values() {
        check_matches_hardware(v);
    }
    assert_eq!(narrow_to_single((-0.0f64).to_bits()), 0x8000_0000);
    assert_eq!(narrow_to_single(f64::NEG_INFINITY.to_bits()), 0xff80_0000);
    let nan = narrow_to_single((-f64::NAN).to_bits());
    assert_eq!(nan >> 31, 1);
    assert_ne!(nan & 0x7f_ffff, 0);
}

#[test]
fn test_narrow_ties_to_even() {
    let ulp = 2f64.powi(-23);
    // Exactly half way between 1.0 and the next value: round to even (down).
    check_matches_hardware(1.0 + ulp / 2.0);
    assert_eq!(narrow_to_single((1.0 + ulp / 2.0).to_bits()), 0x3f80_0000);
    // Half way between an odd and an even mantissa: round up.
    check_matches_hardware(1.0 + ulp + ulp / 2.0);
    assert_eq!(
        narrow_to_single((1.0 + ulp + ulp / 2.0).to_bits()),
        0x3f80_0002
    );
    // Just above half: round up.
    check_matches_hardware(1.0 + ulp / 2.0 + ulp / 1024.0);
    // Carry out of the mantissa: 1.11...1 rounds to 2.0.
    check_matches_hardware(2.0 - ulp / 4.0);
    assert_eq!(narrow_to_single((2.0 - ulp / 4.0).to_bits()), 0x4000_0000);
    for v in [0.1, 0.2, 0.3, 1.0 / 3.0, 14151241515., 0.0000000001] {
        check_matches_hardware(v);
        check_matches_hardware(-v);
    }
}

#[test]
fn test_narrow_overflow() {
    let max = f32::MAX as f64;
    let half_ulp = 2f64.powi(103);
    check_matches_hardware(max);
    check_matches_hardware(max + half_ulp / 2.0);
    check_matches_hardware(max + half_ulp);
    check_matches_hardware(2f64.powi(128));
    check_matches_hardware(-2f64.powi(200));
    assert_eq!(narrow_to_single((max + half_ulp).to_bits()), 0x7f80_0000);
    assert_eq!(narrow_to_single(1e39f64.to_bits()), 0x7f80_0000);
    assert_eq!(narrow_to_single((-1e39f64).to_bits()), 0xff80_0000);
}

#[test]
fn test_narrow_denormals() {
    let min_denormal = 2f64.powi(-149);
    check_matches_hardware(min_denormal);
    check_matches_hardware(min_denormal / 2.0);
    check_matches_hardware(min_denormal * 0.75);
    check_matches_hardware(min_denormal * 1.5);
    check_matches_hardware(min_denormal * 2.5);
    check_matches_hardware(f32::MIN_POSITIVE as f64 - min_denormal / 2.0);
    check_matches_hardware(f32::MIN_POSITIVE as f64 - min_denormal / 4.0);
    check_matches_hardware(1e-300);
    check_matches_hardware(f64::from_bits(1));
    assert_eq!(narrow_to_single(min_denormal.to_bits()), 1);
    // Exactly half of the smallest denormal rounds to (even) zero.
    assert_eq!(narrow_to_single((min_denormal / 2.0).to_bits()), 0);
    assert_eq!(narrow_to_single((min_denormal * 1.5).to_bits()), 2);
}

#[test]
fn test_narrow_all_f32() {
    // Every f32 with 16 bits of payload survives a round trip through f64.
    for i in 0..(1u64 << 16) {
        let in_f = f32::from_bits((i << 16) as u32);
        let out = narrow_to_single((in_f as f64).to_bits());
        assert!(in_f.is_nan() || (in_f.to_bits() == out));
    }
}

#[test]
fn test_narrow_random_patterns() {
    let mut lfsr = super::utils::Lfsr::new();
    for _ in 0..20000 {
        let bits = lfsr.get64();
        check_matches_hardware(f64::from_bits(bits));

        // Move the exponent into the interesting range around binary32.
        let exp = (bits >> 52) % 300 + (1023 - 160);
        let bits = (bits & !(0x7ffu64 << 52)) | (exp << 52);
        check_matches_hardware(f64::from_bits(bits));
    }
}
