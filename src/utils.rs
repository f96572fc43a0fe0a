//! This file contains simple helper functions and test helpers.

/// Returns a mask full of 1s, of `b` bits.
pub fn mask(b: usize) -> u64 {
    if b >= 64 {
        return u64::MAX;
    }
    (1u64 << b) - 1
}

/// Format the low `len` bits of `val` as a string of '0' and '1', most
/// significant bit first.
pub fn to_bit_string(val: u64, len: usize) -> String {
    (0..len)
        .rev()
        .map(|i| if (val >> i) & 1 == 1 { '1' } else { '0' })
        .collect()
}

#[test]
fn test_masking() {
    assert_eq!(mask(0), 0x0);
    assert_eq!(mask(1), 0x1);
    assert_eq!(mask(8), 255);
    assert_eq!(mask(52), 0xf_ffff_ffff_ffff);
    assert_eq!(mask(64), u64::MAX);
}

#[test]
fn test_bit_string() {
    assert_eq!(to_bit_string(0, 0), "");
    assert_eq!(to_bit_string(0b101, 3), "101");
    assert_eq!(to_bit_string(0b101, 5), "00101");
    assert_eq!(to_bit_string(u64::MAX, 64).len(), 64);
}

#[cfg(test)]
/// Returns list of interesting values that various tests use to catch edge cases.
pub fn get_special_test_values() -> [f64; 24] {
    [
        -f64::NAN,
        f64::NAN,
        f64::INFINITY,
        f64::NEG_INFINITY,
        f64::EPSILON,
        -f64::EPSILON,
        0.000000000000000000000000000000000000001,
        f64::MIN,
        f64::MAX,
        f64::MIN_POSITIVE,
        f32::MAX as f64,
        f32::MIN_POSITIVE as f64,
        std::f64::consts::PI,
        std::f64::consts::LN_2,
        std::f64::consts::SQRT_2,
        std::f64::consts::E,
        0.0,
        -0.0,
        10.,
        -10.,
        -0.00001,
        0.1,
        1e-45,
        355. / 113.,
    ]
}

#[cfg(test)]
// Linear-feedback shift register. Tests use it as a deterministic source of
// random bit patterns.
pub struct Lfsr {
    state: u32,
}

#[cfg(test)]
impl Lfsr {
    pub fn new() -> Lfsr {
        Lfsr { state: 0x13371337 }
    }

    fn step(&mut self) {
        let a = (self.state >> 24) & 1;
        let b = (self.state >> 23) & 1;
        let c = (self.state >> 22) & 1;
        let d = (self.state >> 17) & 1;
        self.state = (self.state << 1) | (a ^ b ^ c ^ d ^ 1);
    }

    fn get(&mut self) -> u32 {
        let mut res: u32 = 0;
        for _ in 0..32 {
            self.step();
            res = (res << 1) ^ (self.state & 0x1);
        }
        res
    }

    pub fn get64(&mut self) -> u64 {
        ((self.get() as u64) << 32) | self.get() as u64
    }
}

#[test]
fn test_lfsr_balance() {
    let mut lfsr = Lfsr::new();
    let mut ones = 0;
    for _ in 0..5000 {
        ones += lfsr.get64().count_ones();
    }
    // Roughly half of the bits should be set.
    let items = 5000 * 64;
    assert!((ones as f64) < (0.55 * items as f64));
    assert!((ones as f64) > (0.45 * items as f64));
}
