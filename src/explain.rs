//! Step-by-step explanation of a conversion, as plain text.

use super::convert::Conversion;
use super::float::{Classification, Precision};
use core::fmt::Display;

/// One step of the explanation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    title: String,
    lines: Vec<String>,
    note: Option<String>,
}

impl Step {
    fn new(title: &str, lines: Vec<String>, note: Option<String>) -> Self {
        Step {
            title: title.to_string(),
            lines,
            note,
        }
    }

    /// Returns the title of the step, e.g. "2. Sign Bit".
    pub fn get_title(&self) -> &str {
        &self.title
    }

    /// Returns the lines of the step, in order.
    pub fn get_lines(&self) -> &[String] {
        &self.lines
    }

    pub fn get_note(&self) -> Option<&str> {
        self.note.as_deref()
    }
}

impl Display for Step {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        writeln!(f, "{}", self.title)?;
        for line in &self.lines {
            writeln!(f, "  {}", line)?;
        }
        if let Some(note) = &self.note {
            writeln!(f, "  ({})", note)?;
        }
        Ok(())
    }
}

/// Format `value` for humans. Very large and very small values use the
/// scientific notation.
fn human(value: f64) -> String {
    if !value.is_finite() || value == 0.0 {
        return format!("{}", value);
    }
    let exp = Conversion::new(value, Precision::Double).actual_exponent();
    if exp.abs() > 52 {
        format!("{:e}", value)
    } else {
        format!("{}", value)
    }
}

/// Drop the trailing zeros of a mantissa, keeping at least one digit.
fn trim_mantissa(bits: &str) -> &str {
    let trimmed = bits.trim_end_matches('0');
    if trimmed.is_empty() {
        &bits[..1]
    } else {
        trimmed
    }
}

/// Build the explanation of `conv`, one step per stage of the encoding. The
/// last step is only present for zero, denormals, Inf and NaN.
pub fn explain(conv: &Conversion) -> Vec<Step> {
    let fields = conv.get_fields();
    let input = conv.get_input();
    let sign = conv.sign_bit();
    let exp_bits = conv.exponent_bits();
    let mantissa_bits = conv.mantissa_bits();
    let bias = conv.bias();
    let raw_exp = fields.get_raw_exponent();
    let actual = conv.actual_exponent();
    let effective = fields.get_effective_exponent();
    let category = conv.classification();
    let negative = fields.get_sign() == 1;
    // The sign of a NaN carries no meaning.
    let sign_word = match (category, negative) {
        (Classification::NaN, _) => "",
        (_, true) => " (negative)",
        (_, false) => " (positive)",
    };

    let mut steps = Vec::new();

    steps.push(Step::new(
        "1. Input Number",
        vec![format!("{}{}", human(input), sign_word)],
        None,
    ));

    steps.push(Step::new(
        "2. Sign Bit",
        vec![format!("Sign bit = {}{}", sign, sign_word)],
        Some(
            "The sign bit is 0 for positive numbers and 1 for negative numbers"
                .to_string(),
        ),
    ));

    steps.push(Step::new(
        "3. Absolute Value",
        vec![format!("|{}| = {}", human(input), human(fields.get_magnitude()))],
        Some("The remaining fields encode the absolute value".to_string()),
    ));

    let normalized = match category {
        Classification::Normalized => format!(
            "1.{} x 2^{}",
            trim_mantissa(&mantissa_bits),
            effective
        ),
        Classification::Denormalized => format!(
            "0.{} x 2^{}",
            trim_mantissa(&mantissa_bits),
            effective
        ),
        Classification::Zero => "0 has no normalized form".to_string(),
        Classification::Infinity | Classification::NaN => {
            format!("{} has no finite binary form", category)
        }
    };
    let normalize_note = if category == Classification::Denormalized {
        "Too small to normalize: the leading bit is 0 and the exponent is \
         fixed at the minimum"
    } else {
        "Move the binary point so there's exactly one 1 before it"
    };
    steps.push(Step::new(
        "4. Normalize to Scientific Notation",
        vec![normalized],
        Some(normalize_note.to_string()),
    ));

    steps.push(Step::new(
        "5. Calculate Biased Exponent",
        vec![
            format!("Exponent bits (binary): {}", exp_bits),
            format!("Exponent value (decimal): {}", raw_exp),
            format!("Actual exponent: {} - {} = {}", raw_exp, bias, actual),
        ],
        Some(format!(
            "The exponent is stored with a bias of {} for {} precision",
            bias,
            conv.get_precision().as_str()
        )),
    ));

    let implicit_note = match fields.get_implicit_bit() {
        Some(1) => "The mantissa is the fraction after the implicit leading 1",
        Some(_) => "The mantissa is the fraction after an implicit leading 0",
        None => "The mantissa only tells Inf (all zeros) from NaN",
    };
    steps.push(Step::new(
        "6. Extract Mantissa (Fraction)",
        vec![
            format!("Mantissa bits: {}", mantissa_bits),
            format!("Stored mantissa length: {} bits", mantissa_bits.len()),
        ],
        Some(implicit_note.to_string()),
    ));

    let formula = match category {
        Classification::Zero | Classification::Denormalized => format!(
            "(-1)^{} x 2^{} x (0 + fraction)",
            sign, effective
        ),
        Classification::Normalized => {
            format!("(-1)^{} x 2^{} x (1 + fraction)", sign, actual)
        }
        Classification::Infinity | Classification::NaN => {
            format!("{} has no finite binary form", category)
        }
    };
    let mut lines = vec![
        format!("Formula: {}", formula),
        format!("Sign: {}", sign),
        format!("Exponent: {}", exp_bits),
        format!("Mantissa: {}", mantissa_bits),
        format!("Hex: {}", conv.hex()),
    ];
    if let Some(err) = fields.get_conversion_error() {
        if err != 0.0 {
            lines.push(format!(
                "Stored value: {} (error {})",
                human(fields.get_stored()),
                human(err)
            ));
        }
    }
    steps.push(Step::new("7. Final IEEE 754 Representation", lines, None));

    let special = match category {
        Classification::Zero => Some((
            "Zero",
            "When the exponent and the mantissa are all zeros, this represents \
             zero",
        )),
        Classification::Denormalized => Some((
            "Denormalized Number",
            "When the exponent is all zeros and the mantissa is not, this \
             represents a denormalized number",
        )),
        Classification::Infinity => Some((
            "Infinity",
            "When the exponent is all ones and the mantissa is all zeros, this \
             represents Infinity",
        )),
        Classification::NaN => Some((
            "NaN",
            "When the exponent is all ones and the mantissa is not all zeros, \
             this represents Not a Number (NaN)",
        )),
        Classification::Normalized => None,
    };
    if let Some((name, text)) = special {
        steps.push(Step::new(
            &format!("Special Case: {}", name),
            vec![text.to_string()],
            None,
        ));
    }

    steps
}

impl Conversion {
    /// See `explain`.
    pub fn explain(&self) -> Vec<Step> {
        explain(self)
    }
}

#[test]
fn test_explain_normal() {
    let steps = Conversion::new(-6.5, Precision::Single).explain();
    assert_eq!(steps.len(), 7);
    assert_eq!(steps[0].get_lines()[0], "-6.5 (negative)");
    assert_eq!(steps[1].get_lines()[0], "Sign bit = 1 (negative)");
    assert_eq!(steps[2].get_lines()[0], "|-6.5| = 6.5");
    assert_eq!(steps[3].get_lines()[0], "1.101 x 2^2");
    assert_eq!(steps[4].get_lines()[2], "Actual exponent: 129 - 127 = 2");
    assert_eq!(
        steps[4].get_note(),
        Some("The exponent is stored with a bias of 127 for single precision")
    );
    assert_eq!(steps[5].get_lines()[1], "Stored mantissa length: 23 bits");
    assert_eq!(steps[6].get_lines()[0], "Formula: (-1)^1 x 2^2 x (1 + fraction)");
    assert_eq!(steps[6].get_lines()[4], "Hex: 0xC0D00000");
}

#[test]
fn test_explain_inexact() {
    let steps = Conversion::new(0.1, Precision::Single).explain();
    assert_eq!(steps.len(), 7);
    assert!(steps[6].get_lines().last().unwrap().starts_with("Stored value: "));

    let steps = Conversion::new(0.1, Precision::Double).explain();
    assert!(steps[6].get_lines().last().unwrap().starts_with("Hex: "));
}

#[test]
fn test_explain_denormal() {
    let steps = Conversion::new(1e-40, Precision::Single).explain();
    assert_eq!(steps.len(), 8);
    assert!(steps[3].get_lines()[0].starts_with("0."));
    assert!(steps[3].get_lines()[0].ends_with(" x 2^-126"));
    assert_eq!(steps[4].get_lines()[2], "Actual exponent: 0 - 127 = -127");
    assert_eq!(
        steps[5].get_note(),
        Some("The mantissa is the fraction after an implicit leading 0")
    );
    assert_eq!(
        steps[6].get_lines()[0],
        "Formula: (-1)^0 x 2^-126 x (0 + fraction)"
    );
    assert_eq!(steps[7].get_title(), "Special Case: Denormalized Number");
}

#[test]
fn test_explain_special_values() {
    let steps = Conversion::new(0.0, Precision::Double).explain();
    assert_eq!(steps.len(), 8);
    assert_eq!(steps[3].get_lines()[0], "0 has no normalized form");
    assert_eq!(
        steps[6].get_lines()[0],
        "Formula: (-1)^0 x 2^-1022 x (0 + fraction)"
    );
    assert_eq!(steps[7].get_title(), "Special Case: Zero");

    let steps = Conversion::new(-0.0, Precision::Single).explain();
    assert_eq!(steps[0].get_lines()[0], "-0 (negative)");
    assert_eq!(steps[3].get_lines()[0], "0 has no normalized form");

    let steps = Conversion::new(f64::NEG_INFINITY, Precision::Single).explain();
    assert_eq!(steps[3].get_lines()[0], "Infinity has no finite binary form");
    assert_eq!(
        steps[6].get_lines()[0],
        "Formula: Infinity has no finite binary form"
    );
    assert_eq!(steps[7].get_title(), "Special Case: Infinity");

    let steps = Conversion::new(f64::NAN, Precision::Double).explain();
    assert_eq!(steps[0].get_lines()[0], "NaN");
    assert_eq!(steps[1].get_lines()[0], "Sign bit = 0");
    assert_eq!(
        steps[6].get_lines()[0],
        "Formula: NaN has no finite binary form"
    );
    assert_eq!(steps[7].get_title(), "Special Case: NaN");

    let steps = Conversion::new(-f64::NAN, Precision::Single).explain();
    assert_eq!(steps[0].get_lines()[0], "NaN");
    assert_eq!(steps[1].get_lines()[0], "Sign bit = 1");
    assert_eq!(
        steps[5].get_note(),
        Some("The mantissa only tells Inf (all zeros) from NaN")
    );
}

#[test]
fn test_step_display() {
    let step = Step::new("Title", vec!["a".to_string()], Some("n".to_string()));
    assert_eq!(format!("{}", step), "Title\n  a\n  (n)\n");
    assert_eq!(step.get_title(), "Title");
    assert_eq!(step.get_lines(), ["a".to_string()]);
    assert_eq!(step.get_note(), Some("n"));
    assert_eq!(human(1e300), "1e300");
    assert_eq!(human(0.5), "0.5");
    assert_eq!(trim_mantissa("000"), "0");
    assert_eq!(trim_mantissa("1010"), "101");
}
