use crate::{Conversion, Error, Precision};
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

impl From<Error> for PyErr {
    fn from(err: Error) -> PyErr {
        PyValueError::new_err(err.to_string())
    }
}

/// The result of converting a decimal number to IEEE-754.
///
/// Holds the encoded bit pattern and the decoded meaning of each field.
#[pyclass(name = "Conversion")]
struct PyConversion {
    inner: Conversion,
}

#[pymethods]
impl PyConversion {
    /// Returns the encoding as hex, with a 0x prefix.
    fn hex(&self) -> String {
        self.inner.hex()
    }
    /// Returns the bits, with spaces between the sign, exponent and mantissa.
    fn binary(&self) -> String {
        self.inner.binary()
    }
    /// Returns the sign bit ("0" or "1").
    fn sign_bit(&self) -> String {
        self.inner.sign_bit()
    }
    /// Returns the exponent field as a bit string.
    fn exponent_bits(&self) -> String {
        self.inner.exponent_bits()
    }
    /// Returns the mantissa field as a bit string.
    fn mantissa_bits(&self) -> String {
        self.inner.mantissa_bits()
    }
    /// Returns the raw exponent minus the bias.
    fn actual_exponent(&self) -> i64 {
        self.inner.actual_exponent()
    }
    /// Returns the exponent bias (127 or 1023).
    fn bias(&self) -> i64 {
        self.inner.bias()
    }
    /// Returns one of "Zero", "Denormalized", "Normalized", "Infinity", "NaN".
    fn classification(&self) -> String {
        self.inner.classification().as_str().to_string()
    }
    /// Returns true for zero, denormals, Inf and NaN.
    fn is_special(&self) -> bool {
        self.inner.is_special()
    }
    /// Returns the value that the bit pattern stores.
    fn stored(&self) -> f64 {
        self.inner.get_fields().get_stored()
    }
    /// Returns the step-by-step explanation, one string per step.
    fn explain(&self) -> Vec<String> {
        self.inner.explain().iter().map(|s| s.to_string()).collect()
    }
    fn __str__(&self) -> String {
        self.inner.binary()
    }
    fn __repr__(&self) -> String {
        format!(
            "Conversion({}, {})",
            self.inner.hex(),
            self.inner.classification()
        )
    }
}

/// Converts the decimal number in `text` to IEEE-754.
///
/// Args:
///     text: The decimal number, e.g. "0.1", "-1e10", "inf" or "nan"
///     precision: "32" (single) or "64" (double)
///
/// Raises ValueError if the text or the precision is invalid.
#[pyfunction]
fn convert(text: &str, precision: &str) -> PyResult<PyConversion> {
    let precision: Precision = precision.parse()?;
    Ok(PyConversion {
        inner: crate::convert(text, precision)?,
    })
}

/// Converts the float `val` to IEEE-754.
///
/// Args:
///     val: The number
///     precision: "32" (single) or "64" (double)
#[pyfunction]
fn from_fp64(val: f64, precision: &str) -> PyResult<PyConversion> {
    let precision: Precision = precision.parse()?;
    Ok(PyConversion {
        inner: Conversion::new(val, precision),
    })
}

#[pymodule]
fn _floatcodec(_py: Python, m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyConversion>()?;
    m.add_function(wrap_pyfunction!(convert, m)?)?;
    m.add_function(wrap_pyfunction!(from_fp64, m)?)?;
    Ok(())
}
