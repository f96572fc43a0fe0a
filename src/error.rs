use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The text is empty or is not a number.
    #[error("{0:?} is not a valid decimal number")]
    InvalidInput(String),

    /// The precision selection is not one of the supported formats.
    #[error("{0:?} is not a supported precision (expected 32 or 64)")]
    UnknownPrecision(String),
}
