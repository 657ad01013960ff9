//! Error types shared by every module of the crate.

/// Errors raised while configuring a code or shaping its inputs.
///
/// Decoding that fails to reach a fixed point is not an error: it is
/// reported through [`crate::ecc::DecodeStatus::MaxIterationsExceeded`].
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    /// The code variant descriptor is inconsistent.
    #[error("invalid code variant: {0}")]
    InvalidCodeVariant(String),

    /// A row or data word has the wrong number of bits.
    #[error("length mismatch: expected {expected} bits, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    /// A block was requested without any data rows.
    #[error("block must contain at least one data row")]
    EmptyBlock,

    /// A block does not have the shape the code expects.
    #[error("block shape mismatch: {0}")]
    ShapeMismatch(String),

    /// A bit-flip probability outside `[0, 1]`.
    #[error("invalid probability {0}, expected a value in [0, 1]")]
    InvalidProbability(f64),

    /// Any other invalid parameter.
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

/// Result type used throughout the crate
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = Error::LengthMismatch {
            expected: 7,
            actual: 5,
        };
        assert_eq!(
            err.to_string(),
            "length mismatch: expected 7 bits, got 5"
        );
        assert_eq!(
            Error::EmptyBlock.to_string(),
            "block must contain at least one data row"
        );
        assert!(Error::InvalidProbability(1.5).to_string().contains("1.5"));
    }
}
