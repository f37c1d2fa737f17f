//! Error taxonomy shared by every aligner in the crate.

use crate::types::Symbol;
use thiserror::Error;

/// Errors that can occur while configuring or running an alignment
#[derive(Debug, Error)]
pub enum AlignError {
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Empty sequence")]
    EmptySequence,

    #[error("Sequence too short: {len} symbols (minimum {min})")]
    SequenceTooShort { len: usize, min: usize },

    #[error("Sequence too long: {len} symbols (maximum {max})")]
    SequenceTooLong { len: usize, max: usize },

    #[error("Invalid symbol {symbol} at position {position}")]
    InvalidSymbol { position: usize, symbol: Symbol },

    #[error("Similarity function failed for ({a}, {b}): {reason}")]
    SimilarityPortFailure { a: Symbol, b: Symbol, reason: String },

    #[error("Unknown symbol: {0}")]
    UnknownSymbol(Symbol),
}

impl AlignError {
    pub fn invalid_config<S: Into<String>>(message: S) -> Self {
        Self::InvalidConfiguration(message.into())
    }

    pub fn similarity_failure<S: Into<String>>(a: Symbol, b: Symbol, reason: S) -> Self {
        Self::SimilarityPortFailure {
            a,
            b,
            reason: reason.into(),
        }
    }
}

pub type AlignResult<T> = Result<T, AlignError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = AlignError::invalid_config("gap penalty must be negative");
        assert!(matches!(err, AlignError::InvalidConfiguration(_)));
        assert_eq!(
            err.to_string(),
            "Invalid configuration: gap penalty must be negative"
        );

        let err = AlignError::similarity_failure(3, 7, "returned NaN");
        assert_eq!(
            err.to_string(),
            "Similarity function failed for (3, 7): returned NaN"
        );
    }
}
