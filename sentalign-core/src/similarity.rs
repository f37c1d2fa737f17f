//! Symbol similarity port
//!
//! The aligners never compute word similarity themselves. Callers plug in an
//! implementation of [`Similarity`]; the engine validates every value it
//! receives and aborts the run on failure.

use crate::error::{AlignError, AlignResult};
use crate::types::Symbol;
use thiserror::Error;

/// Failure reported by a similarity implementation
#[derive(Debug, Error)]
#[error("{0}")]
pub struct SimilarityError(pub String);

impl SimilarityError {
    pub fn new<S: Into<String>>(message: S) -> Self {
        Self(message.into())
    }
}

/// Trait for symbol scoring functions
pub trait Similarity {
    /// Score the pairing of two symbols. Larger is more similar.
    fn similarity(&self, a: Symbol, b: Symbol) -> Result<f64, SimilarityError>;

    /// Get the name of this scoring function
    fn name(&self) -> &'static str {
        "custom"
    }
}

impl<T: Similarity + ?Sized> Similarity for &T {
    fn similarity(&self, a: Symbol, b: Symbol) -> Result<f64, SimilarityError> {
        (**self).similarity(a, b)
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}

impl<T: Similarity + ?Sized> Similarity for Box<T> {
    fn similarity(&self, a: Symbol, b: Symbol) -> Result<f64, SimilarityError> {
        (**self).similarity(a, b)
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}

/// Fixed match / mismatch scores
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatchMismatch {
    pub match_score: f64,
    pub mismatch_score: f64,
}

impl MatchMismatch {
    pub fn new(match_score: f64, mismatch_score: f64) -> Self {
        Self {
            match_score,
            mismatch_score,
        }
    }
}

impl Default for MatchMismatch {
    fn default() -> Self {
        Self::new(10.0, -10.0)
    }
}

impl Similarity for MatchMismatch {
    fn similarity(&self, a: Symbol, b: Symbol) -> Result<f64, SimilarityError> {
        Ok(if a == b {
            self.match_score
        } else {
            self.mismatch_score
        })
    }

    fn name(&self) -> &'static str {
        "match-mismatch"
    }
}

/// Adapter for plain closures
pub struct FnSimilarity<F>(pub F);

impl<F> Similarity for FnSimilarity<F>
where
    F: Fn(Symbol, Symbol) -> f64,
{
    fn similarity(&self, a: Symbol, b: Symbol) -> Result<f64, SimilarityError> {
        Ok((self.0)(a, b))
    }
}

/// Call the port and reject errors and non-finite values
pub(crate) fn checked_similarity<S>(sim: &S, a: Symbol, b: Symbol) -> AlignResult<f64>
where
    S: Similarity + ?Sized,
{
    let value = sim
        .similarity(a, b)
        .map_err(|e| AlignError::similarity_failure(a, b, e.to_string()))?;

    if !value.is_finite() {
        return Err(AlignError::similarity_failure(
            a,
            b,
            format!("non-finite value {}", value),
        ));
    }

    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Failing;

    impl Similarity for Failing {
        fn similarity(&self, _a: Symbol, _b: Symbol) -> Result<f64, SimilarityError> {
            Err(SimilarityError::new("dictionary unavailable"))
        }
    }

    #[test]
    fn test_match_mismatch() {
        let sim = MatchMismatch::default();
        assert_eq!(sim.similarity(4, 4).unwrap(), 10.0);
        assert_eq!(sim.similarity(4, 5).unwrap(), -10.0);
        assert_eq!(sim.name(), "match-mismatch");
    }

    #[test]
    fn test_checked_rejects_non_finite() {
        let sim = FnSimilarity(|a: Symbol, b: Symbol| if a == b { f64::NAN } else { 1.0 });
        assert_eq!(checked_similarity(&sim, 1, 2).unwrap(), 1.0);

        let err = checked_similarity(&sim, 2, 2).unwrap_err();
        assert!(matches!(err, AlignError::SimilarityPortFailure { a: 2, b: 2, .. }));
    }

    #[test]
    fn test_checked_propagates_port_error() {
        let err = checked_similarity(&Failing, 0, 1).unwrap_err();
        assert!(err.to_string().contains("dictionary unavailable"));
    }

    #[test]
    fn test_reference_forwarding() {
        let sim = MatchMismatch::new(2.0, -1.0);
        let by_ref: &dyn Similarity = &sim;
        assert_eq!(checked_similarity(&by_ref, 3, 3).unwrap(), 2.0);
        assert_eq!(by_ref.name(), "match-mismatch");
    }
}
