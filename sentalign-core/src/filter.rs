//! Length filter applied by callers before aligning a pair.
//!
//! DP memory grows with `n * m`, so corpus drivers reject very short and very
//! long sentences up front. The aligners themselves accept any length.

use crate::error::{AlignError, AlignResult};
use crate::types::Symbol;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LengthFilter {
    pub min_len: usize,
    pub max_len: Option<usize>,
}

impl Default for LengthFilter {
    fn default() -> Self {
        Self {
            min_len: 3,
            max_len: None,
        }
    }
}

impl LengthFilter {
    pub fn new(min_len: usize, max_len: Option<usize>) -> Self {
        Self { min_len, max_len }
    }

    /// Accept the pair only if both sides are within bounds
    pub fn check(&self, seq_a: &[Symbol], seq_b: &[Symbol]) -> AlignResult<()> {
        self.check_one(seq_a)?;
        self.check_one(seq_b)
    }

    pub fn accepts(&self, seq_a: &[Symbol], seq_b: &[Symbol]) -> bool {
        self.check(seq_a, seq_b).is_ok()
    }

    fn check_one(&self, seq: &[Symbol]) -> AlignResult<()> {
        let len = seq.len();
        if len == 0 {
            return Err(AlignError::EmptySequence);
        }
        if len < self.min_len {
            return Err(AlignError::SequenceTooShort {
                len,
                min: self.min_len,
            });
        }
        if let Some(max) = self.max_len {
            if len > max {
                return Err(AlignError::SequenceTooLong { len, max });
            }
        }
        Ok(())
    }
}
