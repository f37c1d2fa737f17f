use crate::error::{AlignError, AlignResult};
use serde::{Deserialize, Serialize};

/// Integer code of a word in an external dictionary
pub type Symbol = i32;

/// Gap marker. Never a valid dictionary code.
pub const GAP: Symbol = -1;

/// Check that every code in `seq` is a valid (non-negative) symbol
pub fn validate_sequence(seq: &[Symbol]) -> AlignResult<()> {
    match seq.iter().position(|&s| s < 0) {
        Some(position) => Err(AlignError::InvalidSymbol {
            position,
            symbol: seq[position],
        }),
        None => Ok(()),
    }
}

/// Two equal-length rows of symbols, gaps encoded as [`GAP`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alignment {
    pub seq_a: Vec<Symbol>,
    pub seq_b: Vec<Symbol>,
    pub score: f64,
}

impl Alignment {
    pub fn new(seq_a: Vec<Symbol>, seq_b: Vec<Symbol>, score: f64) -> Self {
        debug_assert_eq!(seq_a.len(), seq_b.len());
        Self { seq_a, seq_b, score }
    }

    /// Number of columns
    pub fn len(&self) -> usize {
        self.seq_a.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seq_a.is_empty()
    }

    /// Iterate over aligned columns
    pub fn columns(&self) -> impl Iterator<Item = (Symbol, Symbol)> + '_ {
        self.seq_a.iter().copied().zip(self.seq_b.iter().copied())
    }

    /// Count of columns with a gap on either side
    pub fn gap_count(&self) -> usize {
        self.columns().filter(|&(a, b)| a == GAP || b == GAP).count()
    }

    /// Row A with gaps removed
    pub fn ungapped_a(&self) -> Vec<Symbol> {
        self.seq_a.iter().copied().filter(|&s| s != GAP).collect()
    }

    /// Row B with gaps removed
    pub fn ungapped_b(&self) -> Vec<Symbol> {
        self.seq_b.iter().copied().filter(|&s| s != GAP).collect()
    }
}

/// A candidate local alignment region: closed index intervals into both
/// sequences plus the DP score at its end cell.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Match {
    pub from_a: usize,
    pub to_a: usize,
    pub from_b: usize,
    pub to_b: usize,
    pub score: f64,
}

impl Match {
    pub fn new(from_a: usize, to_a: usize, from_b: usize, to_b: usize, score: f64) -> Self {
        Self {
            from_a,
            to_a,
            from_b,
            to_b,
            score,
        }
    }

    /// True when the A-intervals or the B-intervals of the two matches intersect
    pub fn overlaps(&self, other: &Match) -> bool {
        intervals_overlap(self.from_a, self.to_a, other.from_a, other.to_a)
            || intervals_overlap(self.from_b, self.to_b, other.from_b, other.to_b)
    }
}

fn intervals_overlap(start1: usize, end1: usize, start2: usize, end2: usize) -> bool {
    start1.max(start2) <= end1.min(end2)
}

/// One fragment of a multi-region local alignment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocalAlignment {
    /// Rank of the fragment in chaining order, starting at 0
    pub id: usize,
    pub region: Match,
    pub alignment: Alignment,
}
