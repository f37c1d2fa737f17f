//! Global alignment (Needleman-Wunsch)
//!
//! Fills a full score matrix with a linear gap penalty and backtracks one
//! optimal path from `(n, m)` to `(0, 0)`. The similarity used for every cell
//! is cached at fill time so the backtrack compares against the exact value
//! that produced the cell, never a recomputed one.

use crate::error::AlignResult;
use crate::matrix::{validate_penalty, BoundaryMode, Grid, ScoreMatrix};
use crate::similarity::{checked_similarity, Similarity};
use crate::types::{validate_sequence, Alignment, Symbol, GAP};

/// Parameters for the global aligner
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlobalParams {
    /// Linear gap penalty, strictly negative
    pub gap_penalty: f64,
}

impl Default for GlobalParams {
    fn default() -> Self {
        Self { gap_penalty: -1.0 }
    }
}

/// Filled DP state of one global run
#[derive(Debug, Clone)]
pub struct GlobalMatrix {
    pub scores: ScoreMatrix,
    /// Similarity value used for cell `(i, j)`, `i, j >= 1`
    pub cached_similarity: Grid<f64>,
}

/// Needleman-Wunsch aligner
#[derive(Debug, Clone)]
pub struct GlobalAligner {
    params: GlobalParams,
}

impl GlobalAligner {
    pub fn new(params: GlobalParams) -> AlignResult<Self> {
        validate_penalty("gap penalty", params.gap_penalty)?;
        Ok(Self { params })
    }

    pub fn params(&self) -> &GlobalParams {
        &self.params
    }

    /// Align two complete sequences
    pub fn align<S>(&self, seq_a: &[Symbol], seq_b: &[Symbol], sim: &S) -> AlignResult<Alignment>
    where
        S: Similarity + ?Sized,
    {
        let matrix = self.build_matrix(seq_a, seq_b, sim)?;
        Ok(self.backtrack(seq_a, seq_b, &matrix))
    }

    /// Fill the score matrix and the similarity cache
    pub fn build_matrix<S>(
        &self,
        seq_a: &[Symbol],
        seq_b: &[Symbol],
        sim: &S,
    ) -> AlignResult<GlobalMatrix>
    where
        S: Similarity + ?Sized,
    {
        validate_sequence(seq_a)?;
        validate_sequence(seq_b)?;

        let n = seq_a.len();
        let m = seq_b.len();
        let gap = self.params.gap_penalty;

        if n == 0 || m == 0 {
            log::warn!(
                "Global alignment with an empty sequence ({} x {}), result is all gaps",
                n,
                m
            );
        }
        log::debug!(
            "Building global matrix {}x{} with {} (gap {})",
            n + 1,
            m + 1,
            sim.name(),
            gap
        );

        let mut scores = ScoreMatrix::new(n, m, gap, BoundaryMode::Global)?;
        let mut cached_similarity = Grid::new(n + 1, m + 1, 0.0);

        for i in 1..=n {
            for j in 1..=m {
                let similarity = checked_similarity(sim, seq_a[i - 1], seq_b[j - 1])?;
                cached_similarity.set(i, j, similarity);

                let diag = scores.get(i - 1, j - 1) + similarity;
                let left = scores.get(i, j - 1) + gap;
                let up = scores.get(i - 1, j) + gap;

                scores.set(i, j, diag.max(left).max(up));
            }
        }

        Ok(GlobalMatrix {
            scores,
            cached_similarity,
        })
    }

    /// Walk from `(n, m)` back to `(0, 0)`, preferring diagonal, then left,
    /// then up.
    pub(crate) fn backtrack(
        &self,
        seq_a: &[Symbol],
        seq_b: &[Symbol],
        matrix: &GlobalMatrix,
    ) -> Alignment {
        let scores = &matrix.scores;
        let gap = self.params.gap_penalty;

        let mut i = seq_a.len();
        let mut j = seq_b.len();
        let mut row_a = Vec::with_capacity(i + j);
        let mut row_b = Vec::with_capacity(i + j);

        while i > 0 && j > 0 {
            let score = scores.get(i, j);

            if score == scores.get(i - 1, j - 1) + matrix.cached_similarity.get(i, j) {
                row_a.push(seq_a[i - 1]);
                row_b.push(seq_b[j - 1]);
                i -= 1;
                j -= 1;
            } else if score == scores.get(i, j - 1) + gap {
                row_a.push(GAP);
                row_b.push(seq_b[j - 1]);
                j -= 1;
            } else {
                debug_assert_eq!(score, scores.get(i - 1, j) + gap);
                row_a.push(seq_a[i - 1]);
                row_b.push(GAP);
                i -= 1;
            }
        }

        while i > 0 {
            row_a.push(seq_a[i - 1]);
            row_b.push(GAP);
            i -= 1;
        }

        while j > 0 {
            row_a.push(GAP);
            row_b.push(seq_b[j - 1]);
            j -= 1;
        }

        row_a.reverse();
        row_b.reverse();

        Alignment::new(row_a, row_b, scores.get(seq_a.len(), seq_b.len()))
    }
}

/// One-shot global alignment with the given gap penalty
pub fn global_align<S>(
    seq_a: &[Symbol],
    seq_b: &[Symbol],
    gap_penalty: f64,
    sim: &S,
) -> AlignResult<Alignment>
where
    S: Similarity + ?Sized,
{
    GlobalAligner::new(GlobalParams { gap_penalty })?.align(seq_a, seq_b, sim)
}
