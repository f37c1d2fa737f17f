//! Multi-region local alignment (Smith-Waterman variant)
//!
//! The matrix is filled with the usual reset-to-zero recurrence, but instead
//! of backtracking only from the global maximum, every cell scoring above the
//! threshold yields a candidate [`Match`]. Candidates overlap heavily; the
//! [`MatchChainer`] reduces them to a mutually disjoint set before each
//! survivor is backtracked into an [`Alignment`].
//!
//! Ties are kept: each cell stores a [`DirectionMask`] with every branch that
//! reached its maximum. Both the start search and the backtrack follow the
//! mask in priority LEFT, UP, DIAG.

use crate::chain::MatchChainer;
use crate::error::{AlignError, AlignResult};
use crate::matrix::{validate_penalty, BoundaryMode, DirectionMask, Grid, ScoreMatrix, Step};
use crate::similarity::{checked_similarity, Similarity};
use crate::types::{validate_sequence, Alignment, LocalAlignment, Match, Symbol, GAP};
use std::collections::BTreeSet;

/// Multiplier applied to exact matches of keyword symbols
pub const KEYWORD_BOOST: f64 = 5.0;

/// Parameters for the local aligner
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocalParams {
    /// Score of an insertion or deletion, strictly negative
    pub indel_score: f64,
    /// A cell must score strictly above this to start a candidate match
    pub threshold: f64,
    /// Multiplier for exact keyword matches
    pub keyword_boost: f64,
}

impl Default for LocalParams {
    fn default() -> Self {
        Self {
            indel_score: -1.0,
            threshold: 2.0,
            keyword_boost: KEYWORD_BOOST,
        }
    }
}

/// Position-aware scoring: index 0 on either side stands for a gap.
///
/// `score(i, j)` with `i, j >= 1` scores `seq_a[i-1]` against `seq_b[j-1]`.
pub struct PositionScorer<'a, S: ?Sized> {
    seq_a: &'a [Symbol],
    seq_b: &'a [Symbol],
    sim: &'a S,
    indel_score: f64,
    keyword_boost: f64,
    keywords: Option<&'a BTreeSet<Symbol>>,
}

impl<'a, S> PositionScorer<'a, S>
where
    S: Similarity + ?Sized,
{
    pub fn new(
        seq_a: &'a [Symbol],
        seq_b: &'a [Symbol],
        sim: &'a S,
        params: &LocalParams,
        keywords: Option<&'a BTreeSet<Symbol>>,
    ) -> Self {
        Self {
            seq_a,
            seq_b,
            sim,
            indel_score: params.indel_score,
            keyword_boost: params.keyword_boost,
            keywords,
        }
    }

    pub fn score(&self, i: usize, j: usize) -> AlignResult<f64> {
        if i == 0 || j == 0 {
            return Ok(self.indel_score);
        }

        let a = self.seq_a[i - 1];
        let b = self.seq_b[j - 1];
        let similarity = checked_similarity(self.sim, a, b)?;

        if a == b && self.is_keyword(a) {
            Ok(similarity * self.keyword_boost)
        } else {
            Ok(similarity)
        }
    }

    fn is_keyword(&self, symbol: Symbol) -> bool {
        self.keywords.map_or(false, |k| k.contains(&symbol))
    }
}

/// Filled DP state of one local run
#[derive(Debug, Clone)]
pub struct LocalMatrix {
    pub scores: ScoreMatrix,
    pub directions: Grid<DirectionMask>,
}

/// Smith-Waterman aligner reporting every region above the threshold
#[derive(Debug, Clone)]
pub struct LocalAligner {
    params: LocalParams,
}

impl LocalAligner {
    pub fn new(params: LocalParams) -> AlignResult<Self> {
        validate_penalty("indel score", params.indel_score)?;

        if !params.threshold.is_finite() || params.threshold < 0.0 {
            return Err(AlignError::invalid_config(format!(
                "threshold must be a non-negative finite number, got {}",
                params.threshold
            )));
        }
        if !params.keyword_boost.is_finite() || params.keyword_boost <= 0.0 {
            return Err(AlignError::invalid_config(format!(
                "keyword boost must be a positive finite number, got {}",
                params.keyword_boost
            )));
        }

        Ok(Self { params })
    }

    pub fn params(&self) -> &LocalParams {
        &self.params
    }

    /// Find all candidate matches, in row-major discovery order
    pub fn align<S>(
        &self,
        seq_a: &[Symbol],
        seq_b: &[Symbol],
        sim: &S,
        keywords: Option<&BTreeSet<Symbol>>,
    ) -> AlignResult<Vec<Match>>
    where
        S: Similarity + ?Sized,
    {
        let matrix = self.build_matrix(seq_a, seq_b, sim, keywords)?;
        Ok(self.find_matches(&matrix))
    }

    /// Find candidates, chain them and backtrack every survivor
    pub fn align_fragments<S>(
        &self,
        seq_a: &[Symbol],
        seq_b: &[Symbol],
        sim: &S,
        keywords: Option<&BTreeSet<Symbol>>,
        chainer: &MatchChainer,
    ) -> AlignResult<Vec<LocalAlignment>>
    where
        S: Similarity + ?Sized,
    {
        let matrix = self.build_matrix(seq_a, seq_b, sim, keywords)?;
        let candidates = self.find_matches(&matrix);
        let chained = chainer.chain(candidates);

        let fragments = chained
            .into_iter()
            .enumerate()
            .map(|(id, region)| LocalAlignment {
                id,
                region,
                alignment: self.backtrack_match(seq_a, seq_b, &matrix, &region),
            })
            .collect::<Vec<_>>();

        log::debug!("Local alignment produced {} fragments", fragments.len());
        Ok(fragments)
    }

    /// Fill the score matrix and direction masks
    pub fn build_matrix<S>(
        &self,
        seq_a: &[Symbol],
        seq_b: &[Symbol],
        sim: &S,
        keywords: Option<&BTreeSet<Symbol>>,
    ) -> AlignResult<LocalMatrix>
    where
        S: Similarity + ?Sized,
    {
        validate_sequence(seq_a)?;
        validate_sequence(seq_b)?;

        let n = seq_a.len();
        let m = seq_b.len();

        if n == 0 || m == 0 {
            log::warn!(
                "Local alignment with an empty sequence ({} x {}), no matches possible",
                n,
                m
            );
        }
        log::debug!(
            "Building local matrix {}x{} with {} (indel {}, threshold {})",
            n + 1,
            m + 1,
            sim.name(),
            self.params.indel_score,
            self.params.threshold
        );

        let scorer = PositionScorer::new(seq_a, seq_b, sim, &self.params, keywords);
        let mut scores = ScoreMatrix::new(n, m, self.params.indel_score, BoundaryMode::Local)?;
        let mut directions = Grid::new(n + 1, m + 1, DirectionMask::ZERO);

        for i in 1..=n {
            for j in 1..=m {
                let diag = scores.get(i - 1, j - 1) + scorer.score(i, j)?;
                let left = scores.get(i, j - 1) + scorer.score(0, j)?;
                let up = scores.get(i - 1, j) + scorer.score(i, 0)?;
                let best = diag.max(left).max(up).max(0.0);

                let mut mask = DirectionMask::EMPTY;
                if left == best {
                    mask |= DirectionMask::LEFT;
                }
                if up == best {
                    mask |= DirectionMask::UP;
                }
                if diag == best {
                    mask |= DirectionMask::DIAG;
                }
                if best == 0.0 {
                    mask |= DirectionMask::ZERO;
                }

                scores.set(i, j, best);
                directions.set(i, j, mask);
            }
        }

        Ok(LocalMatrix { scores, directions })
    }

    /// Emit a candidate for every cell above the threshold.
    ///
    /// The start of each candidate is found by walking back along the first
    /// available direction while the preceding cell is still positive.
    pub fn find_matches(&self, matrix: &LocalMatrix) -> Vec<Match> {
        let scores = &matrix.scores;
        let mut matches = Vec::new();

        for i in 1..scores.rows() {
            for j in 1..scores.cols() {
                let score = scores.get(i, j);
                if score <= self.params.threshold {
                    continue;
                }

                let (mut si, mut sj) = (i, j);
                while let Some(step) = matrix.directions.get(si, sj).first_step() {
                    let (pi, pj) = step.apply(si, sj);
                    if scores.get(pi, pj) > 0.0 {
                        si = pi;
                        sj = pj;
                    } else {
                        break;
                    }
                }

                let found = Match::new(si - 1, i - 1, sj - 1, j - 1, score);
                log::trace!("Candidate match {:?}", found);
                matches.push(found);
            }
        }

        log::debug!("Found {} candidate matches above {}", matches.len(), self.params.threshold);
        matches
    }

    /// Rebuild the aligned rows of one match, from its end cell back to the
    /// first cell flagged ZERO.
    pub(crate) fn backtrack_match(
        &self,
        seq_a: &[Symbol],
        seq_b: &[Symbol],
        matrix: &LocalMatrix,
        region: &Match,
    ) -> Alignment {
        let mut i = region.to_a + 1;
        let mut j = region.to_b + 1;
        let mut row_a = Vec::new();
        let mut row_b = Vec::new();

        loop {
            let mask = matrix.directions.get(i, j);
            if mask.contains(DirectionMask::ZERO) {
                break;
            }
            let Some(step) = mask.first_step() else {
                break;
            };

            match step {
                Step::Left => {
                    row_a.push(GAP);
                    row_b.push(seq_b[j - 1]);
                }
                Step::Up => {
                    row_a.push(seq_a[i - 1]);
                    row_b.push(GAP);
                }
                Step::Diag => {
                    row_a.push(seq_a[i - 1]);
                    row_b.push(seq_b[j - 1]);
                }
            }
            (i, j) = step.apply(i, j);
        }

        row_a.reverse();
        row_b.reverse();

        Alignment::new(row_a, row_b, region.score)
    }
}

/// One-shot candidate search, unchained
pub fn local_align<S>(
    seq_a: &[Symbol],
    seq_b: &[Symbol],
    indel_score: f64,
    threshold: f64,
    sim: &S,
    keywords: Option<&BTreeSet<Symbol>>,
) -> AlignResult<Vec<Match>>
where
    S: Similarity + ?Sized,
{
    let params = LocalParams {
        indel_score,
        threshold,
        ..LocalParams::default()
    };
    LocalAligner::new(params)?.align(seq_a, seq_b, sim, keywords)
}
