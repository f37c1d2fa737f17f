//! Parallel alignment of independent sentence pairs.
//!
//! Every pair gets its own matrices; nothing is shared between runs except
//! the read-only aligner, similarity function and keyword set. Results come
//! back in input order, each carrying its own outcome so one failing pair
//! does not discard the rest.

use crate::chain::MatchChainer;
use crate::error::AlignResult;
use crate::global::GlobalAligner;
use crate::local::LocalAligner;
use crate::similarity::Similarity;
use crate::types::{Alignment, LocalAlignment, Symbol};
use rayon::prelude::*;
use std::collections::BTreeSet;

/// A pair of coded sentences
pub type SequencePair = (Vec<Symbol>, Vec<Symbol>);

pub fn align_global_pairs<S>(
    aligner: &GlobalAligner,
    pairs: &[SequencePair],
    sim: &S,
) -> Vec<AlignResult<Alignment>>
where
    S: Similarity + Sync + ?Sized,
{
    log::debug!("Aligning {} pairs globally", pairs.len());
    pairs
        .par_iter()
        .map(|(a, b)| aligner.align(a, b, sim))
        .collect()
}

pub fn align_local_pairs<S>(
    aligner: &LocalAligner,
    chainer: &MatchChainer,
    pairs: &[SequencePair],
    sim: &S,
    keywords: Option<&BTreeSet<Symbol>>,
) -> Vec<AlignResult<Vec<LocalAlignment>>>
where
    S: Similarity + Sync + ?Sized,
{
    log::debug!("Aligning {} pairs locally", pairs.len());
    pairs
        .par_iter()
        .map(|(a, b)| aligner.align_fragments(a, b, sim, keywords, chainer))
        .collect()
}
