//! Word similarity based on normalized edit distance

use sentalign_core::{Similarity, SimilarityError, Symbol};

/// Scores identical words with `match_score`; any other pair gets
/// `mismatch_score` scaled by the normalized Levenshtein distance of the two
/// words, so spelling variants are penalised less than unrelated words.
#[derive(Debug, Clone)]
pub struct EditDistanceSimilarity<'a> {
    words: &'a [String],
    match_score: f64,
    mismatch_score: f64,
}

impl<'a> EditDistanceSimilarity<'a> {
    pub fn new(words: &'a [String], match_score: f64, mismatch_score: f64) -> Self {
        Self {
            words,
            match_score,
            mismatch_score,
        }
    }

    fn lookup(&self, symbol: Symbol) -> Result<&str, SimilarityError> {
        usize::try_from(symbol)
            .ok()
            .and_then(|idx| self.words.get(idx))
            .map(String::as_str)
            .ok_or_else(|| SimilarityError::new(format!("no word for symbol {}", symbol)))
    }
}

impl Similarity for EditDistanceSimilarity<'_> {
    fn similarity(&self, a: Symbol, b: Symbol) -> Result<f64, SimilarityError> {
        if a == b {
            return Ok(self.match_score);
        }

        let word_a = self.lookup(a)?;
        let word_b = self.lookup(b)?;
        let max_len = word_a.chars().count().max(word_b.chars().count());
        if max_len == 0 {
            return Ok(self.match_score);
        }

        let distance = strsim::levenshtein(word_a, word_b);
        Ok(self.mismatch_score * distance as f64 / max_len as f64)
    }

    fn name(&self) -> &'static str {
        "edit-distance"
    }
}
