//! Chaining module
//!
//! Reduces the overlapping candidate matches of a local alignment run to a
//! mutually disjoint subset. Selection is greedy by score: this is an
//! interval-scheduling heuristic, not a DP over compatible matches, so the
//! result is not guaranteed to maximise total coverage.

use crate::types::Match;
use std::cmp::Ordering;

/// Parameters for the chaining step
#[derive(Debug, Clone, Default)]
pub struct ChainParams {
    /// Stop after this many matches have been selected
    pub max_fragments: Option<usize>,
}

/// Greedy non-overlapping match selection
#[derive(Debug, Clone, Default)]
pub struct MatchChainer {
    params: ChainParams,
}

impl MatchChainer {
    pub fn new(params: ChainParams) -> Self {
        Self { params }
    }

    /// Repeatedly take the best remaining match and drop every candidate
    /// overlapping it in A or in B.
    ///
    /// Equal scores are resolved by input (discovery) order. The output is in
    /// selection order, i.e. score-descending, not positional.
    pub fn chain(&self, matches: Vec<Match>) -> Vec<Match> {
        let limit = self.params.max_fragments.unwrap_or(usize::MAX);
        if matches.is_empty() || limit == 0 {
            return Vec::new();
        }

        let total = matches.len();

        // Stable sort keeps discovery order among equal scores
        let mut ranked = matches;
        ranked.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));

        let mut selected: Vec<Match> = Vec::new();
        for candidate in ranked {
            if selected.iter().any(|kept| kept.overlaps(&candidate)) {
                continue;
            }

            log::trace!("Selected match {:?}", candidate);
            selected.push(candidate);

            if selected.len() >= limit {
                break;
            }
        }

        log::debug!("Chained {} of {} candidate matches", selected.len(), total);
        selected
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_chaining() {
        let matches = vec![
            Match::new(0, 1, 5, 6, 20.0),
            Match::new(0, 2, 5, 7, 30.0),
            Match::new(3, 4, 2, 3, 20.0),
            Match::new(3, 5, 2, 4, 30.0),
        ];

        let chained = MatchChainer::default().chain(matches);

        assert_eq!(chained.len(), 2);
        assert_eq!(chained[0], Match::new(0, 2, 5, 7, 30.0));
        assert_eq!(chained[1], Match::new(3, 5, 2, 4, 30.0));
    }

    #[test]
    fn test_ties_follow_discovery_order() {
        let matches = vec![
            Match::new(2, 4, 0, 2, 15.0),
            Match::new(0, 2, 0, 2, 15.0),
        ];

        let chained = MatchChainer::default().chain(matches);

        assert_eq!(chained, vec![Match::new(2, 4, 0, 2, 15.0)]);
    }

    #[test]
    fn test_overlap_in_b_only_is_rejected() {
        let matches = vec![
            Match::new(0, 1, 0, 3, 12.0),
            Match::new(5, 6, 3, 4, 11.0),
            Match::new(8, 9, 4, 5, 10.5),
        ];

        let chained = MatchChainer::default().chain(matches);

        assert_eq!(chained.len(), 2);
        assert_eq!(chained[0].score, 12.0);
        assert_eq!(chained[1].score, 10.5);
    }

    #[test]
    fn test_greedy_is_not_maximum_coverage() {
        // One long match blocks two shorter ones that together cover more
        let matches = vec![
            Match::new(0, 3, 0, 3, 20.0),
            Match::new(0, 1, 10, 11, 15.0),
            Match::new(2, 3, 12, 13, 15.0),
        ];

        let chained = MatchChainer::default().chain(matches);

        assert_eq!(chained.len(), 1);
        assert_eq!(chained[0].score, 20.0);
    }

    #[test]
    fn test_max_fragments() {
        let matches = vec![
            Match::new(0, 0, 0, 0, 11.0),
            Match::new(1, 1, 1, 1, 12.0),
            Match::new(2, 2, 2, 2, 13.0),
        ];

        let chainer = MatchChainer::new(ChainParams {
            max_fragments: Some(2),
        });
        let chained = chainer.chain(matches);

        assert_eq!(chained.len(), 2);
        assert_eq!(chained[0].score, 13.0);
        assert_eq!(chained[1].score, 12.0);

        let none = MatchChainer::new(ChainParams {
            max_fragments: Some(0),
        });
        assert!(none.chain(vec![Match::new(0, 0, 0, 0, 1.0)]).is_empty());
    }

    #[test]
    fn test_empty_input() {
        assert!(MatchChainer::default().chain(Vec::new()).is_empty());
    }
}
