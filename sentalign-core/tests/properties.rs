//! Property tests for the aligners.
//!
//! Scores are kept integer-valued so that re-summing an alignment column by
//! column reproduces the DP score exactly.

use proptest::prelude::*;
use sentalign_core::*;

fn sequence(max_len: usize) -> impl Strategy<Value = Vec<Symbol>> {
    prop::collection::vec(0..6i32, 0..max_len)
}

fn scores() -> impl Strategy<Value = (f64, f64, f64)> {
    // (match, mismatch, gap) with match > mismatch and a strictly negative gap
    (1..12i32, -12..1i32, -8..0i32).prop_map(|(m, mm, g)| (m as f64, mm as f64, g as f64))
}

fn rescore(alignment: &Alignment, sim: &MatchMismatch, gap: f64) -> f64 {
    alignment
        .columns()
        .map(|(a, b)| {
            if a == GAP || b == GAP {
                gap
            } else {
                sim.similarity(a, b).unwrap_or(f64::NAN)
            }
        })
        .sum()
}

proptest! {
    #[test]
    fn prop_global_rows_reproduce_inputs(
        a in sequence(16),
        b in sequence(16),
        (m, mm, gap) in scores(),
    ) {
        let sim = MatchMismatch::new(m, mm);
        let alignment = global_align(&a, &b, gap, &sim).unwrap();

        prop_assert_eq!(alignment.seq_a.len(), alignment.seq_b.len());
        prop_assert!(alignment.len() >= a.len().max(b.len()));
        prop_assert!(alignment.len() <= a.len() + b.len());
        prop_assert_eq!(alignment.ungapped_a(), a);
        prop_assert_eq!(alignment.ungapped_b(), b);
        prop_assert!(alignment.columns().all(|(x, y)| x != GAP || y != GAP));
    }

    #[test]
    fn prop_global_score_matches_columns(
        a in sequence(14),
        b in sequence(14),
        (m, mm, gap) in scores(),
    ) {
        let sim = MatchMismatch::new(m, mm);
        let alignment = global_align(&a, &b, gap, &sim).unwrap();

        prop_assert_eq!(rescore(&alignment, &sim, gap), alignment.score);
    }

    #[test]
    fn prop_global_is_deterministic(
        a in sequence(12),
        b in sequence(12),
        (m, mm, gap) in scores(),
    ) {
        let sim = MatchMismatch::new(m, mm);
        let first = global_align(&a, &b, gap, &sim).unwrap();
        let second = global_align(&a, &b, gap, &sim).unwrap();

        prop_assert_eq!(first, second);
    }

    #[test]
    fn prop_local_is_deterministic(
        a in sequence(12),
        b in sequence(12),
        (m, mm, indel) in scores(),
    ) {
        let sim = MatchMismatch::new(m, mm);
        let aligner = LocalAligner::new(LocalParams {
            indel_score: indel,
            threshold: 1.0,
            ..LocalParams::default()
        })
        .unwrap();
        let chainer = MatchChainer::default();

        let first = aligner.align_fragments(&a, &b, &sim, None, &chainer).unwrap();
        let second = aligner.align_fragments(&a, &b, &sim, None, &chainer).unwrap();

        prop_assert_eq!(first, second);
    }

    #[test]
    fn prop_identical_sequences_align_without_gaps(
        a in prop::collection::vec(0..6i32, 1..16),
        (m, mm, gap) in scores(),
    ) {
        let sim = MatchMismatch::new(m, mm);
        let alignment = global_align(&a, &a, gap, &sim).unwrap();

        prop_assert_eq!(alignment.gap_count(), 0);
        prop_assert_eq!(&alignment.seq_a, &a);
        prop_assert_eq!(&alignment.seq_b, &a);
        prop_assert_eq!(alignment.score, m * a.len() as f64);
    }

    #[test]
    fn prop_local_matrix_is_non_negative(
        a in sequence(12),
        b in sequence(12),
        (m, mm, indel) in scores(),
    ) {
        let sim = MatchMismatch::new(m, mm);
        let aligner = LocalAligner::new(LocalParams {
            indel_score: indel,
            threshold: 0.0,
            ..LocalParams::default()
        })
        .unwrap();
        let matrix = aligner.build_matrix(&a, &b, &sim, None).unwrap();

        for i in 0..matrix.scores.rows() {
            for j in 0..matrix.scores.cols() {
                let score = matrix.scores.get(i, j);
                prop_assert!(score >= 0.0);
                if i == 0 || j == 0 {
                    prop_assert_eq!(score, 0.0);
                }
                prop_assert_eq!(
                    matrix.directions.get(i, j).contains(DirectionMask::ZERO),
                    score == 0.0
                );
            }
        }
    }

    #[test]
    fn prop_local_candidates_are_bounded(
        a in sequence(12),
        b in sequence(12),
        (m, mm, indel) in scores(),
        threshold in 0..20i32,
    ) {
        let threshold = threshold as f64;
        let sim = MatchMismatch::new(m, mm);
        let matches = local_align(&a, &b, indel, threshold, &sim, None).unwrap();

        for found in &matches {
            prop_assert!(found.score > threshold);
            prop_assert!(found.from_a <= found.to_a && found.to_a < a.len());
            prop_assert!(found.from_b <= found.to_b && found.to_b < b.len());
        }
    }

    #[test]
    fn prop_chained_fragments_are_disjoint(
        a in sequence(14),
        b in sequence(14),
        (m, mm, indel) in scores(),
        max_fragments in prop::option::of(0..5usize),
    ) {
        let sim = MatchMismatch::new(m, mm);
        let aligner = LocalAligner::new(LocalParams {
            indel_score: indel,
            threshold: 1.0,
            ..LocalParams::default()
        })
        .unwrap();
        let chainer = MatchChainer::new(ChainParams { max_fragments });

        let fragments = aligner.align_fragments(&a, &b, &sim, None, &chainer).unwrap();

        if let Some(limit) = max_fragments {
            prop_assert!(fragments.len() <= limit);
        }
        for (rank, fragment) in fragments.iter().enumerate() {
            prop_assert_eq!(fragment.id, rank);
            for other in &fragments[rank + 1..] {
                prop_assert!(!fragment.region.overlaps(&other.region));
                prop_assert!(fragment.region.score >= other.region.score);
            }
        }
    }

    #[test]
    fn prop_fragments_cover_their_regions(
        a in sequence(14),
        b in sequence(14),
        (m, mm, indel) in scores(),
    ) {
        let sim = MatchMismatch::new(m, mm);
        let aligner = LocalAligner::new(LocalParams {
            indel_score: indel,
            threshold: 1.0,
            ..LocalParams::default()
        })
        .unwrap();

        let fragments = aligner
            .align_fragments(&a, &b, &sim, None, &MatchChainer::default())
            .unwrap();

        for fragment in fragments {
            let region = fragment.region;
            let covered_a = a[region.from_a..=region.to_a].to_vec();
            let covered_b = b[region.from_b..=region.to_b].to_vec();
            prop_assert_eq!(fragment.alignment.ungapped_a(), covered_a);
            prop_assert_eq!(fragment.alignment.ungapped_b(), covered_b);
            prop_assert_eq!(rescore(&fragment.alignment, &sim, indel), region.score);
        }
    }
}
