use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use sentalign_core::{
    ChainParams, GlobalAligner, GlobalParams, LocalAligner, LocalParams, MatchChainer,
    MatchMismatch, Symbol,
};

/// Deterministic pseudo-sentence over a small vocabulary
fn generate_sentence(length: usize, seed: i32) -> Vec<Symbol> {
    (0..length as i32).map(|i| (i * 7 + seed * 13) % 40).collect()
}

fn bench_global(c: &mut Criterion) {
    let aligner = GlobalAligner::new(GlobalParams { gap_penalty: -3.0 }).unwrap();
    let sim = MatchMismatch::new(10.0, -10.0);

    let mut group = c.benchmark_group("global_align");
    for len in [10usize, 50, 200].iter() {
        let a = generate_sentence(*len, 1);
        let b = generate_sentence(*len, 2);

        group.bench_with_input(BenchmarkId::from_parameter(len), len, |bench, _| {
            bench.iter(|| black_box(aligner.align(black_box(&a), black_box(&b), &sim)))
        });
    }
    group.finish();
}

fn bench_local(c: &mut Criterion) {
    let aligner = LocalAligner::new(LocalParams {
        indel_score: -3.0,
        threshold: 10.0,
        ..LocalParams::default()
    })
    .unwrap();
    let chainer = MatchChainer::new(ChainParams::default());
    let sim = MatchMismatch::new(10.0, -10.0);

    let mut group = c.benchmark_group("local_align");
    for len in [10usize, 50, 200].iter() {
        let a = generate_sentence(*len, 1);
        let mut b = generate_sentence(*len, 3);
        // Plant a shared run so chaining has work to do
        let run = (*len / 4).max(1);
        b[..run].copy_from_slice(&a[*len - run..]);

        group.bench_with_input(BenchmarkId::new("candidates", len), len, |bench, _| {
            bench.iter(|| black_box(aligner.align(black_box(&a), black_box(&b), &sim, None)))
        });
        group.bench_with_input(BenchmarkId::new("fragments", len), len, |bench, _| {
            bench.iter(|| {
                let fragments =
                    aligner.align_fragments(black_box(&a), black_box(&b), &sim, None, &chainer);
                black_box(fragments)
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_global, bench_local);
criterion_main!(benches);
