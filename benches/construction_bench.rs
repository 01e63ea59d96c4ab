//! Construction and lookup benchmarks

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use suffix_tree::{SuffixTree, TreeConfig};

/// Deterministic pseudo-random DNA-like text closed by `terminator`.
fn genome(len: usize, seed: u64, terminator: u8) -> Vec<u8> {
    let mut state = seed;
    let mut out: Vec<u8> = (0..len)
        .map(|_| {
            state = state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
            b"ACGT"[(state >> 62) as usize]
        })
        .collect();
    out.push(terminator);
    out
}

fn benchmark_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("build");
    for len in [1_000, 10_000, 100_000] {
        let text = genome(len, 7, b'$');
        group.bench_with_input(BenchmarkId::from_parameter(len), &text, |b, text| {
            b.iter(|| SuffixTree::build(black_box(text.as_slice())).map(|tree| tree.len()));
        });
    }
    group.finish();
}

fn benchmark_generalized(c: &mut Criterion) {
    // Terminators '0'..='7', one per input.
    let texts: Vec<Vec<u8>> = (0..8u8)
        .map(|ordinal| genome(5_000, u64::from(ordinal), b'0' + ordinal))
        .collect();
    c.bench_function("generalized_8x5000", |b| {
        b.iter(|| {
            let mut tree = SuffixTree::new(TreeConfig::generalized(texts.len()));
            for text in &texts {
                tree.extend(text.as_slice()).map(|_| ())?;
            }
            Ok::<usize, suffix_tree::SuffixTreeError>(tree.len())
        });
    });
}

fn benchmark_lookup(c: &mut Criterion) {
    let text = genome(100_000, 11, b'$');
    let tree = SuffixTree::build(&text).expect("build succeeds");
    let queries: Vec<&[u8]> = (0..1_000).map(|i| &text[i * 50..i * 50 + 20]).collect();

    c.bench_function("find_suffix_20", |b| {
        b.iter(|| {
            queries
                .iter()
                .filter(|query| tree.find_suffix(black_box(query)).is_some())
                .count()
        });
    });
}

criterion_group!(benches, benchmark_build, benchmark_generalized, benchmark_lookup);
criterion_main!(benches);
