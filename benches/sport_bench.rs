//! Benchmarks for the SIMD block minifier (SPORT), compared against the
//! scalar reference at the same input sizes.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use jsonmin::eco::minify_scalar;
use jsonmin::sport::minify_block;

fn build_document(target_len: usize) -> Vec<u8> {
    let mut s = String::from("[\n");
    let mut i = 0u64;
    while s.len() < target_len {
        if i > 0 {
            s.push_str(",\n");
        }
        s.push_str(&format!(
            r#"  {{ "id" : {}, "name" : "item-{}", "tags" : ["a", "b", "c"] }}"#,
            i, i
        ));
        i += 1;
    }
    s.push_str("\n]\n");
    s.into_bytes()
}

fn bench_minify_block(c: &mut Criterion) {
    let mut group = c.benchmark_group("sport_minify_block");
    for size in [4 * 1024usize, 64 * 1024, 1024 * 1024] {
        let input = build_document(size);
        let mut out = vec![0u8; input.len()];
        group.throughput(Throughput::Bytes(input.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &input, |b, input| {
            b.iter(|| minify_block(black_box(input), &mut out).unwrap());
        });
    }
    group.finish();
}

fn bench_scalar_baseline(c: &mut Criterion) {
    let mut group = c.benchmark_group("sport_vs_scalar_baseline");
    let input = build_document(1024 * 1024);
    group.throughput(Throughput::Bytes(input.len() as u64));
    group.bench_function("scalar", |b| {
        b.iter(|| minify_scalar(black_box(&input)));
    });
    group.bench_function("sport", |b| {
        let mut out = vec![0u8; input.len()];
        b.iter(|| minify_block(black_box(&input), &mut out).unwrap());
    });
    group.finish();
}

criterion_group!(benches, bench_minify_block, bench_scalar_baseline);
criterion_main!(benches);
