//! Benchmarks for the streaming scalar minifier (ECO) across a range of
//! input sizes, following the `BenchmarkId`/`Throughput` matrix idiom.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use jsonmin::eco::minify_scalar;

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

fn bench_minify_scalar(c: &mut Criterion) {
    let mut group = c.benchmark_group("eco_minify_scalar");
    for size in [4 * 1024usize, 64 * 1024, 1024 * 1024] {
        let input = build_document(size);
        group.throughput(Throughput::Bytes(input.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &input, |b, input| {
            b.iter(|| minify_scalar(black_box(input)));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_minify_scalar);
criterion_main!(benches);
