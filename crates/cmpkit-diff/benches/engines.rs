use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use serde_json::{json, Value};

use cmpkit_diff::{line_diff, similarity, structural_diff};

fn numbered_lines(count: usize, every: usize) -> String {
    (0..count)
        .map(|i| {
            if every > 0 && i % every == 0 {
                format!("changed line {i}")
            } else {
                format!("line {i}")
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn bench_line_diff(c: &mut Criterion) {
    let mut group = c.benchmark_group("line_diff");
    for count in [100usize, 500, 1000] {
        let old = numbered_lines(count, 0);
        let new = numbered_lines(count, 7);
        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, _| {
            b.iter(|| line_diff(black_box(&old), black_box(&new)))
        });
    }
    group.finish();
}

fn bench_similarity(c: &mut Criterion) {
    let mut group = c.benchmark_group("similarity");
    for len in [16usize, 256, 1024] {
        let a: String = "abcdefgh".chars().cycle().take(len).collect();
        let b: String = "abcdxfgh".chars().cycle().take(len).collect();
        group.bench_with_input(BenchmarkId::from_parameter(len), &len, |bench, _| {
            bench.iter(|| similarity(black_box(&a), black_box(&b)))
        });
    }
    group.finish();
}

fn wide_tree(width: usize, seed: i64) -> Value {
    let items: Vec<Value> = (0..width)
        .map(|i| json!({"id": i, "value": (i as i64) * seed, "tags": ["x", "y"]}))
        .collect();
    json!({"items": items, "meta": {"width": width}})
}

fn bench_structural_diff(c: &mut Criterion) {
    let old = wide_tree(1000, 1);
    let new = wide_tree(1000, 2);
    c.bench_function("structural_diff/1000", |b| {
        b.iter(|| structural_diff(black_box(&old), black_box(&new)))
    });
}

criterion_group!(
    benches,
    bench_line_diff,
    bench_similarity,
    bench_structural_diff
);
criterion_main!(benches);
