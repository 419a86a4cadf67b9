//! Benchmarks for rope operations matching editor usage
//!
//! - Typing (single char inserts at a moving cursor)
//! - Line lookups used by the viewport
//! - Slicing the visible window

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use rope::Rope;

/// Code-like document with varying line lengths
fn generate_document(lines: usize) -> String {
    let mut doc = String::new();
    for i in 0..lines {
        match i % 4 {
            0 => doc.push_str(&format!("fn function_{}() {{\n", i)),
            1 => doc.push_str(&format!("    let value_{} = \"some literal text\";\n", i)),
            2 => doc.push_str(&format!("    process({}, {});\n", i, i * 2)),
            _ => doc.push_str("}\n"),
        }
    }
    doc
}

fn bench_typing(c: &mut Criterion) {
    let mut group = c.benchmark_group("typing");

    for size in [1_000, 10_000, 100_000] {
        let rope = Rope::from_str(&generate_document(size));
        group.bench_with_input(BenchmarkId::from_parameter(size), &rope, |b, rope| {
            b.iter(|| {
                let mut rope = rope.clone();
                let cursor = rope.len() / 2;
                for (i, c) in "let x = 1;".chars().enumerate() {
                    rope = rope.insert(cursor + i, &c.to_string()).unwrap();
                }
                std::hint::black_box(rope);
            });
        });
    }
    group.finish();
}

fn bench_line_queries(c: &mut Criterion) {
    let mut group = c.benchmark_group("line_queries");

    for size in [1_000, 10_000, 100_000] {
        let rope = Rope::from_str(&generate_document(size));
        group.bench_with_input(BenchmarkId::new("line_to_offset", size), &rope, |b, rope| {
            let line = rope.line_count() / 2;
            b.iter(|| std::hint::black_box(rope.line_to_offset(line).unwrap()));
        });
        group.bench_with_input(BenchmarkId::new("offset_to_point", size), &rope, |b, rope| {
            let offset = rope.len() / 3;
            b.iter(|| std::hint::black_box(rope.offset_to_point(offset).unwrap()));
        });
        group.bench_with_input(BenchmarkId::new("visible_window", size), &rope, |b, rope| {
            let top = rope.line_count() / 2;
            b.iter(|| std::hint::black_box(rope.lines(top, top + 60).unwrap()));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_typing, bench_line_queries);
criterion_main!(benches);
