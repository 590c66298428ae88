//! Benchmarks for clipboard tokenization and anchored paste.
//!
//! Run with: cargo bench
//!
//! Results are saved to `target/criterion/` with HTML reports.
#![allow(clippy::cast_possible_truncation)]

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use figgrid::clipboard::{paste, serialize, tokenize};
use figgrid::{CellCoord, CellRange, GridModel};

/// Tab-separated block of `rows` x `cols`, alternating numbers and text.
fn tsv_block(rows: usize, cols: usize) -> String {
    let mut out = String::new();
    for r in 0..rows {
        let line: Vec<String> = (0..cols)
            .map(|c| {
                if (r + c) % 2 == 0 {
                    format!("{}.5", r * cols + c)
                } else {
                    format!("label {r}-{c}")
                }
            })
            .collect();
        out.push_str(&line.join("\t"));
        out.push('\n');
    }
    out
}

fn bench_tokenize(c: &mut Criterion) {
    let mut group = c.benchmark_group("tokenize");
    for (rows, cols) in [(10, 5), (1000, 20), (5000, 50)] {
        let text = tsv_block(rows, cols);
        group.throughput(Throughput::Bytes(text.len() as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{rows}x{cols}")),
            &text,
            |b, text| b.iter(|| tokenize(black_box(text), '\t', ',')),
        );
    }
    group.finish();
}

fn bench_paste(c: &mut Criterion) {
    let mut group = c.benchmark_group("paste");
    for (rows, cols) in [(100, 10), (2000, 20)] {
        let tokens = tokenize(&tsv_block(rows, cols), '\t', ',');
        group.bench_with_input(
            BenchmarkId::new("anchored", format!("{rows}x{cols}")),
            &tokens,
            |b, tokens| {
                b.iter(|| {
                    let mut grid = GridModel::default();
                    grid.init_blank(20, 10);
                    paste(&mut grid, Some(CellCoord::new(5, 5)), black_box(tokens))
                });
            },
        );
    }
    group.finish();
}

fn bench_serialize(c: &mut Criterion) {
    let mut grid = GridModel::default();
    grid.init_blank(20, 10);
    let tokens = tokenize(&tsv_block(2000, 20), '\t', ',');
    paste(&mut grid, Some(CellCoord::new(0, 0)), &tokens);
    let range = CellRange {
        top: 0,
        left: 0,
        bottom: grid.row_count() - 1,
        right: grid.col_count() - 1,
    };

    c.bench_function("serialize_2000x20", |b| {
        b.iter(|| serialize(black_box(&grid), range, '\t'))
    });
}

criterion_group!(benches, bench_tokenize, bench_paste, bench_serialize);
criterion_main!(benches);
