//! Cell benchmark: measure text-to-cell conversion and width fitting.
//!
//! Target: a full status line converts and fits in well under a frame.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use livebar::cells::{ellipsize, fit, to_cells, Cell};

const ASCII_LINE: &str = "upload |██████████▌         | ▂▃▄ 5231/10000 [52%] in 12s (435.9/s, eta: 11s)";
const MIXED_LINE: &str = "日本語 |████▌     | 🚀 12/20 [60%] in 3s (4/s, eta: 2s) ファイルを処理中";

fn cell_from_char(c: &mut Criterion) {
    c.bench_function("cell_from_char_ascii", |b| {
        b.iter(|| Cell::from_char(black_box('A')))
    });

    c.bench_function("cell_from_char_cjk", |b| {
        b.iter(|| Cell::from_char(black_box('日')))
    });
}

fn to_cells_lines(c: &mut Criterion) {
    c.bench_function("to_cells_ascii_line", |b| {
        b.iter(|| to_cells(black_box(ASCII_LINE)))
    });

    c.bench_function("to_cells_mixed_line", |b| {
        b.iter(|| to_cells(black_box(MIXED_LINE)))
    });
}

fn fit_and_ellipsize(c: &mut Criterion) {
    let cells = to_cells(MIXED_LINE);

    c.bench_function("fit_truncate", |b| {
        b.iter(|| fit(black_box(&cells), 40, &Cell::SPACE))
    });

    c.bench_function("fit_pad", |b| {
        b.iter(|| fit(black_box(&cells), 120, &Cell::SPACE))
    });

    c.bench_function("ellipsize_line", |b| {
        b.iter(|| ellipsize(black_box(ASCII_LINE), 50))
    });
}

criterion_group!(benches, cell_from_char, to_cells_lines, fit_and_ellipsize);
criterion_main!(benches);
