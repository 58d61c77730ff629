//! Compose benchmark: cost of one redraw's worth of composition.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use livebar::config::Config;
use livebar::render::{Composer, Outcome, Snapshot};
use std::time::Duration;

fn snapshot(total: Option<u64>) -> Snapshot<'static> {
    Snapshot {
        title: Some("upload"),
        text: Some("processing chunk 5231"),
        total,
        count: 5231,
        fraction: total.map(|t| 5231.0 / t as f64),
        elapsed: Duration::from_secs(12),
        rate: 435.9,
        eta: 11.0,
        outcome: None,
    }
}

fn compose_running(c: &mut Criterion) {
    for theme in ["smooth", "classic"] {
        let settings = Config::new().theme(theme).resolve_lenient();
        let mut composer = Composer::new(&settings);
        let snap = snapshot(Some(10_000));
        c.bench_function(&format!("compose_{theme}"), |b| {
            b.iter(|| composer.compose(black_box(&snap), 120))
        });
    }

    let mut composer = Composer::new(&Config::new().resolve_lenient());
    let snap = snapshot(None);
    c.bench_function("compose_unknown_total", |b| {
        b.iter(|| composer.compose(black_box(&snap), 120))
    });
}

fn compose_narrow(c: &mut Criterion) {
    let mut composer = Composer::new(&Config::new().resolve_lenient());
    let snap = snapshot(Some(10_000));
    c.bench_function("compose_ellipsized", |b| {
        b.iter(|| composer.compose(black_box(&snap), 40))
    });
}

fn compose_receipt(c: &mut Criterion) {
    let composer = Composer::new(&Config::new().resolve_lenient());
    let mut snap = snapshot(Some(10_000));
    snap.outcome = Some(Outcome::Underflow);
    c.bench_function("compose_receipt", |b| {
        b.iter(|| composer.compose_receipt(black_box(&snap), 120))
    });
}

criterion_group!(benches, compose_running, compose_narrow, compose_receipt);
criterion_main!(benches);
