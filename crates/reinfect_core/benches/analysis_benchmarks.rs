//! Criterion benchmarks for reinfect_core
//!
//! Run with: cargo bench -p reinfect_core

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use reinfect_core::config::AnalysisConfig;
use reinfect_core::model::Protocol;
use reinfect_core::run_analysis;
use reinfect_core::sampler::sample_seeded;
use reinfect_core::sweep::SweepMatrix;
use reinfect_core::transmission::evaluate;

fn bench_sampling(c: &mut Criterion) {
    let mut group = c.benchmark_group("sampling");
    for samples in [1_000, 10_000, 100_000].iter() {
        let config = AnalysisConfig::default().with_samples(*samples);
        group.bench_with_input(BenchmarkId::new("samples", samples), samples, |b, _| {
            b.iter(|| sample_seeded(black_box(&config)))
        });
    }
    group.finish();
}

fn bench_evaluate(c: &mut Criterion) {
    let config = AnalysisConfig::default();
    let ensemble = sample_seeded(&config).expect("default priors are valid");
    c.bench_function("evaluate_control_100k", |b| {
        b.iter(|| evaluate(black_box(&ensemble), Protocol::Control))
    });
}

fn bench_sweep(c: &mut Criterion) {
    let config = AnalysisConfig::default();
    let ensemble = sample_seeded(&config).expect("default priors are valid");
    let grid = config.sweep.values();
    c.bench_function("sweep_100k_x21", |b| {
        b.iter(|| SweepMatrix::compute(black_box(&ensemble), Protocol::Control, black_box(&grid)))
    });
}

fn bench_full_analysis(c: &mut Criterion) {
    let config = AnalysisConfig::default().with_samples(20_000);
    c.bench_function("full_analysis_20k", |b| {
        b.iter(|| run_analysis(black_box(&config)))
    });
}

criterion_group!(
    benches,
    bench_sampling,
    bench_evaluate,
    bench_sweep,
    bench_full_analysis,
);
criterion_main!(benches);
