use std::path::PathBuf;

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use grahaghadi::vedic::Graha;
use grahaghadi::{AnalyticEphemeris, CalculatorSettings, CivilTime, SiderealCalculator, SpkEphemeris};

fn civil_time() -> CivilTime {
    CivilTime::from_ymd_hms(2024, 3, 20, 12, 0, 0, 330).expect("valid civil time")
}

fn analytic_bench(c: &mut Criterion) {
    let calculator = SiderealCalculator::new(AnalyticEphemeris::new(), CalculatorSettings::default());
    let time = civil_time();
    let instant = time.to_instant();

    let mut group = c.benchmark_group("analytic");
    group.bench_function("snapshot", |b| {
        b.iter(|| calculator.snapshot(black_box(&time)).expect("snapshot should succeed"))
    });
    group.bench_function("moon_position", |b| {
        b.iter(|| {
            calculator
                .position(black_box(Graha::Moon), black_box(&instant))
                .expect("position should succeed")
        })
    });
    group.finish();
}

/// Runs only when `GRAHAGHADI_KERNEL` points at a DE kernel
fn kernel_bench(c: &mut Criterion) {
    let Some(path) = std::env::var_os("GRAHAGHADI_KERNEL").map(PathBuf::from) else {
        eprintln!("Skipping kernel benchmarks: GRAHAGHADI_KERNEL not set");
        return;
    };
    let provider = SpkEphemeris::open(&path).expect("kernel should open");
    let calculator = SiderealCalculator::new(provider, CalculatorSettings::default());
    let time = civil_time();

    let mut group = c.benchmark_group("spk");
    group.sample_size(50);
    group.bench_function("snapshot", |b| {
        b.iter(|| calculator.snapshot(black_box(&time)).expect("snapshot should succeed"))
    });
    group.finish();
}

criterion_group!(benches, analytic_bench, kernel_bench);
criterion_main!(benches);
