//! Profiling and drift detection performance benchmarks.
//!
//! Measures per-column analysis, full dataset profiling, and baseline
//! comparison over generated datasets.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use driftwatch::{DatasetProfiler, Record, Value};

/// Generate a realistic mixed-type dataset.
fn generate_records(rows: usize) -> Vec<Record> {
    let mut rng = StdRng::seed_from_u64(42);
    let statuses = ["ACTIVE", "INACTIVE", "PENDING", "CLOSED"];

    (0..rows)
        .map(|i| {
            let mut record = Record::new();
            record.insert("id".to_string(), Value::Integer(i as i64));
            record.insert(
                "status".to_string(),
                Value::from(statuses[rng.gen_range(0..statuses.len())]),
            );
            record.insert(
                "amount".to_string(),
                Value::Float(rng.gen_range(10.0..500.0)),
            );
            record.insert(
                "age".to_string(),
                if rng.gen_bool(0.05) {
                    Value::Null
                } else {
                    Value::Integer(rng.gen_range(18..90))
                },
            );
            record.insert(
                "signup_date".to_string(),
                Value::from(format!("2024-{:02}-{:02}", rng.gen_range(1..13), rng.gen_range(1..29)).as_str()),
            );
            record
        })
        .collect()
}

fn bench_profile_dataset(c: &mut Criterion) {
    let mut group = c.benchmark_group("profile_dataset");

    for rows in [100, 1_000, 10_000].iter() {
        let records = generate_records(*rows);

        group.throughput(Throughput::Elements(*rows as u64));
        group.bench_with_input(BenchmarkId::new("rows", rows), &records, |b, records| {
            let profiler = DatasetProfiler::new();
            b.iter(|| profiler.profile_dataset(black_box(records), "bench").unwrap());
        });
    }

    group.finish();
}

fn bench_detect_drift(c: &mut Criterion) {
    let mut group = c.benchmark_group("detect_drift");

    for rows in [100, 1_000, 10_000].iter() {
        let baseline_records = generate_records(*rows);
        let current_records = generate_records(*rows);

        let profiler = DatasetProfiler::new();
        let baseline = profiler
            .profile_dataset(&baseline_records, "bench")
            .unwrap();

        group.throughput(Throughput::Elements(*rows as u64));
        group.bench_with_input(
            BenchmarkId::new("rows", rows),
            &current_records,
            |b, records| {
                b.iter(|| profiler.detect_drift(black_box(&baseline), black_box(records)).unwrap());
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_profile_dataset, bench_detect_drift);
criterion_main!(benches);
