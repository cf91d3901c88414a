//! Report finalization benchmarks
//!
//! Measures the harness overhead around a workload:
//! - metric insertion into the ordered map
//! - finalize + write of a report, compact vs pretty JSON
//!
//! Toyota Way: Measure before optimizing (Genchi Genbutsu)
//!
//! Run with: cargo bench --bench report_finalize

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use metrics_harness::{Experiment, HarnessConfig, Metrics, ReportFormat, Workload};

const METRIC_COUNTS: [usize; 3] = [10, 100, 1_000];

/// Workload that only records `count` metrics
struct MetricsOnly {
    count: usize,
}

impl Workload for MetricsOnly {
    #[allow(clippy::cast_precision_loss)]
    fn run_workload(&mut self, metrics: &mut Metrics) -> bool {
        for i in 0..self.count {
            metrics.add(format!("metric_{i}"), i as f64 * 0.5);
        }
        true
    }

    fn elapsed_seconds(&self) -> f64 {
        0.0
    }
}

/// Benchmark inserting distinct metric names
fn bench_metric_insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("metric_insert");

    for count in METRIC_COUNTS {
        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, &count| {
            b.iter(|| {
                let mut metrics = Metrics::new();
                for i in 0..count {
                    metrics.add(format!("metric_{i}"), black_box(i));
                }
                metrics
            });
        });
    }

    group.finish();
}

/// Benchmark a full run: workload + finalize + file write
fn bench_run_and_write(c: &mut Criterion) {
    let dir = tempfile::tempdir().unwrap();
    let mut group = c.benchmark_group("run_and_write");

    for (label, format) in [("compact", ReportFormat::Json), ("pretty", ReportFormat::JsonPretty)] {
        for count in METRIC_COUNTS {
            let config = HarnessConfig::builder()
                .output_dir(dir.path())
                .format(format)
                .build();
            let mut exp =
                Experiment::new(format!("bench_{label}_{count}"), "bench", MetricsOnly { count }, config)
                    .unwrap();

            group.bench_with_input(BenchmarkId::new(label, count), &count, |b, _| {
                b.iter(|| exp.run().unwrap().passed());
            });
        }
    }

    group.finish();
}

criterion_group!(benches, bench_metric_insert, bench_run_and_write);
criterion_main!(benches);
