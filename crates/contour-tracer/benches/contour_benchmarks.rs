//! Benchmarks for contour classification, tracing and the full pipeline.
//!
//! Run with: cargo bench --package contour-tracer --bench contour_benchmarks

use contour_tracer::crossings::CrossingTable;
use contour_tracer::simplify::{distance_threshold, simplify};
use contour_tracer::smooth::smooth_path;
use contour_tracer::{
    compute_contours, trace_level, ContourConfig, Field, Identity, LevelSpec, Point, Projector,
    Sampler,
};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::Rng;

/// Generate a smooth field with hills and valleys, values roughly 0..100.
fn generate_smooth_field(width: usize, height: usize) -> Field {
    let mut data = vec![0.0f64; width * height];

    for y in 0..height {
        for x in 0..width {
            let fx = x as f64 / width as f64;
            let fy = y as f64 / height as f64;

            let v1 = (fx * std::f64::consts::PI * 4.0).sin() * 20.0;
            let v2 = (fy * std::f64::consts::PI * 4.0).sin() * 20.0;
            let v3 = ((fx + fy) * std::f64::consts::PI * 2.0).sin() * 10.0;

            data[y * width + x] = 50.0 + v1 + v2 + v3;
        }
    }
    Field::new(data, width, height).expect("dimensions match")
}

/// Generate a field with random noise (many small loops and saddles).
fn generate_noisy_field(width: usize, height: usize) -> Field {
    let mut rng = rand::thread_rng();
    let data = (0..width * height)
        .map(|_| 50.0 + rng.gen_range(-25.0..25.0))
        .collect();
    Field::new(data, width, height).expect("dimensions match")
}

/// A wobbly circle with `n` points.
fn generate_ring(n: usize) -> Vec<Point> {
    let mut rng = rand::thread_rng();
    (0..n)
        .map(|i| {
            let a = i as f64 / n as f64 * std::f64::consts::TAU;
            let r = 100.0 + rng.gen_range(-1.0..1.0);
            Point::new(r * a.cos(), r * a.sin())
        })
        .collect()
}

// =============================================================================
// CLASSIFICATION BENCHMARKS
// =============================================================================

fn bench_crossing_table(c: &mut Criterion) {
    let mut group = c.benchmark_group("crossing_table");

    let sizes = [(64, 64), (128, 128), (256, 256), (512, 512)];

    for (width, height) in sizes {
        let smooth = generate_smooth_field(width, height);
        let noisy = generate_noisy_field(width, height);

        group.throughput(Throughput::Elements((width * height) as u64));

        group.bench_with_input(
            BenchmarkId::new("smooth", format!("{}x{}", width, height)),
            &smooth,
            |b, field| {
                let sampler = Sampler::new(field, 0.0);
                b.iter(|| CrossingTable::build(&sampler, black_box(50.0)));
            },
        );

        group.bench_with_input(
            BenchmarkId::new("noisy", format!("{}x{}", width, height)),
            &noisy,
            |b, field| {
                let sampler = Sampler::new(field, 0.0);
                b.iter(|| CrossingTable::build(&sampler, black_box(50.0)));
            },
        );
    }

    group.finish();
}

// =============================================================================
// SINGLE LEVEL BENCHMARKS
// =============================================================================

fn bench_trace_level(c: &mut Criterion) {
    let mut group = c.benchmark_group("trace_level");

    let config = ContourConfig::default();
    let unfilled = ContourConfig {
        fill: false,
        ..ContourConfig::default()
    };

    for (width, height) in [(128, 128), (256, 256)] {
        let field = generate_smooth_field(width, height);
        let projector = Projector::new(Sampler::new(&field, 0.0), &Identity, &Identity);

        group.bench_function(BenchmarkId::new("with_fill", format!("{}x{}", width, height)), |b| {
            b.iter(|| trace_level(&projector, black_box(50.0), &config));
        });

        group.bench_function(BenchmarkId::new("lines_only", format!("{}x{}", width, height)), |b| {
            b.iter(|| trace_level(&projector, black_box(50.0), &unfilled));
        });
    }

    group.finish();
}

// =============================================================================
// PATH POST-PROCESSING BENCHMARKS
// =============================================================================

fn bench_path_processing(c: &mut Criterion) {
    let mut group = c.benchmark_group("path_processing");

    for n in [100, 1000, 10000] {
        let ring = generate_ring(n);
        let threshold = distance_threshold(&ring, 1.0);

        group.throughput(Throughput::Elements(n as u64));

        group.bench_with_input(BenchmarkId::new("simplify", n), &ring, |b, ring| {
            b.iter(|| simplify(black_box(ring.clone()), true, threshold));
        });

        for passes in [1, 2] {
            group.bench_with_input(
                BenchmarkId::new(format!("smooth_{}_passes", passes), n),
                &ring,
                |b, ring| {
                    b.iter(|| smooth_path(black_box(ring), true, passes));
                },
            );
        }
    }

    group.finish();
}

// =============================================================================
// FULL PIPELINE BENCHMARKS
// =============================================================================

fn bench_compute_contours(c: &mut Criterion) {
    let mut group = c.benchmark_group("compute_contours");
    group.sample_size(20);

    let field = generate_smooth_field(256, 256);
    let intervals = [10.0, 5.0, 2.0];

    for interval in intervals {
        let levels = LevelSpec::covering(0.0, 100.0, interval).expect("valid interval");
        let parallel = ContourConfig {
            levels,
            ..ContourConfig::default()
        };
        let sequential = ContourConfig {
            parallel: false,
            ..parallel.clone()
        };

        group.bench_with_input(BenchmarkId::new("parallel", interval), &parallel, |b, config| {
            b.iter(|| compute_contours(black_box(&field), config, &Identity, &Identity));
        });

        group.bench_with_input(
            BenchmarkId::new("sequential", interval),
            &sequential,
            |b, config| {
                b.iter(|| compute_contours(black_box(&field), config, &Identity, &Identity));
            },
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_crossing_table,
    bench_trace_level,
    bench_path_processing,
    bench_compute_contours,
);
criterion_main!(benches);
