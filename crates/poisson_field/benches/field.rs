mod common;

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use glam::Vec2;
use poisson_field::config::SamplerConfig;
use poisson_field::simulation::Simulation;

const RASTER_SIZES: [usize; 3] = [128, 400, 800];

fn field_raster_benches(c: &mut Criterion) {
    let Ok(mut sim) = Simulation::try_new(SamplerConfig::new(20, 1000)) else {
        return;
    };
    let mut rng = common::case_rng(0xF1E1D, 0);
    if sim.run(Vec2::splat(0.5), &mut rng).is_err() {
        return;
    }

    let mut group = c.benchmark_group("field/raster");
    for &size in &RASTER_SIZES {
        group.throughput(common::elements_throughput(size * size));

        group.bench_with_input(BenchmarkId::new("parallel", size), &size, |b, &size| {
            b.iter(|| {
                let raster = sim.field().evaluate(size, size);
                black_box(raster.map(|r| r.unresolved).unwrap_or(0));
            });
        });

        group.bench_with_input(BenchmarkId::new("sequential", size), &size, |b, &size| {
            b.iter(|| {
                let raster = sim.field().evaluate_sequential(size, size);
                black_box(raster.map(|r| r.unresolved).unwrap_or(0));
            });
        });
    }
    group.finish();
}

criterion_group! {
    name = benches;
    config = common::default_criterion();
    targets = field_raster_benches
}
criterion_main!(benches);
