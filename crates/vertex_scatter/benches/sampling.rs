mod common;

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::SeedableRng;
use vertex_scatter::prelude::{plan_placements, sample_without_replacement, ScatterParameters};

fn subsample_benches(c: &mut Criterion) {
    let mut group = c.benchmark_group("sampling/without_replacement");

    for &side in &[16usize, 64, 256] {
        let targets = common::grid_targets(side);
        let n = targets.len();
        for &density in &[10u8, 50, 100] {
            let amount = n * density as usize / 100;
            group.throughput(common::elements_throughput(amount));
            group.bench_with_input(
                BenchmarkId::new(format!("density_{density}"), n),
                &targets,
                |b, targets| {
                    let mut rng = StdRng::seed_from_u64(0xC0FFEE);
                    b.iter(|| black_box(sample_without_replacement(targets, amount, &mut rng)));
                },
            );
        }
    }

    group.finish();
}

fn plan_benches(c: &mut Criterion) {
    let mut group = c.benchmark_group("sampling/plan_placements");
    let params = ScatterParameters::new()
        .with_scale_range(0.5, 2.0)
        .with_rotation_range(0.0, 360.0)
        .with_density(50);

    for &side in &[16usize, 64, 256] {
        let targets = common::grid_targets(side);
        group.throughput(common::elements_throughput(targets.len() / 2));
        group.bench_with_input(BenchmarkId::from_parameter(targets.len()), &targets, |b, t| {
            let mut rng = StdRng::seed_from_u64(0xDEADBEEF);
            b.iter(|| black_box(plan_placements(t, &params, &mut rng)));
        });
    }

    group.finish();
}

criterion_group! {
    name = benches;
    config = common::default_criterion();
    targets = subsample_benches, plan_benches
}
criterion_main!(benches);
