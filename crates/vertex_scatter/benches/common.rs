use std::time::Duration;

use criterion::{Criterion, Throughput};
use glam::Vec3;
use vertex_scatter::prelude::TargetPoint;
use vertex_scatter::scene::vertex_component;

pub const SAMPLE_SIZE: usize = 20;
pub const WARM_UP: Duration = Duration::from_secs(1);
pub const MEASUREMENT_TIME: Duration = Duration::from_secs(2);

pub fn default_criterion() -> Criterion {
    Criterion::default()
        .configure_from_args()
        .sample_size(SAMPLE_SIZE)
        .warm_up_time(WARM_UP)
        .measurement_time(MEASUREMENT_TIME)
}

pub fn elements_throughput(elements: usize) -> Throughput {
    Throughput::Elements(elements.max(1) as u64)
}

/// Vertices of a square grid with `side * side` points, one unit apart.
#[allow(dead_code)]
pub fn grid_vertices(side: usize) -> Vec<Vec3> {
    (0..side * side)
        .map(|i| Vec3::new((i % side) as f32, 0.0, (i / side) as f32))
        .collect()
}

pub fn grid_targets(side: usize) -> Vec<TargetPoint> {
    (0..side * side)
        .map(|i| {
            TargetPoint::new(
                vertex_component("grid", i),
                Vec3::new((i % side) as f32, 0.0, (i / side) as f32),
            )
        })
        .collect()
}
