#![forbid(unsafe_code)]

use glam::Vec3;
use tracing_subscriber::EnvFilter;
use vertex_scatter::prelude::{MemoryScene, ScatterResult};

/// Installs a formatted tracing subscriber honoring `RUST_LOG`, defaulting to `info`.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

/// Builds a scene holding a `source` transform and a `side` x `side` grid mesh named `base`,
/// centered on the origin with `spacing` units between vertices.
pub fn grid_scene(source: &str, base: &str, side: usize, spacing: f32) -> MemoryScene {
    let half = (side.saturating_sub(1)) as f32 * spacing * 0.5;
    let vertices = (0..side * side)
        .map(|i| {
            let x = (i % side) as f32 * spacing - half;
            let z = (i / side) as f32 * spacing - half;
            Vec3::new(x, 0.0, z)
        })
        .collect();
    MemoryScene::new()
        .with_transform(source)
        .with_mesh(base, Vec3::ZERO, vertices)
}

/// Prints one line per placement.
pub fn print_placements(result: &ScatterResult) {
    for placement in &result.placements {
        let i = &placement.instruction;
        println!(
            "{:<18} at {:>7.2} {:>7.2} {:>7.2}  scale {:.3}  rotation {:>6.1}",
            placement.instance,
            i.target.position.x,
            i.target.position.y,
            i.target.position.z,
            i.scale,
            i.rotation
        );
    }
}
