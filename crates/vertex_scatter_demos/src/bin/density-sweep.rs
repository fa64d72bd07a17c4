use rand::rngs::StdRng;
use rand::SeedableRng;
use vertex_scatter::prelude::*;
use vertex_scatter_demos::{grid_scene, init_tracing};

fn main() -> anyhow::Result<()> {
    init_tracing();

    let mut scene = grid_scene("tree", "terrain", 10, 1.0);
    scene.select_source_and_mesh_vertices("tree", "terrain");
    let (source, targets) = read_selection(&scene)?.into_parts();

    let mut rng = StdRng::seed_from_u64(7);
    let mut density = 10u8;
    while density <= 100 {
        let mut warnings = VecSink::only([ScatterEventKind::Warning]);
        let params = ScatterParameters::new()
            .with_scale_range(0.5, 1.5)
            .with_density(density);
        let result = scatter_with_events(
            &mut scene,
            &source,
            &targets,
            &params,
            &mut rng,
            &mut warnings,
        )?;
        println!(
            "density {:>3}% -> {:>3} instances ({} warnings)",
            density,
            result.instance_count(),
            warnings.len()
        );
        density += 10;
    }
    println!("{} instances in scene", scene.instance_count());

    Ok(())
}
