use rand::rngs::StdRng;
use rand::SeedableRng;
use vertex_scatter::prelude::*;
use vertex_scatter_demos::{grid_scene, init_tracing, print_placements};

fn main() -> anyhow::Result<()> {
    init_tracing();

    // A 6x6 ground plane and a rock to scatter onto it.
    let mut scene = grid_scene("rock", "ground", 6, 2.0);
    scene.select_source_and_mesh_vertices("rock", "ground");

    let selection = read_selection(&scene)?;
    let params = ScatterParameters::new()
        .with_scale_range(0.6, 1.4)
        .with_rotation_range(0.0, 360.0)
        .with_density(30);

    let mut sink = FnSink::new(|event| match event {
        ScatterEvent::ScatterStarted {
            source,
            target_count,
            sample_count,
        } => println!("scattering {source}: {sample_count} of {target_count} vertices"),
        ScatterEvent::Warning { context, message } => println!("warning [{context}]: {message}"),
        _ => {}
    });

    // Fixed seed so the printout is stable between runs.
    let mut rng = StdRng::seed_from_u64(2025);
    let result = scatter_with_events(
        &mut scene,
        &selection.source,
        &selection.targets,
        &params,
        &mut rng,
        &mut sink,
    )?;

    print_placements(&result);
    println!(
        "{} instances, {} targets left empty",
        result.instance_count(),
        result.targets_skipped
    );

    Ok(())
}
