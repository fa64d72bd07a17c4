use vertex_scatter::prelude::*;
use vertex_scatter_demos::{grid_scene, init_tracing};

fn main() -> anyhow::Result<()> {
    init_tracing();

    let mut scene = grid_scene("lamp", "street", 4, 3.0).with_shape("lampShape");
    let mut tool = ScatterTool::new();
    println!(
        "form: object='{}' base='{}'",
        tool.scatter_object_name, tool.scatter_base_name
    );

    // Selecting the shape instead of its transform is reported, not fatal.
    scene.select(["lampShape", "street.vtx[0:15]"]);
    tool.trigger(&mut scene);
    println!("status: {}", tool.last_message().unwrap_or_default());

    scene.select_source_and_mesh_vertices("lamp", "street");
    tool.select_scatter_object(&scene)?;
    tool.select_scatter_base(&scene)?;
    println!(
        "form: object='{}' base='{}'",
        tool.scatter_object_name, tool.scatter_base_name
    );

    tool.decrease_density();
    tool.decrease_density();
    tool.params = tool
        .params
        .with_scale_range(0.9, 1.1)
        .with_rotation_range(0.0, 90.0);
    if let Some(result) = tool.trigger(&mut scene) {
        println!("{} lamps placed", result.instance_count());
    }
    println!("status: {}", tool.last_message().unwrap_or_default());

    Ok(())
}
