/// Example: print one frame of a figure as plain ASCII, without raw mode
///
/// Usage: cargo run --example snapshot -- [figure 1-5] [perspective|axonometric]

use polyview_core::{PolyhedronKind, Projection, Scene, TransformParameters, Viewport};
use polyview_terminal::AsciiRenderer;
use std::env;

fn main() -> anyhow::Result<()> {
    let args: Vec<String> = env::args().collect();

    let kind = args.get(1).map(|s| s.parse::<PolyhedronKind>()).transpose()?.unwrap_or_default();
    let projection = args.get(2).map(|s| s.parse::<Projection>()).transpose()?.unwrap_or_default();

    let mut scene = Scene::new(Viewport::new(400.0, 400.0))?;
    scene.select(kind);
    scene.set_projection(projection);
    scene.update(TransformParameters {
        rotate_x: 20f64.to_radians(),
        rotate_y: 30f64.to_radians(),
        ..Default::default()
    });

    let mut renderer = AsciiRenderer::new(80, 40, scene.viewport());
    scene.render(&mut renderer)?;

    println!("{} ({})", kind, projection);
    for line in renderer.lines() {
        println!("{}", line.trim_end());
    }
    Ok(())
}
