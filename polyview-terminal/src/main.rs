/// Polyview Terminal - interactive transformation viewer
///
/// Shows one of five regular solids as a wireframe and lets the keyboard
/// drive every transform parameter.
/// Controls:
///   - WASD / Arrow Keys: Rotate about X and Y
///   - E/R: Rotate about Z
///   - P: Toggle perspective / axonometric
///   - 1-5: Select figure
///   - Q/ESC: Quit
use anyhow::{Context, Result};
use clap::Parser;
use env_logger::Env;
use log::info;
use polyview_core::{PolyhedronKind, Projection, Scene};
use polyview_terminal::config::{load_config, ViewerConfig};
use polyview_terminal::TerminalApp;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "polyview-terminal")]
#[command(about = "Affine and projective transformations of regular polyhedra")]
#[command(version)]
struct Cli {
    /// TOML file with the starting scene and transform values.
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Figure to show first: 1-5 or a name such as "icosahedron".
    #[arg(short, long)]
    figure: Option<PolyhedronKind>,
    /// "perspective" or "axonometric".
    #[arg(short, long)]
    projection: Option<Projection>,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => ViewerConfig::default(),
    };

    let mut scene = Scene::new(config.viewport()).context("failed to build polyhedron catalog")?;
    scene.update(config.params()?);
    scene.select(cli.figure.map_or_else(|| config.figure(), Ok)?);
    scene.set_projection(cli.projection.map_or_else(|| config.projection(), Ok)?);
    info!(
        "starting with {} in {} projection",
        scene.kind(),
        scene.projection()
    );

    let mut app = TerminalApp::new(scene)?;
    app.run()?;

    Ok(())
}
