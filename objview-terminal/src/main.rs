/// objview terminal - wireframe OBJ viewer
///
/// Controls:
///   - WASD / Arrow Keys: Rotate the model
///   - E/R: Roll rotation
///   - +/-: Zoom
///   - IJKL / U/O: Move
///   - P: Toggle perspective/orthographic
///   - Q/ESC: Quit
use anyhow::Context;
use clap::Parser;
use objview_core::{Controller, LoaderConfig, MeshModel, ViewerConfig};
use objview_terminal::TerminalApp;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Wavefront OBJ file to view.
    path: PathBuf,

    /// Magnitude the largest coordinate is scaled to after loading.
    #[arg(long, default_value_t = ViewerConfig::default().fit_extent)]
    fit: f32,

    /// Drop face references to vertices that have not been defined yet.
    #[arg(long)]
    strict_indices: bool,

    /// Rotation per key press, in degrees.
    #[arg(long, default_value_t = ViewerConfig::default().rotate_step)]
    rotate_step: f32,

    /// Translation per key press.
    #[arg(long, default_value_t = ViewerConfig::default().move_step)]
    move_step: f32,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let args = Args::parse();

    let model = MeshModel::with_config(LoaderConfig {
        strict_indices: args.strict_indices,
    });
    let config = ViewerConfig {
        fit_extent: args.fit,
        rotate_step: args.rotate_step,
        move_step: args.move_step,
        ..ViewerConfig::default()
    };
    let mut controller = Controller::new(model, config);
    controller
        .load(&args.path)
        .with_context(|| format!("Failed to load {}", args.path.display()))?;

    let mesh = controller.model().mesh();
    log::info!(
        "{} vertices, {} edges, {} dangling",
        mesh.vertex_count(),
        mesh.edge_count(),
        mesh.dangling_edges()
    );

    let title = args
        .path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| args.path.display().to_string());
    let mut app = TerminalApp::new(controller, title)?;
    app.run()?;

    Ok(())
}
