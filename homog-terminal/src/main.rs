/// Homog Terminal Demo - Rotating Cube
///
/// Renders a cube through the homog-core matrix pipeline.
/// Controls:
///   - WASD / Arrow Keys: Rotate the cube
///   - E/R: Roll rotation
///   - Q/ESC: Quit
use anyhow::Context;
use clap::Parser;
use homog_core::MAX_FIELD_OF_VIEW_DEGREES;
use homog_terminal::{Mesh, TerminalApp, ViewerConfig};

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let config = ViewerConfig::parse();
    if config.fov > MAX_FIELD_OF_VIEW_DEGREES {
        log::warn!(
            "Field of view {} exceeds {} degrees and will be clamped",
            config.fov,
            MAX_FIELD_OF_VIEW_DEGREES
        );
    }
    anyhow::ensure!(
        config.near > 0.0 && config.far > config.near,
        "Clip distances must satisfy 0 < near < far (got near {}, far {})",
        config.near,
        config.far
    );

    let cube = Mesh::cube(config.size);
    log::info!("Starting terminal renderer with {} triangles", cube.triangles.len());

    let mut app = TerminalApp::new(cube, config).context("Failed to query terminal size")?;
    app.run().context("Terminal renderer failed")?;

    log::info!("Terminal renderer stopped");
    Ok(())
}
