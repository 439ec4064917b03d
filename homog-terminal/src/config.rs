/// Command line configuration for the viewer
use clap::Parser;

/// Spin a shaded cube in the terminal.
#[derive(Parser, Debug, Clone)]
#[command(name = "homog-terminal", version)]
pub struct ViewerConfig {
    /// Vertical field of view in degrees (clamped to 179)
    #[arg(long, default_value_t = 60.0)]
    pub fov: f64,

    /// Near clip distance
    #[arg(long, default_value_t = 0.1)]
    pub near: f64,

    /// Far clip distance
    #[arg(long, default_value_t = 100.0)]
    pub far: f64,

    /// Distance from the camera to the cube center
    #[arg(long, default_value_t = 4.0)]
    pub distance: f64,

    /// Edge length of the cube
    #[arg(long, default_value_t = 2.0)]
    pub size: f64,

    /// Target frames per second
    #[arg(long, default_value_t = 30)]
    pub fps: u32,

    /// Automatic spin per frame, in radians
    #[arg(long, default_value_t = 0.015)]
    pub spin: f64,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self::parse_from(["homog-terminal"])
    }
}
