/// Command-line configuration for the terminal frontend
use clap::{Parser, ValueEnum};
use spincube_core::animation::default_fps;
use spincube_core::{Animation, Mesh, RenderMode, RenderStyle, Renderer, CUBE_SIZE};

/// Render a spinning cube in the terminal
///
/// Examples:
///   # Wireframe cube at 30 FPS, press q to quit
///   spincube-terminal
///
///   # Point cloud, rotating, 60 FPS
///   spincube-terminal --mode points
///
///   # Print frame 45 of a spinning wireframe without taking over the terminal
///   spincube-terminal --spin --headless --frames 45
#[derive(Parser, Debug, Clone)]
#[command(name = "spincube-terminal")]
#[command(version, about, long_about = None)]
pub struct Args {
    /// What to draw: wireframe edges or one square per vertex
    #[arg(short = 'm', long, value_enum, default_value_t = Mode::Wireframe)]
    pub mode: Mode,

    /// Frames per second (defaults to 30 for wireframe, 60 for points)
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=240))]
    pub fps: Option<u32>,

    /// Rotate the wireframe too (points always rotate)
    #[arg(long)]
    pub spin: bool,

    /// Stop after this many frames
    #[arg(short = 'n', long)]
    pub frames: Option<u64>,

    /// Run without a terminal UI and print the last frame as text
    #[arg(long)]
    pub headless: bool,

    /// Grid width in headless mode
    #[arg(long, default_value_t = 80)]
    pub cols: u16,

    /// Grid height in headless mode
    #[arg(long, default_value_t = 40)]
    pub rows: u16,

    /// Enable verbose logging
    #[arg(short = 'v', long)]
    pub verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Mode {
    Wireframe,
    Points,
}

impl From<Mode> for RenderMode {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Wireframe => RenderMode::Wireframe,
            Mode::Points => RenderMode::PointCloud,
        }
    }
}

/// Frames run in headless mode when `--frames` is not given (two seconds)
const HEADLESS_SECONDS: u64 = 2;

impl Args {
    pub fn render_mode(&self) -> RenderMode {
        self.mode.into()
    }

    pub fn fps(&self) -> u32 {
        self.fps.unwrap_or_else(|| default_fps(self.render_mode()))
    }

    /// Frame limit, with a finite default when headless
    pub fn frame_limit(&self) -> Option<u64> {
        match (self.frames, self.headless) {
            (Some(n), _) => Some(n),
            (None, true) => Some(HEADLESS_SECONDS * u64::from(self.fps())),
            (None, false) => None,
        }
    }

    /// The demo cube animation described by these arguments
    pub fn animation(&self) -> Animation {
        let renderer = Renderer::new(self.render_mode()).with_style(RenderStyle {
            spin_wireframe: self.spin,
            ..RenderStyle::default()
        });
        Animation::new(Mesh::cube(CUBE_SIZE), renderer).with_fps(self.fps())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use spincube_core::{FPS, POINT_CLOUD_FPS};

    #[test]
    fn test_defaults() {
        let args = Args::parse_from(["spincube-terminal"]);
        assert_eq!(args.render_mode(), RenderMode::Wireframe);
        assert_eq!(args.fps(), FPS);
        assert_eq!(args.frame_limit(), None);
        assert!(!args.animation().renderer().style.spin_wireframe);
    }

    #[test]
    fn test_points_default_to_sixty_fps() {
        let args = Args::parse_from(["spincube-terminal", "--mode", "points"]);
        assert_eq!(args.render_mode(), RenderMode::PointCloud);
        assert_eq!(args.fps(), POINT_CLOUD_FPS);
        assert_eq!(args.animation().fps(), POINT_CLOUD_FPS);
    }

    #[test]
    fn test_headless_frame_limit() {
        let args = Args::parse_from(["spincube-terminal", "--headless"]);
        assert_eq!(args.frame_limit(), Some(2 * u64::from(FPS)));

        let args = Args::parse_from(["spincube-terminal", "--headless", "-n", "5", "--fps", "12"]);
        assert_eq!(args.frame_limit(), Some(5));
        assert_eq!(args.fps(), 12);
    }

    #[test]
    fn test_zero_fps_is_rejected() {
        assert!(Args::try_parse_from(["spincube-terminal", "--fps", "0"]).is_err());
    }
}
