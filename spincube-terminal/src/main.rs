/// Spincube Terminal Demo - Rotating Cube
///
/// Draws the cube as a wireframe or a point cloud on a character grid.
/// Controls:
///   - Q/ESC/Ctrl-C: Quit
use anyhow::{Context, Result};
use clap::Parser;
use spincube_terminal::{render_headless, Args, TerminalApp};
use tracing::info;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let args = Args::parse();

    let level = if args.verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::WARN
    };
    let env_filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let mut animation = args.animation();
    info!(mode = ?args.render_mode(), fps = args.fps(), "starting");

    if args.headless {
        let frames = args.frame_limit().unwrap_or_default();
        let surface = render_headless(
            &mut animation,
            usize::from(args.cols),
            usize::from(args.rows),
            frames,
        );
        print!("{}", surface.to_text());
        return Ok(());
    }

    let mut app = TerminalApp::new(animation, args.frame_limit())
        .context("Failed to query terminal size")?;
    let frames = app.run().context("Terminal rendering failed")?;

    info!(frames, "finished");
    Ok(())
}
