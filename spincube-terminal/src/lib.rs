/// Terminal frontend: drives the cube animation on a character grid
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyModifiers},
    execute, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{self},
};
use spincube_core::{Animation, FixedStepScheduler, FrameLoop, Scheduler, Tick};
use std::io::{self, stdout, Write};
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

pub mod config;
pub mod renderer;

pub use config::Args;
pub use renderer::TerminalSurface;

/// Waits for the next frame by polling the keyboard, so `q`, `Esc` and
/// `Ctrl-C` stop the loop without a separate input thread.
pub struct KeyboardScheduler {
    frame_limit: Option<u64>,
    frames: u64,
    last_wake: Option<Instant>,
}

impl KeyboardScheduler {
    pub fn new(frame_limit: Option<u64>) -> Self {
        Self {
            frame_limit,
            frames: 0,
            last_wake: None,
        }
    }

    fn poll_quit(&self, timeout: Duration) -> io::Result<bool> {
        let deadline = Instant::now() + timeout;
        loop {
            let left = deadline.saturating_duration_since(Instant::now());
            if !event::poll(left)? {
                return Ok(false);
            }
            if let Event::Key(KeyEvent {
                code, modifiers, ..
            }) = event::read()?
            {
                match code {
                    KeyCode::Char('q') | KeyCode::Esc => return Ok(true),
                    KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                        return Ok(true)
                    }
                    _ => {}
                }
            }
            if left.is_zero() {
                return Ok(false);
            }
        }
    }
}

impl Scheduler for KeyboardScheduler {
    fn wait(&mut self, delay: Duration) -> Tick {
        if self.frame_limit.is_some_and(|limit| self.frames >= limit) {
            return Tick::Stop;
        }

        let busy = self.last_wake.map(|t| t.elapsed()).unwrap_or_default();
        if busy > delay {
            debug!(?busy, ?delay, "frame overran its budget");
        }

        match self.poll_quit(delay.saturating_sub(busy)) {
            Ok(true) => return Tick::Stop,
            Ok(false) => {}
            Err(e) => {
                warn!(error = %e, "terminal input failed, stopping");
                return Tick::Stop;
            }
        }

        self.frames += 1;
        self.last_wake = Some(Instant::now());
        Tick::Continue
    }
}

/// Main application struct for terminal rendering
pub struct TerminalApp {
    animation: Animation,
    surface: TerminalSurface,
    frame_limit: Option<u64>,
}

impl TerminalApp {
    pub fn new(animation: Animation, frame_limit: Option<u64>) -> io::Result<Self> {
        let (width, height) = terminal::size()?;
        // Leave the top row for the status line.
        let rows = height.saturating_sub(1).max(1);
        let surface = TerminalSurface::new(width as usize, rows as usize, animation.viewport());

        Ok(Self {
            animation,
            surface,
            frame_limit,
        })
    }

    pub fn run(&mut self) -> io::Result<u64> {
        terminal::enable_raw_mode()?;
        execute!(stdout(), terminal::EnterAlternateScreen, cursor::Hide)?;

        let result = self.main_loop();

        // Cleanup
        terminal::disable_raw_mode()?;
        execute!(stdout(), terminal::LeaveAlternateScreen, cursor::Show)?;

        result
    }

    fn main_loop(&mut self) -> io::Result<u64> {
        let mut frame_loop = FrameLoop::new(KeyboardScheduler::new(self.frame_limit));
        let mut stdout = stdout();

        while frame_loop.tick(&mut self.animation, &mut self.surface) {
            self.present(&mut stdout)?;
        }

        Ok(frame_loop.frames())
    }

    fn present<W: Write>(&self, out: &mut W) -> io::Result<()> {
        let state = self.animation.state();
        queue!(
            out,
            cursor::MoveTo(0, 0),
            SetForegroundColor(Color::Yellow),
            Print(format!(
                "spincube | {:?} | {} FPS | angle {:.2} rad | q=Quit",
                self.animation.renderer().mode,
                self.animation.fps(),
                state.angle
            )),
            terminal::Clear(terminal::ClearType::UntilNewLine),
            ResetColor,
            cursor::MoveTo(0, 1)
        )?;

        self.surface.draw(out)?;
        out.flush()
    }
}

/// Run `frames` steps without a terminal and return the final grid.
pub fn render_headless(animation: &mut Animation, cols: usize, rows: usize, frames: u64) -> TerminalSurface {
    let mut surface = TerminalSurface::new(cols, rows, animation.viewport());
    let mut frame_loop = FrameLoop::new(FixedStepScheduler::new(frames));
    let ran = frame_loop.run(animation, &mut surface);

    info!(
        frames = ran,
        virtual_time = ?frame_loop.scheduler().elapsed(),
        angle = animation.state().angle,
        "headless run finished"
    );
    surface
}

#[cfg(test)]
mod tests {
    use super::*;
    use spincube_core::{Mesh, RenderMode, Renderer, CUBE_SIZE};

    #[test]
    fn test_headless_wireframe_draws_cube() {
        let mut animation = Animation::new(Mesh::cube(CUBE_SIZE), Renderer::new(RenderMode::Wireframe));
        let surface = render_headless(&mut animation, 80, 40, 3);

        assert!(surface.inked() > 0);
        assert_eq!(surface.to_text().lines().count(), 40);
        assert!(animation.state().angle > 0.0);
    }

    #[test]
    fn test_headless_zero_frames_is_blank() {
        let mut animation = Animation::default();
        let surface = render_headless(&mut animation, 20, 10, 0);
        assert_eq!(surface.inked(), 0);
    }

    #[test]
    fn test_headless_points_use_fill_glyph() {
        let mut animation = Animation::new(Mesh::cube(CUBE_SIZE), Renderer::new(RenderMode::PointCloud));
        let surface = render_headless(&mut animation, 80, 40, 1);
        assert!(surface.to_text().contains('#'));
        assert!(!surface.to_text().contains('-'));
    }
}
