/// Per-frame animation state and the frame step
use std::f32::consts::PI;
use std::time::Duration;

use crate::geometry::Mesh;
use crate::projection::Viewport;
use crate::render::{RenderMode, Renderer};
use crate::surface::{Color, Surface, BACKGROUND};

/// Frame rate of the wireframe demo
pub const FPS: u32 = 30;
/// Frame rate of the point-cloud demo
pub const POINT_CLOUD_FPS: u32 = 60;

/// Rotation angle and depth offset carried from frame to frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationState {
    /// Radians, unbounded
    pub angle: f32,
    pub dz: f32,
}

impl AnimationState {
    pub fn new() -> Self {
        Self { angle: 0.0, dz: 1.0 }
    }

    /// The state one frame later: half a turn per second whatever the rate.
    pub fn advance(self, fps: u32) -> Self {
        let dt = 1.0 / fps as f32;
        Self {
            angle: self.angle + PI * dt,
            ..self
        }
    }
}

impl Default for AnimationState {
    fn default() -> Self {
        Self::new()
    }
}

/// Default frame rate for a render mode
pub fn default_fps(mode: RenderMode) -> u32 {
    match mode {
        RenderMode::Wireframe => FPS,
        RenderMode::PointCloud => POINT_CLOUD_FPS,
    }
}

/// Everything one frame step needs: the mesh, how to draw it, and the state.
#[derive(Debug, Clone)]
pub struct Animation {
    mesh: Mesh,
    renderer: Renderer,
    state: AnimationState,
    fps: u32,
    background: Color,
}

impl Animation {
    pub fn new(mesh: Mesh, renderer: Renderer) -> Self {
        Self {
            mesh,
            renderer,
            state: AnimationState::new(),
            fps: default_fps(renderer.mode),
            background: BACKGROUND,
        }
    }

    /// Override the frame rate. Zero is treated as one frame per second.
    pub fn with_fps(mut self, fps: u32) -> Self {
        self.fps = fps.max(1);
        self
    }

    pub fn with_state(mut self, state: AnimationState) -> Self {
        self.state = state;
        self
    }

    pub fn with_background(mut self, background: Color) -> Self {
        self.background = background;
        self
    }

    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }

    pub fn renderer(&self) -> &Renderer {
        &self.renderer
    }

    pub fn state(&self) -> AnimationState {
        self.state
    }

    pub fn fps(&self) -> u32 {
        self.fps
    }

    pub fn viewport(&self) -> Viewport {
        self.renderer.viewport
    }

    /// Delay between two frames (`1000 / fps` ms)
    pub fn frame_delay(&self) -> Duration {
        Duration::from_secs_f64(1.0 / f64::from(self.fps))
    }

    /// Advance the state, clear the surface, and draw the mesh.
    pub fn step<S: Surface + ?Sized>(&mut self, surface: &mut S) -> AnimationState {
        self.state = self.state.advance(self.fps);

        let viewport = self.renderer.viewport;
        surface.clear_rect(
            0.0,
            0.0,
            viewport.width as f32,
            viewport.height as f32,
            self.background,
        );
        self.renderer
            .render(&self.mesh, self.state.dz, self.state.angle, surface);

        self.state
    }
}

impl Default for Animation {
    fn default() -> Self {
        Self::new(Mesh::default(), Renderer::new(RenderMode::Wireframe))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::projection::{HEIGHT, WIDTH};
    use crate::surface::{DrawCall, RecordingSurface};
    use approx::assert_relative_eq;

    #[test]
    fn test_initial_state() {
        let state = AnimationState::default();
        assert_eq!(state.angle, 0.0);
        assert_eq!(state.dz, 1.0);
    }

    #[test]
    fn test_advance_is_half_turn_per_second() {
        let mut state = AnimationState::new();
        for _ in 0..FPS {
            state = state.advance(FPS);
        }
        assert_relative_eq!(state.angle, PI, epsilon = 1e-4);
        assert_eq!(state.dz, 1.0);

        let mut fast = AnimationState::new();
        for _ in 0..POINT_CLOUD_FPS {
            fast = fast.advance(POINT_CLOUD_FPS);
        }
        assert_relative_eq!(fast.angle, PI, epsilon = 1e-4);
    }

    #[test]
    fn test_frame_delay() {
        let animation = Animation::default();
        assert_eq!(animation.fps(), FPS);
        assert_eq!(animation.frame_delay().as_millis(), 33);

        let points = Animation::new(Mesh::default(), Renderer::new(RenderMode::PointCloud));
        assert_eq!(points.fps(), POINT_CLOUD_FPS);
        assert_eq!(points.frame_delay().as_millis(), 16);

        assert_eq!(Animation::default().with_fps(0).fps(), 1);
    }

    #[test]
    fn test_step_clears_then_draws() {
        let mut animation = Animation::default();
        let mut surface = RecordingSurface::new();

        let state = animation.step(&mut surface);

        assert_relative_eq!(state.angle, PI / FPS as f32);
        assert_eq!(animation.state(), state);
        assert_eq!(surface.calls().len(), 17);
        assert_eq!(
            surface.calls()[0],
            DrawCall::Clear {
                x: 0.0,
                y: 0.0,
                w: WIDTH as f32,
                h: HEIGHT as f32,
                color: BACKGROUND,
            }
        );
        assert_eq!(surface.lines().count(), 16);
    }
}
