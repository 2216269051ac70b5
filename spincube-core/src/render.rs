/// Mesh rendering onto a [`Surface`]
use tracing::trace;

use crate::geometry::Mesh;
use crate::projection::{ScreenPoint, Viewport};
use crate::surface::{Color, Surface, FOREGROUND};
use crate::vertex::Vertex;

/// Stroke width of wireframe edges, in pixels
pub const LINE_WIDTH: f32 = 3.0;
/// Side of the square drawn per vertex in point-cloud mode, in pixels
pub const POINT_SIZE: f32 = 30.0;

/// How a mesh is turned into draw calls
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderMode {
    /// One line per consecutive vertex pair of every face
    #[default]
    Wireframe,
    /// One filled square per vertex
    PointCloud,
}

/// Presentation constants for a [`Renderer`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderStyle {
    pub color: Color,
    pub line_width: f32,
    pub point_size: f32,
    /// Rotate wireframe vertices by the animation angle too. Point clouds
    /// always rotate.
    pub spin_wireframe: bool,
}

impl Default for RenderStyle {
    fn default() -> Self {
        Self {
            color: FOREGROUND,
            line_width: LINE_WIDTH,
            point_size: POINT_SIZE,
            spin_wireframe: false,
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Renderer {
    pub mode: RenderMode,
    pub viewport: Viewport,
    pub style: RenderStyle,
}

impl Renderer {
    pub fn new(mode: RenderMode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    pub fn with_viewport(mut self, viewport: Viewport) -> Self {
        self.viewport = viewport;
        self
    }

    pub fn with_style(mut self, style: RenderStyle) -> Self {
        self.style = style;
        self
    }

    /// Issue the draw calls for `mesh` pushed `dz` away from the eye and
    /// turned by `angle` radians.
    pub fn render<S: Surface + ?Sized>(&self, mesh: &Mesh, dz: f32, angle: f32, surface: &mut S) {
        match self.mode {
            RenderMode::Wireframe => self.render_wireframe(mesh, dz, angle, surface),
            RenderMode::PointCloud => self.render_points(mesh, dz, angle, surface),
        }
    }

    fn render_wireframe<S: Surface + ?Sized>(&self, mesh: &Mesh, dz: f32, angle: f32, surface: &mut S) {
        let angle = if self.style.spin_wireframe { angle } else { 0.0 };
        let mut lines = 0usize;

        for (a, b) in mesh.edges() {
            let pa = self.to_screen(a, dz, angle);
            let pb = self.to_screen(b, dz, angle);
            surface.draw_line(pa, pb, self.style.line_width, self.style.color);
            lines += 1;
        }

        trace!(lines, "wireframe rendered");
    }

    fn render_points<S: Surface + ?Sized>(&self, mesh: &Mesh, dz: f32, angle: f32, surface: &mut S) {
        let s = self.style.point_size;

        for &vertex in mesh.vertices() {
            let p = self.to_screen(vertex, dz, angle);
            surface.fill_rect(p.x - s / 2.0, p.y - s / 2.0, s, s, self.style.color);
        }

        trace!(points = mesh.vertices().len(), "point cloud rendered");
    }

    fn to_screen(&self, vertex: Vertex, dz: f32, angle: f32) -> ScreenPoint {
        let v = if angle == 0.0 { vertex } else { vertex.rotate_xz(angle) };
        self.viewport.screenify(v.translate_z(dz).project())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::CUBE_SIZE;
    use crate::surface::{DrawCall, RecordingSurface};
    use approx::assert_relative_eq;
    use std::f32::consts::FRAC_PI_2;

    fn single_edge() -> Mesh {
        Mesh::new(
            [("a", Vertex::new(0.5, 0.5, 1.0)), ("b", Vertex::new(-0.5, 0.0, 1.0))],
            [["a", "b"]],
        )
        .unwrap()
    }

    #[test]
    fn test_wireframe_draws_every_segment() {
        let mut surface = RecordingSurface::new();
        Renderer::new(RenderMode::Wireframe).render(&Mesh::cube(CUBE_SIZE), 1.0, 0.0, &mut surface);

        assert_eq!(surface.calls().len(), 16);
        assert_eq!(surface.lines().count(), 16);
    }

    #[test]
    fn test_wireframe_projects_through_dz() {
        let mut surface = RecordingSurface::new();
        Renderer::new(RenderMode::Wireframe).render(&single_edge(), 1.0, 0.0, &mut surface);

        // a = (0.5, 0.5, 2) -> ndc (0.25, 0.25) -> (500, 500)
        // b = (-0.5, 0, 2)  -> ndc (-0.25, 0)   -> (300, 400)
        let expected_a = ScreenPoint::new(500.0, 500.0);
        let expected_b = ScreenPoint::new(300.0, 400.0);
        assert_eq!(
            surface.calls(),
            &[
                DrawCall::Line {
                    from: expected_a,
                    to: expected_b,
                    width: LINE_WIDTH,
                    color: FOREGROUND,
                },
                DrawCall::Line {
                    from: expected_b,
                    to: expected_a,
                    width: LINE_WIDTH,
                    color: FOREGROUND,
                },
            ]
        );
    }

    #[test]
    fn test_wireframe_ignores_angle_unless_spinning() {
        let mesh = Mesh::cube(CUBE_SIZE);
        let renderer = Renderer::new(RenderMode::Wireframe);

        let mut still = RecordingSurface::new();
        let mut turned = RecordingSurface::new();
        renderer.render(&mesh, 1.0, 0.0, &mut still);
        renderer.render(&mesh, 1.0, 1.2, &mut turned);
        assert_eq!(still.calls(), turned.calls());

        let spinning = renderer.with_style(RenderStyle {
            spin_wireframe: true,
            ..RenderStyle::default()
        });
        let mut spun = RecordingSurface::new();
        spinning.render(&mesh, 1.0, 1.2, &mut spun);
        assert_eq!(spun.lines().count(), 16);
        assert_ne!(still.calls(), spun.calls());
    }

    #[test]
    fn test_point_cloud_centers_squares() {
        let mesh = Mesh::new([("p", Vertex::new(0.0, 0.0, 1.0))], Vec::<Vec<&str>>::new()).unwrap();
        let mut surface = RecordingSurface::new();
        Renderer::new(RenderMode::PointCloud).render(&mesh, 1.0, 0.0, &mut surface);

        assert_eq!(
            surface.calls(),
            &[DrawCall::Fill {
                x: 400.0 - POINT_SIZE / 2.0,
                y: 400.0 - POINT_SIZE / 2.0,
                w: POINT_SIZE,
                h: POINT_SIZE,
                color: FOREGROUND,
            }]
        );
    }

    #[test]
    fn test_point_cloud_rotates_in_xz() {
        // (1, 0, 0) turned a quarter in XZ lands on (0, 0, 1), then dz = 1 puts
        // it at depth 2 straight ahead.
        let mesh = Mesh::new([("p", Vertex::new(1.0, 0.0, 0.0))], Vec::<Vec<&str>>::new()).unwrap();
        let mut surface = RecordingSurface::new();
        Renderer::new(RenderMode::PointCloud).render(&mesh, 1.0, FRAC_PI_2, &mut surface);

        match surface.calls() {
            [DrawCall::Fill { x, y, .. }] => {
                assert_relative_eq!(*x + POINT_SIZE / 2.0, 400.0, epsilon = 1e-3);
                assert_relative_eq!(*y + POINT_SIZE / 2.0, 400.0, epsilon = 1e-3);
            }
            other => panic!("unexpected calls: {other:?}"),
        }
    }

    #[test]
    fn test_point_cloud_cube_draws_one_square_per_vertex() {
        let mut surface = RecordingSurface::new();
        Renderer::new(RenderMode::PointCloud).render(&Mesh::cube(CUBE_SIZE), 1.0, 0.3, &mut surface);
        assert_eq!(surface.fills().count(), 8);
        assert_eq!(surface.lines().count(), 0);
    }

    #[test]
    fn test_zero_depth_passes_through_non_finite() {
        let mesh = Mesh::new([("p", Vertex::new(0.5, 0.5, -1.0))], Vec::<Vec<&str>>::new()).unwrap();
        let mut surface = RecordingSurface::new();
        Renderer::new(RenderMode::PointCloud).render(&mesh, 1.0, 0.0, &mut surface);

        match surface.calls() {
            [DrawCall::Fill { x, .. }] => assert!(!x.is_finite()),
            other => panic!("unexpected calls: {other:?}"),
        }
    }
}
