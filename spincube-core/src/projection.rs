/// Logical surface width in pixels
pub const WIDTH: u32 = 800;
/// Logical surface height in pixels
pub const HEIGHT: u32 = 800;

/// A projected point in normalized device coordinates (visible range -1..1).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NdcPoint {
    pub x: f32,
    pub y: f32,
}

impl NdcPoint {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// A point on the drawing surface, in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenPoint {
    pub x: f32,
    pub y: f32,
}

impl ScreenPoint {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Pixel dimensions of the drawing surface
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Map `-1..1` onto `0..width` / `0..height`.
    ///
    /// Points outside the visible range land outside the surface; nothing
    /// is clamped.
    pub fn screenify(&self, point: NdcPoint) -> ScreenPoint {
        ScreenPoint::new(
            (point.x + 1.0) / 2.0 * self.width as f32,
            (point.y + 1.0) / 2.0 * self.height as f32,
        )
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(WIDTH, HEIGHT)
    }
}

/// [`Viewport::screenify`] on the default `WIDTH` × `HEIGHT` surface.
pub fn screenify(point: NdcPoint) -> ScreenPoint {
    Viewport::default().screenify(point)
}
