/// Drawing surface abstraction consumed by the renderer
use crate::projection::ScreenPoint;

/// An opaque RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const RED: Color = Color::rgb(255, 0, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// CSS hex notation, e.g. `#ff0000`
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

pub const BACKGROUND: Color = Color::BLACK;
pub const FOREGROUND: Color = Color::RED;

/// The three primitives a frame is built from.
///
/// Coordinates are in surface pixels; implementations decide what to do with
/// anything off-surface or non-finite.
pub trait Surface {
    fn clear_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Color);

    fn draw_line(&mut self, from: ScreenPoint, to: ScreenPoint, width: f32, color: Color);

    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Color);
}

/// A single recorded surface call
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawCall {
    Clear {
        x: f32,
        y: f32,
        w: f32,
        h: f32,
        color: Color,
    },
    Line {
        from: ScreenPoint,
        to: ScreenPoint,
        width: f32,
        color: Color,
    },
    Fill {
        x: f32,
        y: f32,
        w: f32,
        h: f32,
        color: Color,
    },
}

/// Surface that remembers every call instead of drawing.
#[derive(Debug, Default, Clone)]
pub struct RecordingSurface {
    calls: Vec<DrawCall>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> &[DrawCall] {
        &self.calls
    }

    pub fn take(&mut self) -> Vec<DrawCall> {
        std::mem::take(&mut self.calls)
    }

    pub fn lines(&self) -> impl Iterator<Item = &DrawCall> {
        self.calls
            .iter()
            .filter(|c| matches!(c, DrawCall::Line { .. }))
    }

    pub fn fills(&self) -> impl Iterator<Item = &DrawCall> {
        self.calls
            .iter()
            .filter(|c| matches!(c, DrawCall::Fill { .. }))
    }

    pub fn clears(&self) -> impl Iterator<Item = &DrawCall> {
        self.calls
            .iter()
            .filter(|c| matches!(c, DrawCall::Clear { .. }))
    }
}

impl Surface for RecordingSurface {
    fn clear_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Color) {
        self.calls.push(DrawCall::Clear { x, y, w, h, color });
    }

    fn draw_line(&mut self, from: ScreenPoint, to: ScreenPoint, width: f32, color: Color) {
        self.calls.push(DrawCall::Line {
            from,
            to,
            width,
            color,
        });
    }

    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Color) {
        self.calls.push(DrawCall::Fill { x, y, w, h, color });
    }
}
