/// Character-cell surface for terminal output
use crossterm::{
    style::{Color as TermColor, Print, ResetColor, SetForegroundColor},
    QueueableCommand,
};
use spincube_core::{Color, ScreenPoint, Surface, Viewport, BACKGROUND};
use std::io::Write;

/// Glyph used for filled rectangles
const FILL_CHAR: char = '#';

/// Terminal cells are roughly twice as tall as they are wide.
const CELL_ASPECT: f32 = 2.0;

#[derive(Debug, Clone, Copy, PartialEq)]
struct Cell {
    ch: char,
    color: Color,
}

impl Cell {
    fn blank(color: Color) -> Self {
        Self { ch: ' ', color }
    }
}

/// A [`Surface`] that rasterizes the logical pixel surface into a grid of
/// terminal cells.
///
/// The logical viewport is fitted into the grid keeping its aspect ratio and
/// centered. Strokes are always one cell wide.
pub struct TerminalSurface {
    cols: usize,
    rows: usize,
    viewport: Viewport,
    region_w: f32,
    region_h: f32,
    offset_x: f32,
    offset_y: f32,
    cells: Vec<Cell>,
}

impl TerminalSurface {
    pub fn new(cols: usize, rows: usize, viewport: Viewport) -> Self {
        let cols = cols.max(1);
        let rows = rows.max(1);

        // Size in cells of the area the viewport maps onto, limited by
        // whichever grid dimension runs out first.
        let vw = viewport.width.max(1) as f32;
        let vh = viewport.height.max(1) as f32;
        let (c, r) = (cols as f32, rows as f32);
        let (region_w, region_h) = if c * vh <= r * CELL_ASPECT * vw {
            (c, c * vh / (vw * CELL_ASPECT))
        } else {
            (r * CELL_ASPECT * vw / vh, r)
        };

        Self {
            cols,
            rows,
            viewport,
            region_w,
            region_h,
            offset_x: (c - region_w) / 2.0,
            offset_y: (r - region_h) / 2.0,
            cells: vec![Cell::blank(BACKGROUND); cols * rows],
        }
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Glyph at a cell, `None` outside the grid
    pub fn char_at(&self, col: usize, row: usize) -> Option<char> {
        (col < self.cols && row < self.rows).then(|| self.cells[row * self.cols + col].ch)
    }

    /// Number of cells holding a glyph
    pub fn inked(&self) -> usize {
        self.cells.iter().filter(|c| c.ch != ' ').count()
    }

    /// The grid as plain text, one line per row
    pub fn to_text(&self) -> String {
        let mut out = String::with_capacity((self.cols + 1) * self.rows);
        for row in self.cells.chunks(self.cols) {
            out.extend(row.iter().map(|c| c.ch));
            out.push('\n');
        }
        out
    }

    /// Write the grid with colors, starting at the current cursor position.
    pub fn draw<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        let mut current = None;
        for (i, row) in self.cells.chunks(self.cols).enumerate() {
            for cell in row {
                if current != Some(cell.color) {
                    writer.queue(SetForegroundColor(term_color(cell.color)))?;
                    current = Some(cell.color);
                }
                writer.queue(Print(cell.ch))?;
            }
            if i + 1 < self.rows {
                writer.queue(Print("\r\n"))?;
            }
        }
        writer.queue(ResetColor)?;
        Ok(())
    }

    fn to_cell(&self, x: f32, y: f32) -> (f32, f32) {
        let vw = self.viewport.width.max(1) as f32;
        let vh = self.viewport.height.max(1) as f32;
        (
            x * self.region_w / vw + self.offset_x,
            y * self.region_h / vh + self.offset_y,
        )
    }

    fn put(&mut self, col: i64, row: i64, ch: char, color: Color) {
        if col < 0 || row < 0 || col >= self.cols as i64 || row >= self.rows as i64 {
            return;
        }
        self.cells[row as usize * self.cols + col as usize] = Cell { ch, color };
    }

    /// Cell range covered by a logical rectangle, clipped to the grid
    fn cell_rect(&self, x: f32, y: f32, w: f32, h: f32) -> Option<(usize, usize, usize, usize)> {
        if !(x.is_finite() && y.is_finite() && w.is_finite() && h.is_finite()) {
            return None;
        }
        let (x0, y0) = self.to_cell(x, y);
        let (x1, y1) = self.to_cell(x + w, y + h);

        let c0 = x0.min(x1).floor().max(0.0) as usize;
        let r0 = y0.min(y1).floor().max(0.0) as usize;
        let c1 = (x0.max(x1).ceil() as usize).min(self.cols);
        let r1 = (y0.max(y1).ceil() as usize).min(self.rows);

        (c0 < c1 && r0 < r1).then_some((c0, r0, c1, r1))
    }

    fn fill_cells(&mut self, x: f32, y: f32, w: f32, h: f32, ch: char, color: Color) {
        if let Some((c0, r0, c1, r1)) = self.cell_rect(x, y, w, h) {
            for row in r0..r1 {
                for col in c0..c1 {
                    self.cells[row * self.cols + col] = Cell { ch, color };
                }
            }
        }
    }
}

impl Surface for TerminalSurface {
    fn clear_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Color) {
        self.fill_cells(x, y, w, h, ' ', color);
    }

    fn draw_line(&mut self, from: ScreenPoint, to: ScreenPoint, _width: f32, color: Color) {
        if !(from.is_finite() && to.is_finite()) {
            return;
        }
        let (x0, y0) = self.to_cell(from.x, from.y);
        let (x1, y1) = self.to_cell(to.x, to.y);
        let Some(((x0, y0), (x1, y1))) = clip_segment((x0, y0), (x1, y1), self.cols as f32, self.rows as f32)
        else {
            return;
        };

        let ch = line_glyph(x1 - x0, y1 - y0);
        bresenham(
            (x0.floor() as i64, y0.floor() as i64),
            (x1.floor() as i64, y1.floor() as i64),
            |col, row| self.put(col, row, ch, color),
        );
    }

    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Color) {
        self.fill_cells(x, y, w, h, FILL_CHAR, color);
    }
}

fn term_color(color: Color) -> TermColor {
    TermColor::Rgb {
        r: color.r,
        g: color.g,
        b: color.b,
    }
}

/// Pick a glyph that follows the line direction (rows grow downward).
fn line_glyph(dx: f32, dy: f32) -> char {
    // Cells are twice as tall as wide, so compare in visual units.
    let (vx, vy) = (dx.abs(), dy.abs() * CELL_ASPECT);
    if vy < vx * 0.4 {
        '-'
    } else if vx < vy * 0.4 {
        '|'
    } else if (dx > 0.0) == (dy > 0.0) {
        '\\'
    } else {
        '/'
    }
}

/// Liang–Barsky clip of a segment to `[0, w] × [0, h]`
fn clip_segment(p0: (f32, f32), p1: (f32, f32), w: f32, h: f32) -> Option<((f32, f32), (f32, f32))> {
    let (dx, dy) = (p1.0 - p0.0, p1.1 - p0.1);
    let mut t0 = 0.0f32;
    let mut t1 = 1.0f32;

    for (p, q) in [
        (-dx, p0.0),
        (dx, w - p0.0),
        (-dy, p0.1),
        (dy, h - p0.1),
    ] {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
            continue;
        }
        let t = q / p;
        if p < 0.0 {
            t0 = t0.max(t);
        } else {
            t1 = t1.min(t);
        }
        if t0 > t1 {
            return None;
        }
    }

    Some((
        (p0.0 + t0 * dx, p0.1 + t0 * dy),
        (p0.0 + t1 * dx, p0.1 + t1 * dy),
    ))
}

/// Integer line walk, calling `plot` for every cell on the line.
fn bresenham(from: (i64, i64), to: (i64, i64), mut plot: impl FnMut(i64, i64)) {
    let (mut x, mut y) = from;
    let dx = (to.0 - x).abs();
    let dy = -(to.1 - y).abs();
    let sx = if x < to.0 { 1 } else { -1 };
    let sy = if y < to.1 { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        plot(x, y);
        if x == to.0 && y == to.1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x += sx;
        }
        if e2 <= dx {
            err += dx;
            y += sy;
        }
    }
}
