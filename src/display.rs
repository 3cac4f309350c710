/// Rendering layer.
///
/// `render` translates the world into a cleared frame plus one filled
/// rectangle per body; a `Canvas` decides what a rectangle looks like.
/// `TerminalCanvas` is the crossterm-backed canvas used by the binary.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal, QueueableCommand,
};

use crate::entities::{BodyKind, Size, World};

// ── Colour palette ────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Rgb { r, g, b }
    }
}

impl From<Rgb> for Color {
    fn from(c: Rgb) -> Self {
        Color::Rgb { r: c.r, g: c.g, b: c.b }
    }
}

pub const C_BACKGROUND: Rgb = Rgb::new(255, 255, 255);
pub const C_PLAYER: Rgb = Rgb::new(0, 255, 0);
pub const C_INVADER: Rgb = Rgb::new(255, 0, 0);
pub const C_BULLET: Rgb = Rgb::new(0, 0, 255);

pub fn color_for(kind: BodyKind) -> Rgb {
    match kind {
        BodyKind::Player => C_PLAYER,
        BodyKind::Invader => C_INVADER,
        BodyKind::Bullet => C_BULLET,
    }
}

// ── Canvas abstraction ────────────────────────────────────────────────────────

/// Integer pixel rectangle, already floored.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PixelRect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl PixelRect {
    pub fn floor_of(x: f64, y: f64, size: Size) -> Self {
        PixelRect {
            x: x.floor() as i32,
            y: y.floor() as i32,
            width: size.width.floor() as i32,
            height: size.height.floor() as i32,
        }
    }
}

pub trait Canvas {
    fn clear(&mut self, color: Rgb) -> std::io::Result<()>;
    fn fill_rect(&mut self, rect: PixelRect, color: Rgb) -> std::io::Result<()>;
    fn present(&mut self) -> std::io::Result<()>;
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame.
pub fn render<C: Canvas>(canvas: &mut C, world: &World) -> std::io::Result<()> {
    canvas.clear(C_BACKGROUND)?;
    for body in &world.bodies {
        let pos = body.position();
        let rect = PixelRect::floor_of(pos.x, pos.y, body.size());
        canvas.fill_rect(rect, color_for(body.kind()))?;
    }
    canvas.present()
}

// ── Terminal canvas ───────────────────────────────────────────────────────────

/// Paints the pixel world onto a grid of terminal cells.  Each cell covers
/// `world / grid` pixels; a rectangle lights every cell it touches, so even
/// a 3×3 bullet stays visible on a coarse grid.
pub struct TerminalCanvas<W: Write> {
    out: W,
    cols: u16,
    rows: u16,
    cell_w: f64,
    cell_h: f64,
}

impl<W: Write> TerminalCanvas<W> {
    pub fn new(out: W, world: Size, cols: u16, rows: u16) -> Self {
        let mut canvas = TerminalCanvas {
            out,
            cols: 1,
            rows: 1,
            cell_w: world.width,
            cell_h: world.height,
        };
        canvas.resize(world, cols, rows);
        canvas
    }

    /// Rescale after the terminal changed size.
    pub fn resize(&mut self, world: Size, cols: u16, rows: u16) {
        self.cols = cols.max(1);
        self.rows = rows.max(1);
        self.cell_w = world.width / self.cols as f64;
        self.cell_h = world.height / self.rows as f64;
    }

    pub fn grid(&self) -> (u16, u16) {
        (self.cols, self.rows)
    }

    /// Cell span `[first, last)` covered by a pixel rectangle, clipped to the
    /// grid.  `None` when the rectangle lies entirely off screen.
    pub fn cell_span(&self, rect: PixelRect) -> Option<((u16, u16), (u16, u16))> {
        let col_span = span(rect.x, rect.width, self.cell_w, self.cols)?;
        let row_span = span(rect.y, rect.height, self.cell_h, self.rows)?;
        Some((col_span, row_span))
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

fn span(start: i32, len: i32, cell: f64, limit: u16) -> Option<(u16, u16)> {
    let first = (start as f64 / cell).floor();
    let last = ((start + len.max(0)) as f64 / cell).ceil().max(first + 1.0);
    let first = first.max(0.0);
    let last = last.min(limit as f64);
    if first >= last {
        return None;
    }
    Some((first as u16, last as u16))
}

impl<W: Write> Canvas for TerminalCanvas<W> {
    fn clear(&mut self, color: Rgb) -> std::io::Result<()> {
        self.out.queue(style::SetBackgroundColor(color.into()))?;
        self.out.queue(terminal::Clear(terminal::ClearType::All))?;
        Ok(())
    }

    fn fill_rect(&mut self, rect: PixelRect, color: Rgb) -> std::io::Result<()> {
        let Some(((c0, c1), (r0, r1))) = self.cell_span(rect) else {
            return Ok(());
        };
        let blank = " ".repeat((c1 - c0) as usize);
        self.out.queue(style::SetBackgroundColor(color.into()))?;
        for row in r0..r1 {
            self.out.queue(cursor::MoveTo(c0, row))?;
            self.out.queue(Print(&blank))?;
        }
        Ok(())
    }

    fn present(&mut self) -> std::io::Result<()> {
        // Park cursor in a harmless spot and flush
        self.out.queue(style::ResetColor)?;
        self.out.queue(cursor::MoveTo(0, self.rows.saturating_sub(1)))?;
        self.out.flush()
    }
}
