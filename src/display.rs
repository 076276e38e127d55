//! Rendering layer: all terminal output lives here.
//!
//! The simulation works on a square screen measured in abstract units.  A
//! `Viewport` maps that square onto the largest block of terminal cells that
//! keeps it square on screen (cells are roughly twice as tall as wide).  No
//! game logic is performed; this module only translates draw calls into
//! terminal commands.

use std::io::{self, Write};

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};

use crate::backend::{Renderer, Sprite, TextColor};
use crate::entities::ShipSprite;
use crate::geometry::Rect;

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BORDER: Color = Color::DarkBlue;
const C_TEXT: Color = Color::White;
const C_TEXT_ALERT: Color = Color::Rgb { r: 255, g: 50, b: 50 };
const C_SHIP: Color = Color::White;
const C_SHIP_WRECKED: Color = Color::Red;
const C_TARGET: Color = Color::Green;
const C_DEAD_TARGET: Color = Color::DarkGrey;
const C_PROJECTILE: Color = Color::Cyan;
const C_PROGRESS: Color = Color::Red;

/// Facing arrows, counter-clockwise from "right", with the cell offset from
/// the ship centre where each is drawn.
const ARROWS: [(&str, i32, i32); 8] = [
    ("→", 2, 0),
    ("↗", 2, -1),
    ("↑", 0, -1),
    ("↖", -2, -1),
    ("←", -2, 0),
    ("↙", -2, 1),
    ("↓", 0, 1),
    ("↘", 2, 1),
];

// ── Viewport ──────────────────────────────────────────────────────────────────

/// Placement of the square play area on the terminal grid.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    /// Top-left cell of the play area.
    pub origin: (u16, u16),
    pub cols: u16,
    pub rows: u16,
    /// Side of the simulated screen, in units.
    pub size: f64,
}

impl Viewport {
    /// Fit a `size`-unit square into a `term_cols` x `term_rows` terminal,
    /// centred horizontally.
    pub fn fit(term_cols: u16, term_rows: u16, size: f64) -> Self {
        let rows = term_rows.min(term_cols / 2).max(1);
        let cols = rows * 2;
        Self {
            origin: (term_cols.saturating_sub(cols) / 2, 0),
            cols,
            rows,
            size,
        }
    }

    /// Fit to the current terminal size.
    pub fn current(size: f64) -> io::Result<Self> {
        let (cols, rows) = terminal::size()?;
        Ok(Self::fit(cols, rows, size))
    }

    /// Terminal cell containing a screen point, if it is on the play area.
    pub fn to_cell(&self, (x, y): (f64, f64)) -> Option<(u16, u16)> {
        if x < 0.0 || y < 0.0 {
            return None;
        }
        let col = (x / self.size * self.cols as f64) as u32;
        let row = (y / self.size * self.rows as f64) as u32;
        if col >= self.cols as u32 || row >= self.rows as u32 {
            return None;
        }
        Some((self.origin.0 + col as u16, self.origin.1 + row as u16))
    }

    /// Screen point at the centre of a terminal cell, clamped to the play
    /// area.
    pub fn to_screen(&self, col: u16, row: u16) -> (f64, f64) {
        let col = col.saturating_sub(self.origin.0).min(self.cols - 1);
        let row = row.saturating_sub(self.origin.1).min(self.rows - 1);
        (
            (col as f64 + 0.5) / self.cols as f64 * self.size,
            (row as f64 + 0.5) / self.rows as f64 * self.size,
        )
    }

    /// Width of `units` in whole cells (at least one).
    pub fn cells_wide(&self, units: f64) -> u16 {
        ((units / self.size * self.cols as f64).round() as u16).max(1)
    }
}

// ── Terminal renderer ─────────────────────────────────────────────────────────

pub struct TerminalDisplay<W: Write> {
    out: W,
    viewport: Viewport,
    size: f64,
    follow_resize: bool,
}

impl<W: Write> TerminalDisplay<W> {
    pub fn new(out: W, size: f64) -> io::Result<Self> {
        Ok(Self {
            out,
            viewport: Viewport::current(size)?,
            size,
            follow_resize: true,
        })
    }

    /// Render onto a fixed-size grid instead of the live terminal.
    pub fn with_viewport(out: W, viewport: Viewport) -> Self {
        Self {
            out,
            viewport,
            size: viewport.size,
            follow_resize: false,
        }
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    /// Print `text` horizontally centred on a screen point.
    fn print_centered(&mut self, center: (f64, f64), text: &str, color: Color) -> io::Result<()> {
        let Some((col, row)) = self.viewport.to_cell(center) else {
            return Ok(());
        };
        let half = text.chars().count() as u16 / 2;
        let col = col.saturating_sub(half).max(self.viewport.origin.0);
        self.out.queue(cursor::MoveTo(col, row))?;
        self.out.queue(style::SetForegroundColor(color))?;
        self.out.queue(Print(text))?;
        Ok(())
    }

    fn draw_background(&mut self) -> io::Result<()> {
        if self.follow_resize {
            if let Ok(viewport) = Viewport::current(self.size) {
                self.viewport = viewport;
            }
        }
        self.out.queue(terminal::Clear(terminal::ClearType::All))?;

        let Viewport { origin: (left, top), cols, rows, .. } = self.viewport;
        if left == 0 {
            return Ok(());
        }
        // Side walls just outside the play area.
        self.out.queue(style::SetForegroundColor(C_BORDER))?;
        for row in top..top + rows {
            self.out.queue(cursor::MoveTo(left - 1, row))?;
            self.out.queue(Print("│"))?;
            self.out.queue(cursor::MoveTo(left + cols, row))?;
            self.out.queue(Print("│"))?;
        }
        Ok(())
    }

    fn draw_ship(&mut self, rect: Rect, facing: f64, kind: ShipSprite) -> io::Result<()> {
        let center = rect.center();
        let (body, color) = match kind {
            ShipSprite::Normal => ("◆", C_SHIP),
            ShipSprite::Wrecked => ("✖", C_SHIP_WRECKED),
        };
        self.print_centered(center, body, color)?;

        // `facing` is measured from "up"; arrows are indexed from "right".
        let heading = (facing + 90.0).rem_euclid(360.0);
        let index = ((heading / 45.0).round() as usize) % ARROWS.len();
        let (arrow, dc, dr) = ARROWS[index];
        if let Some((col, row)) = self.viewport.to_cell(center) {
            let col = col as i32 + dc;
            let row = row as i32 + dr;
            if col >= 0 && row >= 0 {
                self.out.queue(cursor::MoveTo(col as u16, row as u16))?;
                self.out.queue(style::SetForegroundColor(color))?;
                self.out.queue(Print(arrow))?;
            }
        }
        Ok(())
    }
}

impl<W: Write> Renderer for TerminalDisplay<W> {
    fn draw_sprite(&mut self, sprite: Sprite, rect: Rect) -> io::Result<()> {
        match sprite {
            Sprite::Background => self.draw_background(),
            Sprite::DeadTarget => self.print_centered(rect.center(), "·×·", C_DEAD_TARGET),
            Sprite::Projectile => self.print_centered(rect.center(), "•", C_PROJECTILE),
            Sprite::Ship { facing, kind } => self.draw_ship(rect, facing, kind),
            Sprite::Target => self.print_centered(rect.center(), "(◉)", C_TARGET),
        }
    }

    fn draw_text(&mut self, text: &str, color: TextColor, at: (f64, f64)) -> io::Result<()> {
        let (col, row) = self.viewport.to_cell(at).unwrap_or(self.viewport.origin);
        let color = match color {
            TextColor::Normal => C_TEXT,
            TextColor::Alert => C_TEXT_ALERT,
        };
        self.out.queue(cursor::MoveTo(col, row))?;
        self.out.queue(style::SetForegroundColor(color))?;
        self.out.queue(Print(text))?;
        Ok(())
    }

    fn draw_progress(&mut self, rect: Rect, fill: f64) -> io::Result<()> {
        let (col, row) = self.viewport.to_cell((rect.x, rect.y)).unwrap_or(self.viewport.origin);
        let width = self.viewport.cells_wide(rect.w) as usize;
        let filled = ((fill.clamp(0.0, 1.0) * width as f64).round() as usize).min(width);

        self.out.queue(cursor::MoveTo(col, row))?;
        self.out.queue(style::SetForegroundColor(C_TEXT))?;
        self.out.queue(Print("["))?;
        self.out.queue(style::SetForegroundColor(C_PROGRESS))?;
        self.out.queue(Print("█".repeat(filled)))?;
        self.out.queue(style::SetForegroundColor(C_BORDER))?;
        self.out.queue(Print("░".repeat(width - filled)))?;
        self.out.queue(style::SetForegroundColor(C_TEXT))?;
        self.out.queue(Print("]"))?;
        Ok(())
    }

    fn present(&mut self) -> io::Result<()> {
        // Park cursor in a harmless spot and flush
        self.out.queue(style::ResetColor)?;
        self.out.queue(cursor::MoveTo(0, self.viewport.origin.1 + self.viewport.rows - 1))?;
        self.out.flush()
    }
}
