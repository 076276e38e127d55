//! Seams between the simulation and the outside world.
//!
//! The orchestrator only talks to these traits; `display`, `input` and
//! `audio` provide the terminal implementations.

use std::io;

use crate::entities::ShipSprite;
use crate::geometry::Rect;

// ── Rendering ────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Sprite {
    Background,
    DeadTarget,
    Projectile,
    /// `facing` is the ship rotation in degrees.
    Ship { facing: f64, kind: ShipSprite },
    Target,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextColor {
    /// Regular HUD text.
    Normal,
    /// Mach readout once the top level is reached.
    Alert,
}

/// Draw calls arrive back-to-front; nothing is visible until `present`.
pub trait Renderer {
    fn draw_sprite(&mut self, sprite: Sprite, rect: Rect) -> io::Result<()>;
    fn draw_text(&mut self, text: &str, color: TextColor, at: (f64, f64)) -> io::Result<()>;
    /// Horizontal bar filled to `fill` (0 ..= 1) from the left.
    fn draw_progress(&mut self, rect: Rect, fill: f64) -> io::Result<()>;
    fn present(&mut self) -> io::Result<()>;
}

// ── Audio ────────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Channel {
    Projectile,
    Target,
    Other,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Sound {
    Fire,
    Hit,
    MaxMach,
}

/// Fire-and-forget playback.  Implementations swallow their own failures.
pub trait AudioBackend {
    /// False when no output device is usable; callers may skip sound then.
    fn is_available(&self) -> bool;
    fn play(&mut self, channel: Channel, sound: Sound);
    fn stop_all(&mut self);
}

// ── Input ────────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct InputFrame {
    /// Screen units.
    pub cursor: (f64, f64),
    pub fire: bool,
    pub quit: bool,
}

pub trait InputSource {
    /// Non-blocking snapshot of the current input state.
    fn poll(&mut self) -> InputFrame;
}
