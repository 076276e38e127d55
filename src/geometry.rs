//! Screen-space geometry: Cartesian <-> polar conversion around the screen
//! centre, the distance to the square viewport's edge, and sprite rectangles.
//!
//! Screen coordinates have their origin at the top-left corner with `y`
//! growing downward.  Polar angles are in degrees, measured counter-clockwise
//! from the positive x axis as seen on screen, and always lie in `[0, 360)`.

use std::f64::consts::SQRT_2;

/// Immutable size of the (square) play area.  Its centre is the origin of
/// every polar conversion.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScreenGeometry {
    pub width: f64,
    pub height: f64,
}

impl ScreenGeometry {
    pub fn square(size: f64) -> Self {
        Self { width: size, height: size }
    }

    pub fn center(&self) -> (f64, f64) {
        (self.width / 2.0, self.height / 2.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PolarPoint {
    /// Signed during conversion: negative for the left half-plane.
    pub radius: f64,
    /// Degrees in `[0, 360)`.
    pub angle: f64,
}

/// Convert a screen position to polar form around the screen centre.
pub fn cart_to_polar(geometry: &ScreenGeometry, x: f64, y: f64) -> PolarPoint {
    let (cx, cy) = geometry.center();
    let x = x - cx;
    let y = y - cy;

    let (radius, mut angle) = if x == 0.0 {
        (y, 90.0)
    } else {
        let rad = (y / x).atan();
        (x / rad.cos(), rad.to_degrees())
    };

    if radius >= 0.0 {
        angle = -angle;
    } else {
        angle = 180.0 - angle;
    }
    // A tiny negative angle plus 360 rounds to exactly 360.
    angle = angle.rem_euclid(360.0);
    if angle >= 360.0 {
        angle = 0.0;
    }

    PolarPoint { radius, angle }
}

/// Convert a polar position back to screen coordinates.
///
/// The returned `y` is the absolute distance between `r·sin(angle)` and the
/// centre line, so points past the top edge fold back into the screen.
/// Targets rely on this fold; see `Target::update`.
pub fn polar_to_cart(geometry: &ScreenGeometry, radius: f64, angle: f64) -> (f64, f64) {
    let (cx, cy) = geometry.center();
    let rad = angle.to_radians();
    let r = radius.abs();
    let x = r * rad.cos() + cx;
    let y = r * rad.sin() - cy;
    (x, y.abs())
}

/// Distance from the centre to the edge of the square viewport along `angle`.
pub fn radius_to_edge(geometry: &ScreenGeometry, angle: f64) -> f64 {
    let r = (SQRT_2 - 1.0) * (2.0 * angle.to_radians()).sin();
    (geometry.width / 2.0) * (r.abs() + 1.0)
}

// ── Rectangles ────────────────────────────────────────────────────────────────

/// Axis-aligned sprite rectangle, top-left anchored.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self { x, y, w, h }
    }

    /// A `w` x `h` rectangle at the origin.
    pub fn sized(w: f64, h: f64) -> Self {
        Self { x: 0.0, y: 0.0, w, h }
    }

    pub fn moved_to(&self, (x, y): (f64, f64)) -> Self {
        Self { x, y, ..*self }
    }

    pub fn center(&self) -> (f64, f64) {
        (self.x + self.w / 2.0, self.y + self.h / 2.0)
    }

    /// Strict overlap: rectangles that only share an edge do not collide.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.x < other.x + other.w
            && other.x < self.x + self.w
            && self.y < other.y + other.h
            && other.y < self.y + self.h
    }
}
