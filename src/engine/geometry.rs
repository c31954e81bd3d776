//! Geometry primitives shared by the generator, the simulation and the renderer.
//!
//! Coordinates are surface pixels with the origin in the top-left corner.

/// Simple 2D point in surface pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Squared Euclidean distance (avoids a sqrt when only comparing distances).
pub fn distance2(a: &Point, b: &Point) -> f64 {
    let dx = a.x - b.x;
    let dy = a.y - b.y;
    dx * dx + dy * dy
}

/// Euclidean distance.
pub fn distance(a: &Point, b: &Point) -> f64 {
    (a.x - b.x).hypot(a.y - b.y)
}

/// Linear blend from `a` to `b`. `t` is not clamped.
pub fn lerp(a: &Point, b: &Point, t: f64) -> Point {
    Point {
        x: a.x + (b.x - a.x) * t,
        y: a.y + (b.y - a.y) * t,
    }
}

/// Clamp `value` into `[inset, extent - inset]`.
///
/// When the extent is too small to leave an inset on both sides the value is
/// pinned to the middle of the extent instead of producing an inverted range.
pub fn clamp_inset(value: f64, extent: f64, inset: f64) -> f64 {
    let low = inset;
    let high = extent - inset;
    if high < low {
        return extent / 2.0;
    }
    value.max(low).min(high)
}

/// True if `p` lies within `radius` of `center` (inclusive).
pub fn within(p: &Point, center: &Point, radius: f64) -> bool {
    distance2(p, center) <= radius * radius
}
