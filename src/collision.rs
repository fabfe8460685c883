//! Axis-aligned bounding-box geometry.

/// A top-left anchored rectangle in play-field coordinates (y grows downward).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    pub fn is_empty(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }

    pub fn center(&self) -> (f32, f32) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }
}

/// Strict overlap test. Touching edges do not count, and a rectangle with no
/// area never overlaps anything.
pub fn overlaps(a: &Rect, b: &Rect) -> bool {
    if a.is_empty() || b.is_empty() {
        return false;
    }
    a.x < b.x + b.width && a.x + a.width > b.x && a.y < b.y + b.height && a.y + a.height > b.y
}

/// Anything that occupies a rectangle on the field and can be hit.
pub trait Hitbox {
    fn rect(&self) -> Rect;
}

pub fn collides(a: &impl Hitbox, b: &impl Hitbox) -> bool {
    overlaps(&a.rect(), &b.rect())
}
