//! Integer screen geometry
//!
//! Coordinates are signed so that brush neighbours and extraction margins
//! can step off the canvas without wrapping.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A point in landscape screen coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// A half-open rectangle: `[x, x + width) × [y, y + height)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: u16,
    pub height: u16,
}

impl Rect {
    pub const fn new(x: i32, y: i32, width: u16, height: u16) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Square with the given side
    pub const fn square(x: i32, y: i32, side: u16) -> Self {
        Self::new(x, y, side, side)
    }

    pub const fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// First column past the right edge
    pub const fn right(&self) -> i32 {
        self.x + self.width as i32
    }

    /// First row past the bottom edge
    pub const fn bottom(&self) -> i32 {
        self.y + self.height as i32
    }

    /// Hit-test a point
    pub const fn contains(&self, p: Point) -> bool {
        p.x >= self.x && p.x < self.right() && p.y >= self.y && p.y < self.bottom()
    }

    /// Whether this rectangle lies entirely inside `outer`
    pub const fn is_within(&self, outer: &Rect) -> bool {
        self.x >= outer.x
            && self.y >= outer.y
            && self.right() <= outer.right()
            && self.bottom() <= outer.bottom()
    }
}

/// Inclusive bounding box of inked pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Bounds {
    pub min_x: i32,
    pub min_y: i32,
    pub max_x: i32,
    pub max_y: i32,
}

impl Bounds {
    /// Box around a single point
    pub const fn point(p: Point) -> Self {
        Self {
            min_x: p.x,
            min_y: p.y,
            max_x: p.x,
            max_y: p.y,
        }
    }

    /// Grow to include another box
    pub fn union(self, other: Bounds) -> Self {
        Self {
            min_x: self.min_x.min(other.min_x),
            min_y: self.min_y.min(other.min_y),
            max_x: self.max_x.max(other.max_x),
            max_y: self.max_y.max(other.max_y),
        }
    }
}
