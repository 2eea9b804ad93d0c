//! Geometric primitives: Point, Size, Bounds.

use serde::{Deserialize, Serialize};

/// A 2D point with x and y coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// X coordinate
    pub x: f32,
    /// Y coordinate
    pub y: f32,
}

impl Point {
    /// Origin point (0, 0)
    pub const ORIGIN: Self = Self { x: 0.0, y: 0.0 };

    /// Create a new point.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

impl Default for Point {
    fn default() -> Self {
        Self::ORIGIN
    }
}

/// A 2D size with width and height.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Size {
    /// Width
    pub width: f32,
    /// Height
    pub height: f32,
}

impl Size {
    /// Zero size
    pub const ZERO: Self = Self {
        width: 0.0,
        height: 0.0,
    };

    /// Create a new size.
    #[must_use]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Grow by `amount` on every side.
    #[must_use]
    pub fn expand(&self, amount: f32) -> Self {
        Self::new(amount.mul_add(2.0, self.width), amount.mul_add(2.0, self.height))
    }
}

impl Default for Size {
    fn default() -> Self {
        Self::ZERO
    }
}

/// Edge coordinates of a visible region, as reported by a viewport provider.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    /// Top edge
    pub top: f32,
    /// Right edge
    pub right: f32,
    /// Bottom edge
    pub bottom: f32,
    /// Left edge
    pub left: f32,
}

impl Bounds {
    /// Create bounds from edge coordinates.
    #[must_use]
    pub const fn new(top: f32, right: f32, bottom: f32, left: f32) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    /// Clamp the top-left corner of a box of `size` so the box stays inside.
    ///
    /// The far edges are applied first and the near edges last, so a box
    /// larger than the bounds is pinned to the top/left edge.
    #[must_use]
    pub fn clamp_origin(&self, origin: Point, size: Size) -> Point {
        let mut x = origin.x;
        let mut y = origin.y;

        if y + size.height > self.bottom {
            y = self.bottom - size.height;
        }
        if y < self.top {
            y = self.top;
        }
        if x + size.width > self.right {
            x = self.right - size.width;
        }
        if x < self.left {
            x = self.left;
        }

        Point::new(x, y)
    }
}

impl Default for Bounds {
    fn default() -> Self {
        Self::new(0.0, 0.0, 0.0, 0.0)
    }
}
