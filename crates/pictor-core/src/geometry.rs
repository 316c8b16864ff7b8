//! Small value types for positions and extents.
//!
//! Pointer positions are integer pixels in the viewport. Image-space
//! positions derived from them are fractional because the display may be
//! scaled.

use serde::{Deserialize, Serialize};

/// An integer position, used for pointer and scroll coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// A fractional position in image space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PointF {
    pub x: f64,
    pub y: f64,
}

impl PointF {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A width/height pair in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl Size {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// True when either side is zero.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Multiply both sides by `factor`, truncating like a widget resize.
    pub fn scaled(&self, factor: f64) -> Size {
        Size {
            width: (self.width as f64 * factor).max(0.0) as u32,
            height: (self.height as f64 * factor).max(0.0) as u32,
        }
    }
}

/// An axis-aligned rectangle with non-negative extent.
///
/// The right and bottom edges are exclusive: a rectangle spanning
/// `(10, 10)` to `(60, 40)` covers 50 columns and 30 rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    pub fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Build the rectangle spanned by two corners given in any order.
    pub fn from_corners(a: Point, b: Point) -> Self {
        let (left, right) = (a.x.min(b.x), a.x.max(b.x));
        let (top, bottom) = (a.y.min(b.y), a.y.max(b.y));
        Self {
            x: left,
            y: top,
            width: right.abs_diff(left),
            height: bottom.abs_diff(top),
        }
    }

    pub fn top_left(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn right(&self) -> i64 {
        self.x as i64 + self.width as i64
    }

    pub fn bottom(&self) -> i64 {
        self.y as i64 + self.height as i64
    }

    /// True when the rectangle covers no pixels.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Intersect with `[0, width) x [0, height)`.
    ///
    /// Returns `None` when nothing of the rectangle lies inside.
    pub fn clamp_to(&self, width: u32, height: u32) -> Option<Rect> {
        let left = (self.x as i64).clamp(0, width as i64);
        let top = (self.y as i64).clamp(0, height as i64);
        let right = self.right().clamp(0, width as i64);
        let bottom = self.bottom().clamp(0, height as i64);

        let clamped = Rect {
            x: left as i32,
            y: top as i32,
            width: (right - left) as u32,
            height: (bottom - top) as u32,
        };
        (!clamped.is_empty()).then_some(clamped)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_corners_any_drag_direction() {
        let expected = Rect::new(10, 10, 50, 30);
        let a = Point::new(10, 10);
        let b = Point::new(60, 40);

        assert_eq!(Rect::from_corners(a, b), expected);
        assert_eq!(Rect::from_corners(b, a), expected);
        assert_eq!(
            Rect::from_corners(Point::new(60, 10), Point::new(10, 40)),
            expected
        );
    }

    #[test]
    fn test_degenerate_rect_is_empty() {
        let r = Rect::from_corners(Point::new(5, 5), Point::new(5, 30));
        assert_eq!(r.width, 0);
        assert!(r.is_empty());
    }

    #[test]
    fn test_clamp_inside_is_identity() {
        let r = Rect::new(10, 10, 50, 30);
        assert_eq!(r.clamp_to(100, 100), Some(r));
    }

    #[test]
    fn test_clamp_partial_overlap() {
        let r = Rect::new(-20, 80, 50, 50);
        assert_eq!(r.clamp_to(100, 100), Some(Rect::new(0, 80, 30, 20)));
    }

    #[test]
    fn test_clamp_no_overlap() {
        let r = Rect::new(150, 150, 10, 10);
        assert_eq!(r.clamp_to(100, 100), None);
    }

    #[test]
    fn test_size_scaled() {
        assert_eq!(Size::new(100, 50).scaled(1.5), Size::new(150, 75));
        assert_eq!(Size::new(10, 10).scaled(0.0), Size::new(0, 0));
    }
}
