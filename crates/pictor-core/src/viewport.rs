//! Mapping between viewport, display and image coordinates.
//!
//! Three coordinate spaces are involved when the user points at the image:
//!
//! - **Viewport**: pixels relative to the top-left of the visible area.
//! - **Display**: pixels of the scaled image as laid out on screen. The
//!   viewport shows the display region starting at the scroll offset.
//! - **Image**: pixels of the raster itself, i.e. display divided by the
//!   scale factor.

use serde::{Deserialize, Serialize};

use crate::geometry::{Point, PointF, Rect, Size};

/// Zoom and scroll state of the view.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewState {
    /// Display pixels per image pixel.
    pub scale_factor: f64,
    /// Display coordinate shown at the viewport's top-left corner.
    pub scroll_offset: Point,
    /// Size of the visible area.
    pub viewport_size: Size,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            scale_factor: 1.0,
            scroll_offset: Point::default(),
            viewport_size: Size::default(),
        }
    }
}

impl ViewState {
    pub fn new(viewport_size: Size) -> Self {
        Self {
            viewport_size,
            ..Self::default()
        }
    }

    /// Size of an image of `image_size` pixels at the current scale.
    pub fn display_size(&self, image_size: Size) -> Size {
        image_size.scaled(self.scale_factor)
    }

    /// Clamp the scroll offset to what the display can scroll.
    pub fn clamp_scroll(&mut self, display_size: Size) {
        self.scroll_offset = clamp_scroll(self.scroll_offset, display_size, self.viewport_size);
    }
}

/// Translate a viewport point into display coordinates.
pub fn to_display_space(point: Point, state: &ViewState) -> Point {
    Point::new(
        point.x.saturating_add(state.scroll_offset.x),
        point.y.saturating_add(state.scroll_offset.y),
    )
}

/// Translate a viewport point into image coordinates.
pub fn to_image_space(point: Point, state: &ViewState) -> PointF {
    let display = to_display_space(point, state);
    PointF::new(
        display.x as f64 / state.scale_factor,
        display.y as f64 / state.scale_factor,
    )
}

/// Translate a viewport rectangle into display coordinates.
pub fn rect_to_display_space(rect: Rect, state: &ViewState) -> Rect {
    let origin = to_display_space(rect.top_left(), state);
    Rect::new(origin.x, origin.y, rect.width, rect.height)
}

/// Translate a viewport rectangle into the smallest image-pixel rectangle
/// that covers it.
pub fn rect_to_image_space(rect: Rect, state: &ViewState) -> Rect {
    let top_left = to_image_space(rect.top_left(), state);
    let bottom_right = to_image_space(
        Point::new(
            rect.x.saturating_add(rect.width as i32),
            rect.y.saturating_add(rect.height as i32),
        ),
        state,
    );
    let left = top_left.x.floor();
    let top = top_left.y.floor();
    let right = bottom_right.x.ceil();
    let bottom = bottom_right.y.ceil();
    Rect::new(
        left as i32,
        top as i32,
        (right - left).max(0.0) as u32,
        (bottom - top).max(0.0) as u32,
    )
}

/// New scroll-bar value after scaling the display by `factor`.
///
/// Keeps the point at the middle of the page fixed on screen.
pub fn scroll_adjustment(old_value: i32, factor: f64, page_size: u32) -> i32 {
    (factor * old_value as f64 + (factor - 1.0) * page_size as f64 / 2.0) as i32
}

/// Largest scroll offset that still keeps the viewport filled.
pub fn max_scroll(display_size: Size, viewport_size: Size) -> Point {
    let range = |display: u32, page: u32| {
        i32::try_from(display.saturating_sub(page)).unwrap_or(i32::MAX)
    };
    Point::new(
        range(display_size.width, viewport_size.width),
        range(display_size.height, viewport_size.height),
    )
}

/// Clamp a scroll offset into `[0, max_scroll]` per axis.
pub fn clamp_scroll(offset: Point, display_size: Size, viewport_size: Size) -> Point {
    let max = max_scroll(display_size, viewport_size);
    Point::new(offset.x.clamp(0, max.x), offset.y.clamp(0, max.y))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(scale: f64, scroll: (i32, i32)) -> ViewState {
        ViewState {
            scale_factor: scale,
            scroll_offset: Point::new(scroll.0, scroll.1),
            viewport_size: Size::new(400, 300),
        }
    }

    #[test]
    fn test_identity_mapping() {
        let s = state(1.0, (0, 0));
        assert_eq!(to_image_space(Point::new(12, 34), &s), PointF::new(12.0, 34.0));
    }

    #[test]
    fn test_mapping_with_scale_and_scroll() {
        let s = state(2.0, (100, 50));
        assert_eq!(to_display_space(Point::new(10, 10), &s), Point::new(110, 60));
        assert_eq!(to_image_space(Point::new(10, 10), &s), PointF::new(55.0, 30.0));
    }

    #[test]
    fn test_rect_to_image_space_covers_selection() {
        let s = state(2.0, (0, 0));
        let r = rect_to_image_space(Rect::new(3, 3, 5, 5), &s);
        // 3/2 = 1.5 -> 1, 8/2 = 4
        assert_eq!(r, Rect::new(1, 1, 3, 3));
    }

    #[test]
    fn test_rect_to_image_space_identity() {
        let s = state(1.0, (0, 0));
        let r = Rect::new(10, 10, 50, 30);
        assert_eq!(rect_to_image_space(r, &s), r);
    }

    #[test]
    fn test_scroll_adjustment_formula() {
        // 1.25 * 100 + 0.25 * 200 / 2 = 150
        assert_eq!(scroll_adjustment(100, 1.25, 200), 150);
        // 0.8 * 100 - 0.2 * 200 / 2 = 60
        assert_eq!(scroll_adjustment(100, 0.8, 200), 60);
        // factor 1 leaves the value alone
        assert_eq!(scroll_adjustment(77, 1.0, 500), 77);
    }

    #[test]
    fn test_scroll_adjustment_truncates() {
        // 1.25 * 1 + 0.25 * 3 / 2 = 1.625
        assert_eq!(scroll_adjustment(1, 1.25, 3), 1);
    }

    #[test]
    fn test_clamp_scroll() {
        let display = Size::new(1000, 200);
        let viewport = Size::new(400, 300);
        assert_eq!(
            clamp_scroll(Point::new(900, 50), display, viewport),
            Point::new(600, 0)
        );
        assert_eq!(
            clamp_scroll(Point::new(-5, -5), display, viewport),
            Point::new(0, 0)
        );
    }

    #[test]
    fn test_display_size_follows_scale() {
        let s = state(1.5, (0, 0));
        assert_eq!(s.display_size(Size::new(200, 100)), Size::new(300, 150));
    }
}
