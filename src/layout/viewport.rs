//! Viewport state management for scrolling.

use serde::Serialize;

/// Viewport state - the visible area of the grid body
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Viewport {
    /// Horizontal scroll position in grid coordinates
    pub scroll_x: f32,
    /// Vertical scroll position in grid coordinates
    pub scroll_y: f32,
    /// Viewport width in pixels
    pub width: f32,
    /// Viewport height in pixels (body only, excluding header and footer)
    pub height: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(1200.0, 600.0)
    }
}

impl Viewport {
    /// Create a viewport scrolled to the origin
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            scroll_x: 0.0,
            scroll_y: 0.0,
            width: sanitize(width),
            height: sanitize(height),
        }
    }

    /// Clamp scroll position so the content never scrolls past its end.
    pub fn clamp_scroll(&mut self, total_width: f32, total_height: f32) {
        let max_x = (sanitize(total_width) - self.width).max(0.0);
        let max_y = (sanitize(total_height) - self.height).max(0.0);
        self.scroll_x = sanitize(self.scroll_x).clamp(0.0, max_x);
        self.scroll_y = sanitize(self.scroll_y).clamp(0.0, max_y);
    }

    /// Scroll by delta amounts
    pub fn scroll_by(&mut self, delta_x: f32, delta_y: f32, total_width: f32, total_height: f32) {
        self.scroll_x += sanitize_delta(delta_x);
        self.scroll_y += sanitize_delta(delta_y);
        self.clamp_scroll(total_width, total_height);
    }

    /// Set absolute scroll position
    pub fn set_scroll(&mut self, x: f32, y: f32, total_width: f32, total_height: f32) {
        self.scroll_x = x;
        self.scroll_y = y;
        self.clamp_scroll(total_width, total_height);
    }

    /// Resize the viewport
    pub fn resize(&mut self, width: f32, height: f32) {
        self.width = sanitize(width);
        self.height = sanitize(height);
    }

    /// Scroll vertically just enough to show the item spanning
    /// `top..top + height`. Returns true if the scroll position changed.
    pub fn scroll_into_view(&mut self, top: f32, height: f32) -> bool {
        let bottom = top + height;
        let previous = self.scroll_y;
        if top < self.scroll_y {
            self.scroll_y = top.max(0.0);
        } else if bottom > self.scroll_y + self.height {
            self.scroll_y = (bottom - self.height).max(0.0);
        }
        (self.scroll_y - previous).abs() > f32::EPSILON
    }
}

fn sanitize(v: f32) -> f32 {
    if v.is_finite() {
        v.max(0.0)
    } else {
        0.0
    }
}

fn sanitize_delta(v: f32) -> f32 {
    if v.is_finite() {
        v
    } else {
        0.0
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_to_content() {
        let mut vp = Viewport::new(400.0, 300.0);
        vp.set_scroll(-50.0, 10_000.0, 1000.0, 3600.0);
        assert_eq!(vp.scroll_x, 0.0);
        assert_eq!(vp.scroll_y, 3300.0);
    }

    #[test]
    fn test_short_content_never_scrolls() {
        let mut vp = Viewport::new(400.0, 300.0);
        vp.scroll_by(20.0, 20.0, 200.0, 100.0);
        assert_eq!(vp.scroll_x, 0.0);
        assert_eq!(vp.scroll_y, 0.0);
    }

    #[test]
    fn test_scroll_into_view() {
        let mut vp = Viewport::new(400.0, 100.0);
        assert!(vp.scroll_into_view(180.0, 20.0));
        assert_eq!(vp.scroll_y, 100.0);
        assert!(!vp.scroll_into_view(120.0, 20.0));
        assert!(vp.scroll_into_view(40.0, 20.0));
        assert_eq!(vp.scroll_y, 40.0);
    }
}
