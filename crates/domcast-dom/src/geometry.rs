//! Element geometry
//!
//! Scroll offsets and rendered bounding box, as the host layout engine
//! would report them.

/// Geometry state for an element
#[derive(Debug, Clone, Default)]
pub struct ElementGeometry {
    /// Vertical scroll offset
    pub scroll_top: f64,
    /// Horizontal scroll offset
    pub scroll_left: f64,
    /// Rendered width
    pub width: f64,
    /// Rendered height
    pub height: f64,
}

impl ElementGeometry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Geometry with a rendered box
    pub fn with_size(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            ..Default::default()
        }
    }

    /// Check if either scroll offset is non-zero
    pub fn has_scroll(&self) -> bool {
        self.scroll_top != 0.0 || self.scroll_left != 0.0
    }

    /// Rendered bounding box as (width, height)
    pub fn bounding_box(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    /// Scroll to position
    pub fn scroll_to(&mut self, left: f64, top: f64) {
        self.scroll_left = left.max(0.0);
        self.scroll_top = top.max(0.0);
    }
}
