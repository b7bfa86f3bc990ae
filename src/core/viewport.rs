//! Viewport scroll offset access.

/// Read/write access to the page's vertical scroll offset (pixels).
pub trait Viewport {
    fn scroll_offset(&self) -> f64;
    fn set_scroll_offset(&mut self, offset: f64);
}

/// In-memory viewport that clamps every write to `[0, max_offset]`, the
/// same way a browser clamps `scrollTo`.
#[derive(Debug, Clone, Default)]
pub struct ClampedViewport {
    offset: f64,
    max_offset: f64,
}

impl ClampedViewport {
    pub fn new(max_offset: f64) -> Self {
        Self {
            offset: 0.0,
            max_offset: max_offset.max(0.0),
        }
    }

    pub fn max_offset(&self) -> f64 {
        self.max_offset
    }

    /// Update the scrollable range (page or window resized) and re-clamp.
    pub fn set_max_offset(&mut self, max_offset: f64) {
        self.max_offset = max_offset.max(0.0);
        self.offset = self.offset.clamp(0.0, self.max_offset);
    }

    /// Relative scroll.  Returns `true` if the offset moved.
    pub fn scroll_by(&mut self, delta: f64) -> bool {
        let before = self.offset;
        self.set_scroll_offset(before + delta);
        self.offset != before
    }
}

impl Viewport for ClampedViewport {
    fn scroll_offset(&self) -> f64 {
        self.offset
    }

    fn set_scroll_offset(&mut self, offset: f64) {
        self.offset = if offset.is_finite() {
            offset.clamp(0.0, self.max_offset)
        } else {
            self.offset
        };
    }
}
