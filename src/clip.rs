//! Active clip window
//!
//! Every draw call is restricted to one inclusive rectangle. The window is
//! always kept inside the device surface with `x1 <= x2` and `y1 <= y2`.
//!
//! ## Example
//!
//! ```
//! use tft_raster::ClipWindow;
//!
//! let mut clip = ClipWindow::full(240, 320);
//! clip.set(10, 10, 500, 100, 240, 320);
//! assert_eq!((clip.x1, clip.y1, clip.x2, clip.y2), (10, 10, 239, 100));
//!
//! // Inverted input collapses onto the smaller edge
//! clip.set(50, 50, 20, 20, 240, 320);
//! assert_eq!((clip.x1, clip.x2), (20, 20));
//! ```

/// Inclusive clip rectangle in device pixels
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ClipWindow {
    /// Left edge
    pub x1: i32,
    /// Top edge
    pub y1: i32,
    /// Right edge (inclusive)
    pub x2: i32,
    /// Bottom edge (inclusive)
    pub y2: i32,
}

impl ClipWindow {
    /// Window covering a `width` x `height` surface
    pub fn full(width: u16, height: u16) -> Self {
        Self {
            x1: 0,
            y1: 0,
            x2: i32::from(width) - 1,
            y2: i32::from(height) - 1,
        }
    }

    /// Replace the window, clamped to the surface and normalized
    ///
    /// Edges past the surface are pulled back to it. If a start edge ends up
    /// beyond its end edge the window collapses onto the end edge.
    pub fn set(&mut self, x1: u16, y1: u16, x2: u16, y2: u16, width: u16, height: u16) {
        let x2 = i32::from(x2).min(i32::from(width) - 1);
        let y2 = i32::from(y2).min(i32::from(height) - 1);
        self.x1 = i32::from(x1).min(x2);
        self.y1 = i32::from(y1).min(y2);
        self.x2 = x2;
        self.y2 = y2;
    }

    /// Whether a point lies inside the window
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.x1 && x <= self.x2 && y >= self.y1 && y <= self.y2
    }

    /// Width of the window in pixels
    pub fn width(&self) -> i32 {
        self.x2 - self.x1 + 1
    }

    /// Height of the window in pixels
    pub fn height(&self) -> i32 {
        self.y2 - self.y1 + 1
    }

    /// Clip a span starting at `start` with `len` pixels against `min..=max`
    ///
    /// Returns the clipped start and length, or `None` if nothing of the span
    /// can land in the range. A length that collapses to zero or below is
    /// drawn as a single pixel.
    pub(crate) fn clip_span(start: i32, len: i32, min: i32, max: i32) -> Option<(i32, i32)> {
        if start > max || start + len.max(1) <= min {
            return None;
        }
        let (mut start, mut len) = (start, len);
        if start < min {
            len -= min - start;
            start = min;
        }
        if len < 0 {
            len = 0;
        }
        if start + len > max + 1 {
            len = max - start + 1;
        }
        if len == 0 {
            len = 1;
        }
        Some((start, len))
    }

    /// Clip a horizontal span on row `y`
    pub(crate) fn clip_hspan(&self, x: i32, y: i32, w: i32) -> Option<(i32, i32)> {
        if y < self.y1 || y > self.y2 {
            return None;
        }
        Self::clip_span(x, w, self.x1, self.x2)
    }

    /// Clip a vertical span on column `x`
    pub(crate) fn clip_vspan(&self, x: i32, y: i32, h: i32) -> Option<(i32, i32)> {
        if x < self.x1 || x > self.x2 {
            return None;
        }
        Self::clip_span(y, h, self.y1, self.y2)
    }

    /// Clip a rectangle, returning `(x, y, w, h)`
    pub(crate) fn clip_rect(&self, x: i32, y: i32, w: i32, h: i32) -> Option<(i32, i32, i32, i32)> {
        let (x, w) = Self::clip_span(x, w, self.x1, self.x2)?;
        let (y, h) = Self::clip_span(y, h, self.y1, self.y2)?;
        Some((x, y, w, h))
    }
}
