//! Seven segment digits
//!
//! Glyphs for `-`, `.`, `/`, `0`..`9` and `:` built from bar shapes. Each bar
//! is a rectangle body with a filled triangle cap on both ends. A bar that is
//! off for the digit is repainted in the background color (unless text is
//! transparent), so printing over an earlier digit leaves no stale segments.
//!
//! Bar layout, `w` the segment width and `l` the segment length:
//!
//! ```text
//!      6
//!    +---+
//!  3 |   | 2
//!    +-5-+
//!  1 |   | 0
//!    +---+
//!      4
//! ```

use crate::color::Color;
use crate::interface::PixelSink;
use crate::renderer::{DrawResult, Renderer};

/// First code with a segment pattern
const FIRST_CODE: u8 = b'-';

/// Last code with a segment pattern
const LAST_CODE: u8 = b':';

/// Segment patterns for `-` through `:`
const PATTERNS: [u16; 14] = [
    0x200, // -
    0x080, // .
    0x06C, // /
    0x05F, // 0
    0x005, // 1
    0x076, // 2
    0x075, // 3
    0x02D, // 4
    0x079, // 5
    0x07B, // 6
    0x045, // 7
    0x07F, // 8
    0x07D, // 9
    0x900, // :
];

const BAR_LOWER_RIGHT: u16 = 0x001;
const BAR_LOWER_LEFT: u16 = 0x002;
const BAR_UPPER_RIGHT: u16 = 0x004;
const BAR_UPPER_LEFT: u16 = 0x008;
const BAR_BOTTOM: u16 = 0x010;
const BAR_MIDDLE: u16 = 0x020;
const BAR_TOP: u16 = 0x040;
const DOT_LOW: u16 = 0x080;
const DOT_LOWER_MIDDLE: u16 = 0x100;
const DASH: u16 = 0x200;
const DOT_UPPER_MIDDLE: u16 = 0x800;

/// Gap between printed digits
pub const DIGIT_SPACING: i32 = 2;

/// Bar geometry of a seven segment font
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SevenSegment {
    /// Length of a bar body in pixels
    pub segment_length: u8,
    /// Half thickness of a bar; bars are `2 * width + 1` pixels thick
    pub segment_width: u8,
    /// Outline lit bars and dots in this color
    pub outline: Option<Color>,
}

impl Default for SevenSegment {
    fn default() -> Self {
        Self {
            segment_length: 24,
            segment_width: 6,
            outline: None,
        }
    }
}

impl SevenSegment {
    /// Segment pattern for `code`, if it has one
    pub fn pattern(code: u8) -> Option<u16> {
        if (FIRST_CODE..=LAST_CODE).contains(&code) {
            Some(PATTERNS[usize::from(code - FIRST_CODE)])
        } else {
            None
        }
    }

    /// Width of one digit cell
    pub fn cell_width(&self) -> i32 {
        2 * (2 * self.w() + 1) + self.l()
    }

    /// Height of one digit cell
    pub fn cell_height(&self) -> i32 {
        3 * (2 * self.w() + 1) + 2 * self.l()
    }

    fn w(&self) -> i32 {
        i32::from(self.segment_width)
    }

    fn l(&self) -> i32 {
        i32::from(self.segment_length)
    }
}

impl<S> Renderer<'_, S>
where
    S: PixelSink,
{
    /// Draw one seven segment digit with its top-left corner at `(x, y)`
    ///
    /// Codes without a pattern draw nothing.
    pub fn draw_seven_segment(
        &mut self,
        segments: &SevenSegment,
        x: i32,
        y: i32,
        code: u8,
        color: Color,
    ) -> DrawResult<S> {
        let Some(pattern) = SevenSegment::pattern(code) else {
            return Ok(());
        };
        let (w, l) = (segments.w(), segments.l());
        let d = 2 * w + l + 1;
        let background = self.state.background;
        let transparent = self.state.transparent;
        let mut bus = self.bus();

        let bars = [
            (BAR_LOWER_RIGHT, Bar::Vertical, x + d, y + d),
            (BAR_LOWER_LEFT, Bar::Vertical, x, y + d),
            (BAR_UPPER_RIGHT, Bar::Vertical, x + d, y),
            (BAR_UPPER_LEFT, Bar::Vertical, x, y),
            (BAR_BOTTOM, Bar::Horizontal, x, y + 2 * d),
            (BAR_MIDDLE, Bar::Horizontal, x, y + d),
            (BAR_TOP, Bar::Horizontal, x, y),
        ];
        let dots = [
            (DOT_LOWER_MIDDLE, x + d / 2, y + d + 2 * w + 1, 2 * w + 1, l / 2),
            (DOT_UPPER_MIDDLE, x + d / 2, y + 2 * w + 1 + l / 2, 2 * w + 1, l / 2),
        ];

        // unlit parts first, so lit bars win where they overlap
        if !transparent {
            for &(bit, bar, bx, by) in &bars {
                if pattern & bit == 0 {
                    bus.draw_bar(segments, bar, bx, by, background)?;
                }
            }
            for &(bit, dx, dy, dw, dh) in &dots {
                if pattern & bit == 0 {
                    bus.fill_rect(dx, dy, dw, dh, background)?;
                }
            }
        }

        for &(bit, bar, bx, by) in &bars {
            if pattern & bit != 0 {
                bus.draw_bar(segments, bar, bx, by, color)?;
            }
        }
        let marks = [
            (DOT_LOW, x + d / 2, y + 2 * d, 2 * w + 1, 2 * w + 1),
            dots[0],
            dots[1],
            (DASH, x + 2 * w + 1, y + d, l, 2 * w + 1),
        ];
        for (bit, mx, my, mw, mh) in marks {
            if pattern & bit != 0 {
                bus.fill_rect(mx, my, mw, mh, color)?;
                if let Some(outline) = segments.outline {
                    bus.draw_rect(mx, my, mw, mh, outline)?;
                }
            }
        }
        Ok(())
    }

    fn draw_bar(&mut self, segments: &SevenSegment, bar: Bar, x: i32, y: i32, color: Color) -> DrawResult<S> {
        let (w, l) = (segments.w(), segments.l());
        let (caps, body) = match bar {
            Bar::Vertical => (
                [
                    [(x + 1, y + 2 * w), (x + w, y + w + 1), (x + 2 * w - 1, y + 2 * w)],
                    [
                        (x + 1, y + 2 * w + l + 1),
                        (x + w, y + 3 * w + l),
                        (x + 2 * w - 1, y + 2 * w + l + 1),
                    ],
                ],
                (x, y + 2 * w + 1, 2 * w + 1, l),
            ),
            Bar::Horizontal => (
                [
                    [(x + 2 * w, y + 2 * w - 1), (x + w + 1, y + w), (x + 2 * w, y + 1)],
                    [
                        (x + 2 * w + l + 1, y + 2 * w - 1),
                        (x + 3 * w + l, y + w),
                        (x + 2 * w + l + 1, y + 1),
                    ],
                ],
                (x + 2 * w + 1, y, l, 2 * w + 1),
            ),
        };

        for [a, b, c] in caps {
            self.fill_triangle(a.0, a.1, b.0, b.1, c.0, c.1, color)?;
        }
        self.fill_rect(body.0, body.1, body.2, body.3, color)?;

        if let Some(outline) = segments.outline {
            if color != self.state.background {
                for [a, b, c] in caps {
                    self.draw_triangle(a.0, a.1, b.0, b.1, c.0, c.1, outline)?;
                }
                self.draw_rect(body.0, body.1, body.2, body.3, outline)?;
            }
        }
        Ok(())
    }
}

#[derive(Clone, Copy)]
enum Bar {
    Vertical,
    Horizontal,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::renderer;

    fn small() -> SevenSegment {
        SevenSegment {
            segment_length: 8,
            segment_width: 2,
            outline: None,
        }
    }

    #[test]
    fn test_cell_size() {
        let seg = SevenSegment::default();
        assert_eq!(seg.cell_width(), 2 * 13 + 24);
        assert_eq!(seg.cell_height(), 3 * 13 + 48);
        assert_eq!((small().cell_width(), small().cell_height()), (18, 31));
    }

    #[test]
    fn test_patterns() {
        assert_eq!(SevenSegment::pattern(b'8'), Some(0x07F));
        assert_eq!(SevenSegment::pattern(b'-'), Some(0x200));
        assert_eq!(SevenSegment::pattern(b':'), Some(0x900));
        assert_eq!(SevenSegment::pattern(b'A'), None);
        assert_eq!(SevenSegment::pattern(b','), None);
    }

    #[test]
    fn test_eight_lights_every_bar() {
        let mut r = renderer(64, 64);
        r.set_transparent(true);
        r.draw_seven_segment(&small(), 0, 0, b'8', Color::RED).unwrap();
        let seg = small();
        let (w, l) = (2, 8);
        let d = 2 * w + l + 1;
        // bar bodies
        assert!(r.sink().is_set(w, 2 * w + 1));
        assert!(r.sink().is_set(d + w, 2 * w + 1));
        assert!(r.sink().is_set(2 * w + 1, w));
        assert!(r.sink().is_set(2 * w + 1, d + w));
        assert!(r.sink().is_set(2 * w + 1, 2 * d + w));
        for (x, y) in r.sink().points(Color::RED) {
            assert!(x < seg.cell_width() && y < seg.cell_height(), "({x},{y})");
        }
    }

    #[test]
    fn test_one_repaints_unlit_bars_when_opaque() {
        let mut r = renderer(64, 64);
        r.set_background_color(Color::BLUE);
        r.draw_seven_segment(&small(), 0, 0, b'1', Color::RED).unwrap();
        // right bars lit, left bars and top bar in background
        assert_eq!(r.sink().color_at(13 + 2, 5), Some(Color::RED));
        assert_eq!(r.sink().color_at(2, 5), Some(Color::BLUE));
        assert_eq!(r.sink().color_at(5, 2), Some(Color::BLUE));

        let mut t = renderer(64, 64);
        t.set_transparent(true);
        t.draw_seven_segment(&small(), 0, 0, b'1', Color::RED).unwrap();
        assert!(t.sink().points(Color::BLUE).is_empty());
        assert!(!t.sink().is_set(2, 5));
    }

    #[test]
    fn test_outline_uses_accent_color() {
        let seg = SevenSegment {
            outline: Some(Color::WHITE),
            ..small()
        };
        let mut r = renderer(64, 64);
        r.set_transparent(true);
        r.draw_seven_segment(&seg, 0, 0, b'-', Color::RED).unwrap();
        // dash body outline
        assert_eq!(r.sink().color_at(5, 13), Some(Color::WHITE));
        assert_eq!(r.sink().color_at(8, 15), Some(Color::RED));
    }

    #[test]
    fn test_unknown_code_draws_nothing() {
        let mut r = renderer(64, 64);
        r.draw_seven_segment(&small(), 0, 0, b'x', Color::RED).unwrap();
        assert!(r.sink().writes.is_empty());
    }
}
