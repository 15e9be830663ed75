//! Text layout and glyph painting
//!
//! [`Renderer::print`] lays a string out from a resolved origin using the
//! selected font, the clip window and the render state. Text is handled
//! byte by byte; every byte is one glyph code.
//!
//! Rotated text (rotation angle other than 0) is painted one bit at a time:
//! each bit's offset inside the string is rotated around the print origin and
//! truncated to a device pixel. Neighboring bits can land on the same pixel
//! or leave a hole between them.

use log::trace;

use crate::font::{FixedFont, Font, GlyphRecord, ProportionalFont};
use crate::interface::PixelSink;
use crate::renderer::{DrawResult, Renderer};
use crate::seven_segment::DIGIT_SPACING;

/// Degrees to radians as used for text rotation
const TEXT_DEG_TO_RAD: f64 = 0.0175;

/// Horizontal print position
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum XPos {
    /// Absolute column
    At(i32),
    /// Centered in the clip window
    Center,
    /// Flush with the clip window's right edge
    Right,
}

impl From<i32> for XPos {
    fn from(x: i32) -> Self {
        XPos::At(x)
    }
}

/// Vertical print position
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum YPos {
    /// Absolute row
    At(i32),
    /// Top edge of the clip window
    Top,
    /// Centered in the clip window
    Center,
    /// Flush with the clip window's bottom edge
    Bottom,
}

impl From<i32> for YPos {
    fn from(y: i32) -> Self {
        YPos::At(y)
    }
}

/// Rotation angle as a cosine/sine pair
#[derive(Clone, Copy)]
struct Rotation {
    cos: f32,
    sin: f32,
}

impl Rotation {
    fn new(degrees: i32) -> Self {
        let radian = f64::from(degrees) * TEXT_DEG_TO_RAD;
        Self {
            cos: libm::cos(radian) as f32,
            sin: libm::sin(radian) as f32,
        }
    }

    /// Device pixel for local offset `(u, v)` around `(x, y)`
    fn apply(&self, x: i32, y: i32, u: i32, v: i32) -> (i32, i32) {
        let (u, v) = (u as f32, v as f32);
        (
            (x as f32 + (u * self.cos - v * self.sin)) as i32,
            (y as f32 + (v * self.cos + u * self.sin)) as i32,
        )
    }
}

impl<S> Renderer<'_, S>
where
    S: PixelSink,
{
    /// Width of `text` in pixels with the selected font
    ///
    /// Proportional glyphs count their advance plus one gap column; codes
    /// missing from the font count nothing. Returns 0 without a font.
    pub fn string_width(&self, text: &str) -> i32 {
        self.font
            .as_ref()
            .map_or(0, |font| self.string_width_with(font, text))
    }

    fn string_width_with(&self, font: &Font<'_>, text: &str) -> i32 {
        let len = text.len() as i32;
        match font {
            Font::Fixed(fixed) => len * i32::from(fixed.width),
            Font::SevenSegment(segments) => len * segments.cell_width(),
            Font::Proportional(prop) => text
                .bytes()
                .filter_map(|code| self.proportional_glyph(prop, code))
                .map(|glyph| i32::from(glyph.x_advance) + 1)
                .sum(),
        }
    }

    fn proportional_glyph<'t>(&self, font: &ProportionalFont<'t>, code: u8) -> Option<GlyphRecord<'t>> {
        let glyph = font.glyph(code)?;
        if self.state.force_fixed_width {
            Some(glyph.with_fixed_advance(font.max_width))
        } else {
            Some(glyph)
        }
    }

    /// Print `text` at `(x, y)` with the selected font
    ///
    /// `x` and `y` accept plain coordinates or the alignment variants of
    /// [`XPos`] and [`YPos`], resolved against the clip window. The origin is
    /// pulled inside the clip window's top-left corner. Printing stops at the
    /// clip window's right edge unless wrap is on, and never starts a line
    /// that would not fit above the bottom edge.
    ///
    /// `\r` clears the rest of the line in the background color (opaque,
    /// unrotated text only); `\n` moves to the start of the next line for
    /// bitmap fonts.
    ///
    /// Without a font this does nothing. With a rotation angle set only
    /// absolute positions are accepted; any alignment makes the call a no-op.
    pub fn print(&mut self, text: &str, x: impl Into<XPos>, y: impl Into<YPos>) -> DrawResult<S> {
        let Some(font) = self.font.take() else {
            return Ok(());
        };
        let result = self.print_with(&font, text, x.into(), y.into());
        self.font = Some(font);
        result
    }

    fn print_with(&mut self, font: &Font<'_>, text: &str, x: XPos, y: YPos) -> DrawResult<S> {
        let rotation = self.state.rotation;
        if rotation != 0 && (!matches!(x, XPos::At(_)) || !matches!(y, YPos::At(_))) {
            return Ok(());
        }

        let width = self.string_width_with(font, text);
        let line_height = font.cell_height();
        let clip = self.clip;

        let x = match x {
            XPos::At(x) => x,
            XPos::Right => clip.x2 - width - 1,
            XPos::Center => (clip.x2 - width - 1) / 2,
        };
        let y = match y {
            YPos::At(y) => y,
            YPos::Top => clip.y1,
            YPos::Bottom => clip.y2 - line_height - 1,
            YPos::Center => (clip.y2 - line_height / 2 - 1) / 2,
        };
        let (x, y) = (x.max(clip.x1), y.max(clip.y1));
        trace!("print {} bytes at ({}, {}), width {}", text.len(), x, y, width);

        self.cursor.x = x;
        self.cursor.y = y;
        if y + line_height - 1 > clip.y2 {
            return Ok(());
        }

        let bitmap_font = matches!(font, Font::Fixed(_) | Font::Proportional(_));
        let mut rotated_offset = 0;

        for (pos, code) in text.bytes().enumerate() {
            match code {
                b'\r' => {
                    if !self.state.transparent && rotation == 0 {
                        let (cx, cy) = (self.cursor.x, self.cursor.y);
                        self.fill_rect(cx, cy, clip.x2 + 1 - cx, line_height, self.state.background)?;
                    }
                    continue;
                }
                b'\n' => {
                    if bitmap_font {
                        self.cursor.y += line_height;
                        if self.cursor.y > clip.y2 - line_height {
                            break;
                        }
                        self.cursor.x = clip.x1;
                    }
                    continue;
                }
                _ => {}
            }

            let (advance, glyph) = match font {
                Font::Fixed(fixed) => (i32::from(fixed.width), None),
                Font::SevenSegment(segments) => (segments.cell_width(), None),
                Font::Proportional(prop) => match self.proportional_glyph(prop, code) {
                    Some(glyph) => (i32::from(glyph.x_advance), Some(glyph)),
                    None => continue,
                },
            };

            if self.cursor.x + advance > clip.x2 + 1 {
                if !self.state.wrap {
                    break;
                }
                self.cursor.y += line_height;
                if self.cursor.y > clip.y2 - line_height {
                    break;
                }
                self.cursor.x = clip.x1;
            }

            match (font, glyph) {
                (Font::Proportional(prop), Some(glyph)) => {
                    if rotation == 0 {
                        let (cx, cy) = (self.cursor.x, self.cursor.y);
                        self.paint_proportional(prop, &glyph, cx, cy)?;
                        self.cursor.x += i32::from(glyph.x_advance) + 1;
                    } else {
                        self.rotate_proportional(&glyph, x, y, rotated_offset)?;
                        rotated_offset += i32::from(glyph.x_advance) + 1;
                    }
                }
                (Font::Fixed(fixed), _) => {
                    if rotation == 0 {
                        let (cx, cy) = (self.cursor.x, self.cursor.y);
                        self.paint_fixed(fixed, code, cx, cy)?;
                        self.cursor.x += advance;
                    } else {
                        self.rotate_fixed(fixed, code, x, y, pos as i32)?;
                    }
                }
                (Font::SevenSegment(segments), _) => {
                    let (cx, cy) = (self.cursor.x, self.cursor.y);
                    let color = self.state.foreground;
                    self.draw_seven_segment(segments, cx, cy, code, color)?;
                    self.cursor.x += advance + DIGIT_SPACING;
                }
                (Font::Proportional(_), None) => {}
            }
        }
        Ok(())
    }

    /// Paint an unrotated proportional glyph with the pen at `(x, y)`
    fn paint_proportional(
        &mut self,
        font: &ProportionalFont<'_>,
        glyph: &GlyphRecord<'_>,
        x: i32,
        y: i32,
    ) -> DrawResult<S> {
        let (foreground, background) = (self.state.foreground, self.state.background);
        let left = x + i32::from(glyph.x_offset);
        let top = y + i32::from(glyph.y_adjust);
        let mut bus = self.bus();
        if !bus.state.transparent {
            bus.fill_rect(x, y, i32::from(glyph.x_advance) + 1, i32::from(font.height), background)?;
        }
        for j in 0..glyph.height {
            for i in 0..glyph.width {
                if glyph.bit(i, j) {
                    bus.draw_pixel(left + i32::from(i), top + i32::from(j), foreground)?;
                }
            }
        }
        Ok(())
    }

    /// Paint a proportional glyph `offset` columns along rotated text from `(x, y)`
    fn rotate_proportional(&mut self, glyph: &GlyphRecord<'_>, x: i32, y: i32, offset: i32) -> DrawResult<S> {
        let rotation = Rotation::new(self.state.rotation);
        let (foreground, background) = (self.state.foreground, self.state.background);
        let transparent = self.state.transparent;

        let mut bus = self.bus();
        for j in 0..glyph.height {
            for i in 0..glyph.width {
                let v = i32::from(j) + i32::from(glyph.y_adjust);
                let (px, py) = rotation.apply(x, y, offset + i32::from(i), v);
                if glyph.bit(i, j) {
                    bus.draw_pixel(px, py, foreground)?;
                } else if !transparent {
                    bus.draw_pixel(px, py, background)?;
                }
            }
        }
        Ok(())
    }

    /// Paint an unrotated fixed width glyph at `(x, y)`
    fn paint_fixed(&mut self, font: &FixedFont<'_>, code: u8, x: i32, y: i32) -> DrawResult<S> {
        let (foreground, background) = (self.state.foreground, self.state.background);
        let bitmap = font.glyph(code);
        let mut bus = self.bus();
        if !bus.state.transparent {
            bus.fill_rect(x, y, i32::from(font.width), i32::from(font.height), background)?;
        }
        for (j, row) in bitmap.chunks(font.bytes_per_row()).enumerate() {
            for (k, byte) in row.iter().enumerate() {
                for i in 0..8 {
                    if byte & (0x80 >> i) != 0 {
                        bus.draw_pixel(x + i + 8 * k as i32, y + j as i32, foreground)?;
                    }
                }
            }
        }
        Ok(())
    }

    /// Paint the fixed width glyph at string index `pos` of rotated text from `(x, y)`
    ///
    /// Leaves the cursor where the next glyph's cell starts.
    fn rotate_fixed(&mut self, font: &FixedFont<'_>, code: u8, x: i32, y: i32, pos: i32) -> DrawResult<S> {
        let rotation = Rotation::new(self.state.rotation);
        let (foreground, background) = (self.state.foreground, self.state.background);
        let transparent = self.state.transparent;
        let cell = i32::from(font.width);
        let bitmap = font.glyph(code);

        {
            let mut bus = self.bus();
            for (j, row) in bitmap.chunks(font.bytes_per_row()).enumerate() {
                for (k, byte) in row.iter().enumerate() {
                    for i in 0..8 {
                        let u = i + 8 * k as i32 + pos * cell;
                        let (px, py) = rotation.apply(x, y, u, j as i32);
                        if byte & (0x80 >> i) != 0 {
                            bus.draw_pixel(px, py, foreground)?;
                        } else if !transparent {
                            bus.draw_pixel(px, py, background)?;
                        }
                    }
                }
            }
        }

        let advance = ((pos + 1) * cell) as f32;
        self.cursor.x = (x as f32 + advance * rotation.cos) as i32;
        self.cursor.y = (y as f32 + advance * rotation.sin) as i32;
        Ok(())
    }
}
