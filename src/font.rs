//! Glyph tables
//!
//! Bitmap fonts are read straight out of a borrowed byte table. Every table
//! starts with a four byte header:
//!
//! | Byte | Fixed width        | Proportional     |
//! |------|--------------------|------------------|
//! | 0    | cell width (non-0) | `0`              |
//! | 1    | cell height        | cell height      |
//! | 2    | first code         | unused           |
//! | 3    | glyph count        | unused           |
//!
//! A fixed width table continues with one bitmap per code, `ceil(width / 8)`
//! bytes per row. A proportional table continues with a list of records,
//! each a six byte header `{code, y_adjust, width, height, x_offset,
//! x_advance}` followed by `ceil(width * height / 8)` bytes of bits packed
//! across rows. The list ends at a record whose code is `0xFF`.
//!
//! ## Example
//!
//! ```
//! use tft_raster::{Font, FontKind};
//!
//! // one 2x2 glyph for 'A', then the end marker
//! let table = [0, 2, 0, 0, b'A', 0, 2, 2, 0, 3, 0b1011_0000, 0xFF, 0, 0, 0, 0, 0];
//! let font = Font::from_table(&table).unwrap();
//! assert_eq!(font.kind(), FontKind::Proportional);
//! ```

use crate::error::FontError;
use crate::seven_segment::SevenSegment;

#[cfg(any(test, feature = "alloc"))]
use alloc::boxed::Box;

/// Length of the table header
pub const HEADER_LEN: usize = 4;

/// Length of a proportional glyph record header
pub const RECORD_LEN: usize = 6;

/// Code that terminates a proportional record list
pub const END_OF_GLYPHS: u8 = 0xFF;

/// Encoding of a [`Font`]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FontKind {
    /// Every glyph shares one cell size
    Fixed,
    /// Glyphs carry their own size, offset and advance
    Proportional,
    /// Digits assembled from bar shapes
    SevenSegment,
}

/// Font selected into a [`Renderer`](crate::Renderer)
#[derive(Clone, Debug)]
pub enum Font<'a> {
    /// Fixed width bitmap table
    Fixed(FixedFont<'a>),
    /// Proportional bitmap table
    Proportional(ProportionalFont<'a>),
    /// Synthetic seven segment digits
    SevenSegment(SevenSegment),
}

impl<'a> Font<'a> {
    /// Wrap a bitmap glyph table
    ///
    /// A non-zero width byte selects the fixed width format, zero selects the
    /// proportional format.
    pub fn from_table(table: &'a [u8]) -> Result<Self, FontError> {
        let header = table.get(..HEADER_LEN).ok_or(FontError::TableTooShort {
            required: HEADER_LEN,
            provided: table.len(),
        })?;
        if header[0] != 0 {
            FixedFont::new(table).map(Font::Fixed)
        } else {
            ProportionalFont::new(table).map(Font::Proportional)
        }
    }

    /// Seven segment digits with the given bar geometry
    pub fn seven_segment(segments: SevenSegment) -> Result<Self, FontError> {
        if segments.segment_length == 0 || segments.segment_width == 0 {
            return Err(FontError::InvalidSegmentSize);
        }
        Ok(Font::SevenSegment(segments))
    }

    /// Encoding of this font
    pub fn kind(&self) -> FontKind {
        match self {
            Font::Fixed(_) => FontKind::Fixed,
            Font::Proportional(_) => FontKind::Proportional,
            Font::SevenSegment(_) => FontKind::SevenSegment,
        }
    }

    /// Height of one text line in pixels
    pub fn cell_height(&self) -> i32 {
        match self {
            Font::Fixed(font) => i32::from(font.height),
            Font::Proportional(font) => i32::from(font.height),
            Font::SevenSegment(segments) => segments.cell_height(),
        }
    }
}

/// Fixed width bitmap font
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FixedFont<'a> {
    table: &'a [u8],
    /// Cell width in pixels
    pub width: u8,
    /// Cell height in pixels
    pub height: u8,
    /// First code in the table
    pub first: u8,
    /// Number of glyphs in the table
    pub count: u8,
}

impl<'a> FixedFont<'a> {
    /// Wrap a fixed width table, checking that every glyph is present
    pub fn new(table: &'a [u8]) -> Result<Self, FontError> {
        let header = table.get(..HEADER_LEN).ok_or(FontError::TableTooShort {
            required: HEADER_LEN,
            provided: table.len(),
        })?;
        let font = Self {
            table,
            width: header[0],
            height: header[1],
            first: header[2],
            count: header[3],
        };
        if font.width == 0 || font.height == 0 || font.count == 0 {
            return Err(FontError::EmptyFont);
        }
        let required = HEADER_LEN + usize::from(font.count) * font.glyph_len();
        if table.len() < required {
            return Err(FontError::TableTooShort {
                required,
                provided: table.len(),
            });
        }
        Ok(font)
    }

    /// Bytes per bitmap row
    pub fn bytes_per_row(&self) -> usize {
        usize::from(self.width).div_ceil(8)
    }

    /// Bytes per glyph bitmap
    pub fn glyph_len(&self) -> usize {
        self.bytes_per_row() * usize::from(self.height)
    }

    /// Code actually drawn for `code`; codes outside the table use the first glyph
    pub fn resolve(&self, code: u8) -> u8 {
        if code < self.first || code - self.first >= self.count {
            self.first
        } else {
            code
        }
    }

    /// Bitmap of `code`, after fallback
    pub fn glyph(&self, code: u8) -> &'a [u8] {
        let index = usize::from(self.resolve(code) - self.first);
        let start = HEADER_LEN + index * self.glyph_len();
        // length checked in new()
        self.table.get(start..start + self.glyph_len()).unwrap_or(&[])
    }
}

/// One decoded proportional glyph
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GlyphRecord<'a> {
    /// Character code
    pub code: u8,
    /// Rows between the cell top and the bitmap top
    pub y_adjust: u8,
    /// Bitmap width
    pub width: u8,
    /// Bitmap height
    pub height: u8,
    /// Columns between the pen position and the bitmap left edge
    pub x_offset: i8,
    /// Pen advance after the glyph
    pub x_advance: u8,
    /// Bits packed across rows, most significant bit first
    pub bitmap: &'a [u8],
}

impl GlyphRecord<'_> {
    /// Bitmap length for a `width` x `height` glyph
    pub fn bitmap_len(width: u8, height: u8) -> usize {
        if width == 0 {
            0
        } else {
            (usize::from(width) * usize::from(height)).div_ceil(8).max(1)
        }
    }

    /// Whether the bit at column `i`, row `j` is set
    pub fn bit(&self, i: u8, j: u8) -> bool {
        let n = usize::from(j) * usize::from(self.width) + usize::from(i);
        self.bitmap
            .get(n / 8)
            .is_some_and(|byte| byte & (0x80 >> (n % 8)) != 0)
    }

    /// Same glyph placed on a fixed `advance`, centered horizontally
    pub fn with_fixed_advance(self, advance: u8) -> Self {
        let offset = (i32::from(advance) - i32::from(self.width)) / 2;
        Self {
            x_advance: advance,
            x_offset: offset as i8,
            ..self
        }
    }
}

/// Bounds checked reader over a glyph table
struct ByteCursor<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> ByteCursor<'a> {
    fn new(bytes: &'a [u8], pos: usize) -> Self {
        Self { bytes, pos }
    }

    fn take(&mut self, len: usize) -> Option<&'a [u8]> {
        let slice = self.bytes.get(self.pos..self.pos.checked_add(len)?)?;
        self.pos += len;
        Some(slice)
    }

    /// Next record, or `None` at the end marker or a truncated record
    fn record(&mut self) -> Option<GlyphRecord<'a>> {
        let header = self.take(RECORD_LEN)?;
        if header[0] == END_OF_GLYPHS {
            return None;
        }
        let bitmap = self.take(GlyphRecord::bitmap_len(header[2], header[3]))?;
        Some(GlyphRecord {
            code: header[0],
            y_adjust: header[1],
            width: header[2],
            height: header[3],
            x_offset: header[4] as i8,
            x_advance: header[5],
            bitmap,
        })
    }
}

/// Proportional bitmap font
///
/// Lookups scan the record list from the start. With the `alloc` feature
/// [`indexed`](Self::indexed) trades 1 KiB of heap for direct lookups.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProportionalFont<'a> {
    table: &'a [u8],
    /// Line height in pixels
    pub height: u8,
    /// Widest glyph bitmap in the table
    pub max_width: u8,
    #[cfg(any(test, feature = "alloc"))]
    index: Option<Box<[u32; 256]>>,
}

impl<'a> ProportionalFont<'a> {
    /// Wrap a proportional table, walking the record list once
    pub fn new(table: &'a [u8]) -> Result<Self, FontError> {
        let header = table.get(..HEADER_LEN).ok_or(FontError::TableTooShort {
            required: HEADER_LEN,
            provided: table.len(),
        })?;
        let height = header[1];

        let mut cursor = ByteCursor::new(table, HEADER_LEN);
        let mut max_width = 0;
        let mut glyphs = 0usize;
        loop {
            let at = cursor.pos;
            match cursor.record() {
                Some(record) => {
                    max_width = max_width.max(record.width);
                    glyphs += 1;
                }
                None if table.get(at) == Some(&END_OF_GLYPHS) && table.len() >= at + RECORD_LEN => break,
                None => {
                    let required = match table.get(at..at + RECORD_LEN) {
                        Some(header) => at + RECORD_LEN + GlyphRecord::bitmap_len(header[2], header[3]),
                        None => at + RECORD_LEN,
                    };
                    return Err(FontError::TableTooShort {
                        required,
                        provided: table.len(),
                    });
                }
            }
        }
        if glyphs == 0 {
            return Err(FontError::EmptyFont);
        }

        Ok(Self {
            table,
            height,
            max_width,
            #[cfg(any(test, feature = "alloc"))]
            index: None,
        })
    }

    /// Build a code to record offset index
    #[cfg(any(test, feature = "alloc"))]
    pub fn indexed(mut self) -> Self {
        let mut index = Box::new([0u32; 256]);
        let mut cursor = ByteCursor::new(self.table, HEADER_LEN);
        loop {
            let at = cursor.pos;
            let Some(record) = cursor.record() else {
                break;
            };
            let slot = &mut index[usize::from(record.code)];
            // first record wins, as with the linear scan
            if *slot == 0 {
                *slot = at as u32;
            }
        }
        self.index = Some(index);
        self
    }

    /// Look up the record for `code`
    pub fn glyph(&self, code: u8) -> Option<GlyphRecord<'a>> {
        match self.lookup_indexed(code) {
            Some(found) => found,
            None => self.scan(code),
        }
    }

    /// `None` when no index has been built
    #[cfg(any(test, feature = "alloc"))]
    fn lookup_indexed(&self, code: u8) -> Option<Option<GlyphRecord<'a>>> {
        let index = self.index.as_ref()?;
        let at = index[usize::from(code)];
        if at == 0 {
            return Some(None);
        }
        Some(ByteCursor::new(self.table, at as usize).record())
    }

    #[cfg(not(any(test, feature = "alloc")))]
    fn lookup_indexed(&self, _code: u8) -> Option<Option<GlyphRecord<'a>>> {
        None
    }

    fn scan(&self, code: u8) -> Option<GlyphRecord<'a>> {
        let mut cursor = ByteCursor::new(self.table, HEADER_LEN);
        while let Some(record) = cursor.record() {
            if record.code == code {
                return Some(record);
            }
        }
        None
    }
}
