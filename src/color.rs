//! 16-bit RGB565 colors and HSB conversion
//!
//! This module defines the [`Color`] type pushed to the controller for every
//! pixel and run, plus [`Color::from_hsb`] for building colors from hue,
//! saturation and brightness.
//!
//! ## Color Representation
//!
//! Colors are packed into 16 bits with red in the high bits:
//!
//! | Bits  | Channel | Width |
//! |-------|---------|-------|
//! | 15-11 | Red     | 5     |
//! | 10-5  | Green   | 6     |
//! | 4-0   | Blue    | 5     |
//!
//! ## Example
//!
//! ```
//! use tft_raster::Color;
//!
//! assert_eq!(Color::from_hsb(0.0, 1.0, 1.0), Color::RED);
//! assert_eq!(Color::from_hsb(240.0, 1.0, 1.0), Color::BLUE);
//! assert_eq!(Color::from_rgb(0xFF, 0xFF, 0xFF), Color::WHITE);
//! ```

/// RGB565 color as sent to the display controller
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Hash)]
pub struct Color(pub u16);

impl Color {
    /// Black (0x0000)
    pub const BLACK: Self = Self(0x0000);
    /// Navy (0x000F)
    pub const NAVY: Self = Self(0x000F);
    /// Dark green (0x03E0)
    pub const DARKGREEN: Self = Self(0x03E0);
    /// Dark cyan (0x03EF)
    pub const DARKCYAN: Self = Self(0x03EF);
    /// Maroon (0x7800)
    pub const MAROON: Self = Self(0x7800);
    /// Purple (0x780F)
    pub const PURPLE: Self = Self(0x780F);
    /// Olive (0x7BE0)
    pub const OLIVE: Self = Self(0x7BE0);
    /// Light grey (0xC618)
    pub const LIGHTGREY: Self = Self(0xC618);
    /// Dark grey (0x7BEF)
    pub const DARKGREY: Self = Self(0x7BEF);
    /// Blue (0x001F)
    pub const BLUE: Self = Self(0x001F);
    /// Green (0x07E0)
    pub const GREEN: Self = Self(0x07E0);
    /// Cyan (0x07FF)
    pub const CYAN: Self = Self(0x07FF);
    /// Red (0xF800)
    pub const RED: Self = Self(0xF800);
    /// Magenta (0xF81F)
    pub const MAGENTA: Self = Self(0xF81F);
    /// Yellow (0xFFE0)
    pub const YELLOW: Self = Self(0xFFE0);
    /// White (0xFFFF)
    pub const WHITE: Self = Self(0xFFFF);
    /// Orange (0xFD20)
    pub const ORANGE: Self = Self(0xFD20);
    /// Green-yellow (0xAFE5)
    pub const GREENYELLOW: Self = Self(0xAFE5);
    /// Pink (0xF81F)
    pub const PINK: Self = Self(0xF81F);

    /// Build a color from 8-bit red, green and blue channels
    ///
    /// The low bits of each channel are dropped to fit the 5-6-5 layout.
    pub const fn from_rgb(red: u8, green: u8, blue: u8) -> Self {
        Self((((red as u16) & 0xF8) << 8) | (((green as u16) & 0xFC) << 3) | ((blue as u16) >> 3))
    }

    /// Convert hue, saturation and brightness to RGB565
    ///
    /// `hue` is in degrees (`0.0..=360.0`, 360 wraps to 0), `saturation` and
    /// `brightness` are fractions in `0.0..=1.0`. A saturation of zero yields an
    /// achromatic color with every channel at `brightness`. Hues outside the
    /// six 60° sectors produce black.
    ///
    /// ## Example
    ///
    /// ```
    /// use tft_raster::Color;
    ///
    /// assert_eq!(Color::from_hsb(60.0, 1.0, 1.0), Color::YELLOW);
    /// assert_eq!(Color::from_hsb(0.0, 0.0, 1.0), Color::WHITE);
    /// ```
    pub fn from_hsb(hue: f32, saturation: f32, brightness: f32) -> Self {
        let (red, green, blue) = if saturation == 0.0 {
            (brightness, brightness, brightness)
        } else {
            let hue = if hue == 360.0 { 0.0 } else { hue };
            let sector = hue / 60.0;
            let slice = sector as i32;
            let fraction = sector - slice as f32;

            let aa = brightness * (1.0 - saturation);
            let bb = brightness * (1.0 - saturation * fraction);
            let cc = brightness * (1.0 - saturation * (1.0 - fraction));

            match slice {
                0 => (brightness, cc, aa),
                1 => (bb, brightness, aa),
                2 => (aa, brightness, cc),
                3 => (aa, bb, brightness),
                4 => (cc, aa, brightness),
                5 => (brightness, aa, bb),
                _ => (0.0, 0.0, 0.0),
            }
        };

        let r = (red * 31.0) as u8 as u16;
        let g = (green * 63.0) as u8 as u16;
        let b = (blue * 31.0) as u8 as u16;

        Self((r << 11) | (g << 5) | (b & 0x001F))
    }

    /// Raw 16-bit value
    pub const fn raw(self) -> u16 {
        self.0
    }

    /// Bytes streamed to the controller for this color
    ///
    /// 16-bit depth sends the value big-endian. 18-bit depth expands each
    /// channel to the top of its own byte.
    pub fn to_bytes(self, depth: crate::config::ColorDepth) -> ([u8; 3], usize) {
        match depth {
            crate::config::ColorDepth::Rgb565 => {
                let [hi, lo] = self.0.to_be_bytes();
                ([hi, lo, 0], 2)
            }
            crate::config::ColorDepth::Rgb666 => {
                let r = ((self.0 >> 11) & 0x1F) as u8;
                let g = ((self.0 >> 5) & 0x3F) as u8;
                let b = (self.0 & 0x1F) as u8;
                ([r << 3, g << 2, b << 3], 3)
            }
        }
    }
}

impl From<u16> for Color {
    fn from(raw: u16) -> Self {
        Self(raw)
    }
}

impl From<Color> for u16 {
    fn from(color: Color) -> Self {
        color.0
    }
}

#[cfg(feature = "graphics")]
impl embedded_graphics_core::prelude::PixelColor for Color {
    type Raw = embedded_graphics_core::pixelcolor::raw::RawU16;
}

#[cfg(feature = "graphics")]
impl From<embedded_graphics_core::pixelcolor::Rgb565> for Color {
    fn from(color: embedded_graphics_core::pixelcolor::Rgb565) -> Self {
        use embedded_graphics_core::prelude::IntoStorage;
        Self(color.into_storage())
    }
}

#[cfg(feature = "graphics")]
impl From<Color> for embedded_graphics_core::pixelcolor::Rgb565 {
    fn from(color: Color) -> Self {
        use embedded_graphics_core::pixelcolor::raw::RawU16;
        Self::from(RawU16::new(color.0))
    }
}
