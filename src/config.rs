//! Surface configuration types and builder

use crate::color::Color;
use crate::command::{MADCTL_BGR, MADCTL_MV, MADCTL_MX, MADCTL_MY};
pub use crate::error::BuilderError;

/// Largest accepted width or height
///
/// Coordinates travel as signed 16-bit values through the rasterizer.
pub const MAX_DIMENSION: u16 = i16::MAX as u16;

/// Default arc angle scale (a full circle is 360 units)
pub const DEFAULT_ARC_ANGLE_MAX: f32 = 360.0;

/// Default rotational offset of arc and angle-based lines (0 points up)
pub const DEFAULT_ANGLE_OFFSET: f32 = -90.0;

/// Native panel dimensions in portrait orientation
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Dimensions {
    /// Width in pixels
    pub width: u16,
    /// Height in pixels
    pub height: u16,
}

impl Dimensions {
    /// ILI9341 panel (240x320)
    pub const ILI9341: Self = Self {
        width: 240,
        height: 320,
    };

    /// ILI9488 panel (320x480)
    pub const ILI9488: Self = Self {
        width: 320,
        height: 480,
    };

    /// Create new dimensions with validation
    ///
    /// # Errors
    ///
    /// Returns `BuilderError::InvalidDimensions` if either side is zero or
    /// larger than [`MAX_DIMENSION`].
    pub fn new(width: u16, height: u16) -> Result<Self, BuilderError> {
        if width == 0 || width > MAX_DIMENSION || height == 0 || height > MAX_DIMENSION {
            return Err(BuilderError::InvalidDimensions { width, height });
        }
        Ok(Self { width, height })
    }

    /// Number of pixels on the surface
    pub fn pixel_count(&self) -> u32 {
        self.width as u32 * self.height as u32
    }
}

/// Surface orientation relative to the native portrait layout
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Orientation {
    /// Native portrait
    #[default]
    Portrait,
    /// Landscape (rows and columns exchanged)
    Landscape,
    /// Portrait, upside down
    PortraitFlip,
    /// Landscape, upside down
    LandscapeFlip,
}

impl Orientation {
    /// Whether width and height are exchanged in this orientation
    pub fn is_landscape(self) -> bool {
        matches!(self, Self::Landscape | Self::LandscapeFlip)
    }

    /// Memory access control byte for this orientation
    pub fn madctl(self) -> u8 {
        match self {
            Self::Portrait => MADCTL_MX | MADCTL_BGR,
            Self::Landscape => MADCTL_MV | MADCTL_BGR,
            Self::PortraitFlip => MADCTL_MY | MADCTL_BGR,
            Self::LandscapeFlip => MADCTL_MX | MADCTL_MY | MADCTL_MV | MADCTL_BGR,
        }
    }
}

/// Pixel format used on the bus
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ColorDepth {
    /// 16 bits per pixel (ILI9341)
    #[default]
    Rgb565,
    /// 18 bits per pixel carried in 3 bytes (ILI9488 over SPI)
    Rgb666,
}

/// Renderer configuration
///
/// Use [`Builder`] to create a Config.
#[derive(Clone, Debug)]
pub struct Config {
    /// Native (portrait) dimensions
    pub dimensions: Dimensions,
    /// Initial orientation
    pub orientation: Orientation,
    /// Bus pixel format
    pub color_depth: ColorDepth,
    /// Initial text foreground color
    pub foreground: Color,
    /// Initial text background color
    pub background: Color,
    /// Skip background pixels when painting glyphs
    pub transparent: bool,
    /// Wrap text to a new line at the clip window's right edge
    pub wrap: bool,
    /// Force proportional fonts onto a fixed advance
    pub force_fixed_width: bool,
    /// Value representing a full circle for arc angles
    pub arc_angle_max: f32,
    /// Rotational offset in degrees for arc angles
    pub angle_offset: f32,
}

impl Config {
    /// Get the dimensions as seen in the configured orientation
    pub fn oriented_dimensions(&self) -> Dimensions {
        oriented(self.dimensions, self.orientation)
    }
}

/// Dimensions of `native` when viewed in `orientation`
pub(crate) fn oriented(native: Dimensions, orientation: Orientation) -> Dimensions {
    if orientation.is_landscape() {
        Dimensions {
            width: native.height,
            height: native.width,
        }
    } else {
        native
    }
}

/// Builder for constructing renderer configuration
///
/// # Example
///
/// ```
/// use tft_raster::{Builder, Color, Dimensions, Orientation};
///
/// let config = match Builder::new()
///     .dimensions(Dimensions::ILI9341)
///     .orientation(Orientation::Landscape)
///     .foreground(Color::WHITE)
///     .build()
/// {
///     Ok(config) => config,
///     Err(_) => return,
/// };
/// assert_eq!(config.oriented_dimensions().width, 320);
/// ```
#[must_use]
pub struct Builder {
    dimensions: Option<Dimensions>,
    orientation: Orientation,
    color_depth: ColorDepth,
    foreground: Color,
    background: Color,
    transparent: bool,
    wrap: bool,
    force_fixed_width: bool,
    arc_angle_max: f32,
    angle_offset: f32,
}

impl Default for Builder {
    fn default() -> Self {
        Self {
            dimensions: None,
            orientation: Orientation::Portrait,
            color_depth: ColorDepth::Rgb565,
            foreground: Color::GREEN,
            background: Color::BLACK,
            transparent: false,
            wrap: false,
            force_fixed_width: false,
            arc_angle_max: DEFAULT_ARC_ANGLE_MAX,
            angle_offset: DEFAULT_ANGLE_OFFSET,
        }
    }
}

impl Builder {
    /// Create a new Builder with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set native panel dimensions (required)
    pub fn dimensions(mut self, dims: Dimensions) -> Self {
        self.dimensions = Some(dims);
        self
    }

    /// Set initial orientation
    pub fn orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = orientation;
        self
    }

    /// Set bus pixel format
    pub fn color_depth(mut self, depth: ColorDepth) -> Self {
        self.color_depth = depth;
        self
    }

    /// Set text foreground color
    pub fn foreground(mut self, color: Color) -> Self {
        self.foreground = color;
        self
    }

    /// Set text background color
    pub fn background(mut self, color: Color) -> Self {
        self.background = color;
        self
    }

    /// Set transparent text background
    pub fn transparent(mut self, value: bool) -> Self {
        self.transparent = value;
        self
    }

    /// Set text wrapping
    pub fn wrap(mut self, value: bool) -> Self {
        self.wrap = value;
        self
    }

    /// Set forced fixed width for proportional fonts
    pub fn force_fixed_width(mut self, value: bool) -> Self {
        self.force_fixed_width = value;
        self
    }

    /// Set the value representing a full circle for arcs
    ///
    /// With 100, an arc from 0 to 50 is a half circle.
    pub fn arc_angle_max(mut self, value: f32) -> Self {
        self.arc_angle_max = value;
        self
    }

    /// Set the rotational offset in degrees for arcs (-90 puts 0 at the top)
    pub fn angle_offset(mut self, degrees: f32) -> Self {
        self.angle_offset = degrees;
        self
    }

    /// Build the configuration
    ///
    /// # Errors
    ///
    /// Returns `BuilderError::MissingDimensions` if dimensions were not set
    pub fn build(self) -> Result<Config, BuilderError> {
        Ok(Config {
            dimensions: self.dimensions.ok_or(BuilderError::MissingDimensions)?,
            orientation: self.orientation,
            color_depth: self.color_depth,
            foreground: self.foreground,
            background: self.background,
            transparent: self.transparent,
            wrap: self.wrap,
            force_fixed_width: self.force_fixed_width,
            arc_angle_max: self.arc_angle_max,
            angle_offset: self.angle_offset,
        })
    }
}
