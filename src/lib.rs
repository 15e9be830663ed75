//! Clipped 2D Rasterizer and Text Engine for SPI TFT Displays
//!
//! Draws shapes and text straight into the memory of a framebuffer-less
//! display controller (ILI9341, ILI9488) through a pixel sink. Everything is
//! clipped to a movable window before it reaches the bus.
//!
//! ## Features
//!
//! - `no_std` compatible
//! - `embedded-hal` v1.0 support
//! - `embedded-graphics` integration (with `graphics` feature)
//! - Lines, rectangles, circles, ellipses, triangles, polygons, stars and arcs
//! - Fixed-width, proportional and seven segment fonts with alignment,
//!   wrapping and rotation
//! - HSB to RGB565 color conversion
//! - Filtered XPT2046 touch sampling
//!
//! ## Usage
//!
//! ```rust,no_run
//! use core::convert::Infallible;
//! use embedded_hal::digital::OutputPin;
//! use embedded_hal::spi::SpiBus;
//! use tft_raster::{Builder, Color, ColorDepth, Dimensions, Interface, Orientation, Renderer};
//!
//! # struct MockSpi;
//! # impl embedded_hal::spi::ErrorType for MockSpi { type Error = Infallible; }
//! # impl SpiBus for MockSpi {
//! #     fn read(&mut self, _words: &mut [u8]) -> Result<(), Self::Error> { Ok(()) }
//! #     fn write(&mut self, _words: &[u8]) -> Result<(), Self::Error> { Ok(()) }
//! #     fn transfer(&mut self, _r: &mut [u8], _w: &[u8]) -> Result<(), Self::Error> { Ok(()) }
//! #     fn transfer_in_place(&mut self, _words: &mut [u8]) -> Result<(), Self::Error> { Ok(()) }
//! #     fn flush(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! # }
//! # struct MockPin;
//! # impl embedded_hal::digital::ErrorType for MockPin { type Error = Infallible; }
//! # impl OutputPin for MockPin {
//! #     fn set_low(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! #     fn set_high(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! # }
//! # let spi = MockSpi;
//! # let dc = MockPin;
//! # let cs = MockPin;
//! let interface = Interface::new(spi, dc, cs, ColorDepth::Rgb565);
//! let dims = match Dimensions::new(240, 320) {
//!     Ok(dims) => dims,
//!     Err(_) => return,
//! };
//! let config = match Builder::new()
//!     .dimensions(dims)
//!     .orientation(Orientation::Landscape)
//!     .build()
//! {
//!     Ok(config) => config,
//!     Err(_) => return,
//! };
//!
//! let mut renderer = Renderer::new(interface, config);
//! let _ = renderer.fill_screen(Color::BLACK);
//! let _ = renderer.draw_circle(160, 120, 50, Color::from_hsb(200.0, 1.0, 1.0));
//! let _ = renderer.draw_arc(160, 120, 80, 10, 0.0, 270.0, Color::ORANGE);
//! ```

#![no_std]

#[cfg(any(test, feature = "alloc"))]
extern crate alloc;

/// Arc rasterization
pub mod arc;
/// Clip window
pub mod clip;
/// RGB565 colors and HSB conversion
pub mod color;
/// MIPI-DCS command definitions
pub mod command;
/// Renderer configuration types and builder
pub mod config;
/// Error types for the crate
pub mod error;
/// Glyph tables
pub mod font;
/// Pixel sink abstraction
pub mod interface;
/// Shape rasterization
pub mod primitives;
/// Renderer context and clipped writers
pub mod renderer;
/// Seven segment digits
pub mod seven_segment;
/// Text layout and glyph painting
pub mod text;
/// Touch panel sampling
pub mod touch;

/// Graphics support via embedded-graphics (requires `graphics` feature)
#[cfg(feature = "graphics")]
pub mod graphics;

#[cfg(test)]
mod mock;

pub use clip::ClipWindow;
pub use color::Color;
pub use config::{
    Builder, ColorDepth, Config, DEFAULT_ANGLE_OFFSET, DEFAULT_ARC_ANGLE_MAX, Dimensions,
    MAX_DIMENSION, Orientation,
};
pub use error::{BuilderError, Error, FontError, TouchError};
pub use font::{FixedFont, Font, FontKind, GlyphRecord, ProportionalFont};
pub use interface::{Interface, InterfaceError, PixelSink};
pub use primitives::Quadrants;
pub use renderer::{BusGuard, Cursor, DrawResult, RenderState, Renderer};
pub use seven_segment::SevenSegment;
pub use text::{XPos, YPos};
pub use touch::{TouchAxis, TouchSource, Xpt2046, sample_touch};
