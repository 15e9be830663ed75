//! Error types for the crate
//!
//! Drawing is forgiving: shapes outside the clip window are
//! dropped, collapsed sizes are drawn as one pixel and unknown glyphs are
//! skipped, none of which is reported. The errors here cover what a caller
//! can act on.
//!
//! ## Error Types
//!
//! - [`Error`] - Pixel sink failure during a draw call
//! - [`BuilderError`] - Errors during configuration construction
//! - [`FontError`] - Malformed glyph table handed to [`Font`](crate::font::Font)
//! - [`TouchError`] - Touch controller read failure
//!
//! ## Example
//!
//! ```
//! use tft_raster::{Builder, BuilderError, Dimensions};
//!
//! // Missing dimensions
//! let result = Builder::new().build();
//! assert!(matches!(result, Err(BuilderError::MissingDimensions)));
//!
//! // Invalid dimensions
//! let result = Dimensions::new(0, 320);
//! assert!(result.is_err());
//! ```

use crate::config::MAX_DIMENSION;
use crate::interface::PixelSink;

/// Errors that can occur while drawing
///
/// Generic over the sink type to preserve the specific error type.
#[derive(Debug)]
pub enum Error<S: PixelSink> {
    /// Sink error (SPI/GPIO)
    ///
    /// Wraps the underlying error from the [`PixelSink`] implementation.
    Sink(S::Error),
}

impl<S: PixelSink> core::fmt::Display for Error<S> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Sink(e) => write!(f, "Pixel sink error: {e:?}"),
        }
    }
}

impl<S: PixelSink + core::fmt::Debug> core::error::Error for Error<S> {}

/// Errors that can occur when building configuration
#[derive(Debug)]
pub enum BuilderError {
    /// Dimensions were not specified
    ///
    /// [`Builder::dimensions()`](crate::config::Builder::dimensions) must be called before building.
    MissingDimensions,
    /// Invalid dimensions provided
    ///
    /// See [`Dimensions::new()`](crate::config::Dimensions::new) for constraints.
    InvalidDimensions {
        /// Width requested
        width: u16,
        /// Height requested
        height: u16,
    },
}

impl core::fmt::Display for BuilderError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::MissingDimensions => write!(f, "Dimensions must be specified"),
            Self::InvalidDimensions { width, height } => write!(
                f,
                "Invalid dimensions {width}x{height} (each side must be 1..={MAX_DIMENSION})"
            ),
        }
    }
}

impl core::error::Error for BuilderError {}

/// Errors raised when a glyph table is wrapped in a [`Font`](crate::font::Font)
#[derive(Debug, PartialEq, Eq)]
pub enum FontError {
    /// The table is shorter than its header claims
    TableTooShort {
        /// Bytes the header requires
        required: usize,
        /// Bytes provided
        provided: usize,
    },
    /// The header describes a font with no glyphs or zero height
    EmptyFont,
    /// A seven-segment font needs a non-zero segment length and width
    InvalidSegmentSize,
}

impl core::fmt::Display for FontError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::TableTooShort { required, provided } => write!(
                f,
                "Font table too short: required {required} bytes, provided {provided}"
            ),
            Self::EmptyFont => write!(f, "Font table describes no glyphs"),
            Self::InvalidSegmentSize => write!(f, "Segment length and width must be non-zero"),
        }
    }
}

impl core::error::Error for FontError {}

/// Errors reported by [`sample_touch`](crate::touch::sample_touch)
#[derive(Debug)]
pub enum TouchError<E> {
    /// A raw reading failed; sampling stopped immediately
    HardwareReadFailure(E),
}

impl<E: core::fmt::Debug> core::fmt::Display for TouchError<E> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::HardwareReadFailure(e) => write!(f, "Touch read failed: {e:?}"),
        }
    }
}

impl<E: core::fmt::Debug> core::error::Error for TouchError<E> {}
