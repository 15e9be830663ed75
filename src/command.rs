//! MIPI-DCS command definitions
//!
//! Command bytes used by [`Interface`](crate::interface::Interface) to drive
//! ILI9341/ILI9488-class controllers. Commands are sent over SPI with the DC
//! pin low; their parameters follow with DC high.
//!
//! ## Command Structure
//!
//! A pixel write follows the pattern:
//! 1. `CASET` with start/end column (big-endian u16 pairs)
//! 2. `PASET` with start/end row
//! 3. `RAMWR` followed by the pixel stream

// Addressing and memory access

/// Column address set (0x2A)
///
/// Data: start column hi/lo, end column hi/lo.
pub const CASET: u8 = 0x2A;

/// Page (row) address set (0x2B)
///
/// Data: start row hi/lo, end row hi/lo.
pub const PASET: u8 = 0x2B;

/// Memory write (0x2C)
///
/// Pixel data follows, filling the window row-major.
pub const RAMWR: u8 = 0x2C;

/// Memory read (0x2E)
///
/// The first byte returned is a dummy, then 3 bytes per pixel.
pub const RAMRD: u8 = 0x2E;

/// Memory access control (0x36)
///
/// Data: one byte built from the `MADCTL_*` bits.
pub const MADCTL: u8 = 0x36;

// Display inversion

/// Display inversion off (0x20)
pub const INVOFF: u8 = 0x20;

/// Display inversion on (0x21)
pub const INVON: u8 = 0x21;

// MADCTL bits

/// Row address order
pub const MADCTL_MY: u8 = 0x80;
/// Column address order
pub const MADCTL_MX: u8 = 0x40;
/// Row/column exchange
pub const MADCTL_MV: u8 = 0x20;
/// BGR color filter order
pub const MADCTL_BGR: u8 = 0x08;
