//! Pixel sink abstraction
//!
//! This module provides the [`PixelSink`] trait that every draw call writes
//! through, and the [`Interface`] struct implementing it for MIPI-DCS
//! controllers (ILI9341, ILI9488) on an SPI bus.
//!
//! ## Hardware Requirements
//!
//! [`Interface`] needs:
//! - SPI bus (MOSI + MISO + SCK), driven through [`SpiBus`]
//! - 2 GPIO outputs:
//!   - **DC**: Data/Command select
//!   - **CS**: Chip select (active low), held across a bus acquisition
//!
//! ## Example
//!
//! ```rust,no_run
//! use embedded_hal::digital::OutputPin;
//! use embedded_hal::spi::SpiBus;
//! use tft_raster::{Color, ColorDepth, Interface, PixelSink};
//! # use core::convert::Infallible;
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
//! let mut interface = Interface::new(MockSpi, MockPin, MockPin, ColorDepth::Rgb565);
//!
//! // Paint a 10-pixel horizontal run
//! let _ = interface.write_run(0, 0, 9, 0, Color::RED, 10);
//! ```

use core::fmt::Debug;
use embedded_hal::digital::OutputPin;
use embedded_hal::spi::SpiBus;

use crate::color::Color;
use crate::command::{CASET, INVOFF, INVON, MADCTL, PASET, RAMRD, RAMWR};
use crate::config::{ColorDepth, Orientation};

type SinkResult<T, E> = core::result::Result<T, E>;

/// Trait for the pixel-push layer below the rasterizer
///
/// Coordinates handed to a sink are always inside the device surface; the
/// renderer clips before calling in.
///
/// ## Implementing
///
/// For ILI9341-class panels use the provided [`Interface`]. Implement this
/// trait on your own type for other buses or for off-screen capture.
pub trait PixelSink {
    /// Error type for sink operations
    ///
    /// Must implement [`Debug`] for error reporting.
    type Error: Debug;

    /// Write one pixel
    fn write_pixel(&mut self, x: u16, y: u16, color: Color) -> SinkResult<(), Self::Error>;

    /// Read one pixel back from display memory
    fn read_pixel(&mut self, x: u16, y: u16) -> SinkResult<Color, Self::Error>;

    /// Write `count` pixels of `color` into the inclusive rectangle
    /// `(x1, y1)..=(x2, y2)` in row-major order
    fn write_run(
        &mut self,
        x1: u16,
        y1: u16,
        x2: u16,
        y2: u16,
        color: Color,
        count: u32,
    ) -> SinkResult<(), Self::Error>;

    /// Take exclusive hold of the bus for a sequence of writes
    ///
    /// Always paired with [`release_bus`](Self::release_bus).
    fn acquire_bus(&mut self) {}

    /// Give up the hold taken by [`acquire_bus`](Self::acquire_bus)
    fn release_bus(&mut self) {}

    /// Program the controller for a new orientation
    fn set_orientation(&mut self, _orientation: Orientation) -> SinkResult<(), Self::Error> {
        Ok(())
    }

    /// Turn color inversion on or off
    fn set_inverted(&mut self, _inverted: bool) -> SinkResult<(), Self::Error> {
        Ok(())
    }
}

/// Errors that can occur at the interface level
///
/// Generic over SPI and GPIO error types.
#[derive(Debug)]
pub enum InterfaceError<SpiErr, PinErr> {
    /// SPI communication error
    Spi(SpiErr),
    /// GPIO pin error
    Pin(PinErr),
}

impl<SpiErr: Debug, PinErr: Debug> core::fmt::Display for InterfaceError<SpiErr, PinErr> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Spi(e) => write!(f, "SPI error: {e:?}"),
            Self::Pin(e) => write!(f, "Pin error: {e:?}"),
        }
    }
}

impl<SpiErr: Debug, PinErr: Debug> core::error::Error for InterfaceError<SpiErr, PinErr> {}

/// Pixels packed per SPI write when streaming a run
const STREAM_PIXELS: usize = 32;

/// SPI implementation of [`PixelSink`] for MIPI-DCS controllers
///
/// ## Type Parameters
///
/// * `SPI` - SPI bus implementing [`SpiBus`]
/// * `DC` - Data/Command pin implementing [`OutputPin`]
/// * `CS` - Chip select pin implementing [`OutputPin`]
pub struct Interface<SPI, DC, CS> {
    /// SPI bus for communication
    spi: SPI,
    /// Data/Command select pin (low=command, high=data)
    dc: DC,
    /// Chip select (active low)
    cs: CS,
    /// Bytes per pixel on the wire
    depth: ColorDepth,
    /// Nesting depth of bus acquisitions; CS stays low while nonzero
    holds: u32,
}

impl<SPI, DC, CS> Interface<SPI, DC, CS>
where
    SPI: SpiBus,
    DC: OutputPin,
    CS: OutputPin,
{
    /// Create a new Interface
    ///
    /// # Arguments
    ///
    /// * `spi` - SPI bus (must implement [`SpiBus`])
    /// * `dc` - Data/Command pin (output, low=command, high=data)
    /// * `cs` - Chip select pin (output, active low)
    /// * `depth` - Pixel format the controller was initialized with
    pub fn new(spi: SPI, dc: DC, cs: CS, depth: ColorDepth) -> Self {
        Self {
            spi,
            dc,
            cs,
            depth,
            holds: 0,
        }
    }

    /// Release the bus and pins
    pub fn release(self) -> (SPI, DC, CS) {
        (self.spi, self.dc, self.cs)
    }

    /// Whether the bus is currently held by an acquisition
    pub fn is_held(&self) -> bool {
        self.holds > 0
    }
}

impl<SPI, DC, CS, PinErr> Interface<SPI, DC, CS>
where
    SPI: SpiBus,
    SPI::Error: Debug,
    DC: OutputPin<Error = PinErr>,
    CS: OutputPin<Error = PinErr>,
    PinErr: Debug,
{
    fn select(&mut self) -> SinkResult<(), InterfaceError<SPI::Error, PinErr>> {
        if self.holds == 0 {
            self.cs.set_low().map_err(InterfaceError::Pin)?;
        }
        Ok(())
    }

    fn deselect(&mut self) -> SinkResult<(), InterfaceError<SPI::Error, PinErr>> {
        let flushed = self.spi.flush().map_err(InterfaceError::Spi);
        if self.holds == 0 {
            self.cs.set_high().map_err(InterfaceError::Pin)?;
        }
        flushed
    }

    /// Run `body` with CS asserted
    ///
    /// CS is deasserted afterwards even when `body` fails; the first error
    /// is returned.
    fn transaction<T>(
        &mut self,
        body: impl FnOnce(&mut Self) -> SinkResult<T, InterfaceError<SPI::Error, PinErr>>,
    ) -> SinkResult<T, InterfaceError<SPI::Error, PinErr>> {
        self.select()?;
        let result = body(self);
        let released = self.deselect();
        let value = result?;
        released?;
        Ok(value)
    }

    fn command(
        &mut self,
        command: u8,
        data: &[u8],
    ) -> SinkResult<(), InterfaceError<SPI::Error, PinErr>> {
        self.dc.set_low().map_err(InterfaceError::Pin)?;
        self.spi.write(&[command]).map_err(InterfaceError::Spi)?;
        if !data.is_empty() {
            self.dc.set_high().map_err(InterfaceError::Pin)?;
            self.spi.write(data).map_err(InterfaceError::Spi)?;
        }
        Ok(())
    }

    fn set_window(
        &mut self,
        x1: u16,
        y1: u16,
        x2: u16,
        y2: u16,
    ) -> SinkResult<(), InterfaceError<SPI::Error, PinErr>> {
        let [x1h, x1l] = x1.to_be_bytes();
        let [x2h, x2l] = x2.to_be_bytes();
        let [y1h, y1l] = y1.to_be_bytes();
        let [y2h, y2l] = y2.to_be_bytes();
        self.command(CASET, &[x1h, x1l, x2h, x2l])?;
        self.command(PASET, &[y1h, y1l, y2h, y2l])
    }

    fn stream(
        &mut self,
        color: Color,
        count: u32,
    ) -> SinkResult<(), InterfaceError<SPI::Error, PinErr>> {
        let (bytes, len) = color.to_bytes(self.depth);
        let mut chunk = [0u8; STREAM_PIXELS * 3];
        for pixel in chunk.chunks_exact_mut(len) {
            pixel.copy_from_slice(&bytes[..len]);
        }

        self.command(RAMWR, &[])?;
        self.dc.set_high().map_err(InterfaceError::Pin)?;
        let mut remaining = count as usize;
        while remaining > 0 {
            let pixels = remaining.min(STREAM_PIXELS);
            self.spi
                .write(&chunk[..pixels * len])
                .map_err(InterfaceError::Spi)?;
            remaining -= pixels;
        }
        Ok(())
    }
}

impl<SPI, DC, CS, PinErr> PixelSink for Interface<SPI, DC, CS>
where
    SPI: SpiBus,
    SPI::Error: Debug,
    DC: OutputPin<Error = PinErr>,
    CS: OutputPin<Error = PinErr>,
    PinErr: Debug,
{
    type Error = InterfaceError<SPI::Error, PinErr>;

    fn write_pixel(&mut self, x: u16, y: u16, color: Color) -> SinkResult<(), Self::Error> {
        self.write_run(x, y, x, y, color, 1)
    }

    fn read_pixel(&mut self, x: u16, y: u16) -> SinkResult<Color, Self::Error> {
        self.transaction(|iface| {
            iface.set_window(x, y, x, y)?;
            iface.command(RAMRD, &[])?;
            iface.dc.set_high().map_err(InterfaceError::Pin)?;
            // dummy byte, then R, G, B
            let mut buf = [0u8; 4];
            iface.spi.read(&mut buf).map_err(InterfaceError::Spi)?;
            Ok(Color::from_rgb(buf[1], buf[2], buf[3]))
        })
    }

    fn write_run(
        &mut self,
        x1: u16,
        y1: u16,
        x2: u16,
        y2: u16,
        color: Color,
        count: u32,
    ) -> SinkResult<(), Self::Error> {
        self.transaction(|iface| {
            iface.set_window(x1, y1, x2, y2)?;
            iface.stream(color, count)
        })
    }

    fn acquire_bus(&mut self) {
        if self.holds == 0 {
            let _ = self.cs.set_low();
        }
        self.holds += 1;
    }

    fn release_bus(&mut self) {
        if self.holds == 1 {
            let _ = self.spi.flush();
            let _ = self.cs.set_high();
        }
        self.holds = self.holds.saturating_sub(1);
    }

    fn set_orientation(&mut self, orientation: Orientation) -> SinkResult<(), Self::Error> {
        self.transaction(|iface| iface.command(MADCTL, &[orientation.madctl()]))
    }

    fn set_inverted(&mut self, inverted: bool) -> SinkResult<(), Self::Error> {
        self.transaction(|iface| iface.command(if inverted { INVON } else { INVOFF }, &[]))
    }
}
