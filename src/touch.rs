//! Touch panel sampling
//!
//! Resistive touch controllers return noisy readings. [`sample_touch`] reads
//! an axis repeatedly until a batch settles, then averages the batch with its
//! lowest and highest reading dropped.
//!
//! ## Example
//!
//! ```
//! use core::convert::Infallible;
//! use tft_raster::{TouchAxis, TouchSource, sample_touch};
//!
//! struct Steady(u16);
//!
//! impl TouchSource for Steady {
//!     type Error = Infallible;
//!
//!     fn sample_axis(&mut self, _axis: TouchAxis) -> Result<u16, Self::Error> {
//!         Ok(self.0)
//!     }
//! }
//!
//! let value = match sample_touch(&mut Steady(1234), TouchAxis::X, 8) {
//!     Ok(value) => value,
//!     Err(_) => return,
//! };
//! assert_eq!(value, 1234);
//! ```

use core::fmt::Debug;

use embedded_hal::spi::SpiDevice;
use log::warn;

use crate::error::TouchError;

/// Most readings taken per batch
pub const MAX_SAMPLES: usize = 18;

/// Most batches read before the last one is accepted
pub const MAX_BATCHES: usize = 10;

/// Spread below which a batch counts as settled
pub const NOISE_THRESHOLD: u16 = 40;

/// Measurement selected on the touch controller
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TouchAxis {
    /// Horizontal position
    X,
    /// Vertical position
    Y,
    /// First pressure plate
    Z1,
    /// Second pressure plate
    Z2,
}

impl TouchAxis {
    /// XPT2046 control byte for a 12-bit differential conversion
    pub fn control_byte(self) -> u8 {
        match self {
            TouchAxis::X => 0xD0,
            TouchAxis::Y => 0x90,
            TouchAxis::Z1 => 0xB0,
            TouchAxis::Z2 => 0xC0,
        }
    }
}

/// Source of raw touch readings
pub trait TouchSource {
    /// Error type for a failed reading
    type Error: Debug;

    /// Take one raw reading of `axis`
    fn sample_axis(&mut self, axis: TouchAxis) -> Result<u16, Self::Error>;
}

/// Read `axis` and return the filtered value
///
/// One reading is taken and thrown away first. `samples` below 3 take a
/// single reading per batch that is returned as is; more than
/// [`MAX_SAMPLES`] are capped. Batches are read until one spreads less than
/// [`NOISE_THRESHOLD`], at most [`MAX_BATCHES`] times; the last batch read is
/// used either way. Any failed reading aborts at once.
pub fn sample_touch<T: TouchSource>(
    source: &mut T,
    axis: TouchAxis,
    samples: usize,
) -> Result<u16, TouchError<T::Error>> {
    let samples = if samples < 3 { 1 } else { samples.min(MAX_SAMPLES) };
    let read = |source: &mut T| {
        source.sample_axis(axis).map_err(|e| {
            warn!("touch read of {:?} failed: {:?}", axis, e);
            TouchError::HardwareReadFailure(e)
        })
    };

    read(source)?;

    let mut batch = [0u16; MAX_SAMPLES];
    for _ in 0..MAX_BATCHES {
        for slot in &mut batch[..samples] {
            *slot = read(source)?;
        }
        let (min, max) = spread(&batch[..samples]);
        if max - min < NOISE_THRESHOLD {
            break;
        }
    }

    Ok(trimmed_mean(&batch[..samples]))
}

fn spread(values: &[u16]) -> (u16, u16) {
    values
        .iter()
        .fold((u16::MAX, u16::MIN), |(min, max), &v| (min.min(v), max.max(v)))
}

/// Mean without one lowest and one highest value; fewer than 3 values
/// return the first
fn trimmed_mean(values: &[u16]) -> u16 {
    if values.len() < 3 {
        return values.first().copied().unwrap_or(0);
    }
    let (min, max) = spread(values);
    let sum: u32 = values.iter().map(|&v| u32::from(v)).sum();
    let trimmed = sum - u32::from(min) - u32::from(max);
    (trimmed / (values.len() as u32 - 2)) as u16
}

/// XPT2046 resistive touch controller on its own SPI device
///
/// ## Type Parameters
///
/// * `SPI` - SPI device implementing [`SpiDevice`]; chip select is managed
///   by the device
pub struct Xpt2046<SPI> {
    spi: SPI,
}

impl<SPI: SpiDevice> Xpt2046<SPI> {
    /// Create a new Xpt2046
    pub fn new(spi: SPI) -> Self {
        Self { spi }
    }

    /// Consume the driver and return the SPI device
    pub fn release(self) -> SPI {
        self.spi
    }
}

impl<SPI: SpiDevice> TouchSource for Xpt2046<SPI> {
    type Error = SPI::Error;

    fn sample_axis(&mut self, axis: TouchAxis) -> Result<u16, Self::Error> {
        let mut rx = [0u8; 3];
        self.spi.transfer(&mut rx, &[axis.control_byte(), 0, 0])?;
        Ok(((u16::from(rx[1]) << 8 | u16::from(rx[2])) >> 3) & 0x0FFF)
    }
}
