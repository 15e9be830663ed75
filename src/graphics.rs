//! Graphics support via embedded-graphics
//!
//! [`Renderer`] implements [`DrawTarget`] so embedded-graphics primitives,
//! images and text can be drawn alongside the native shape and font calls.
//! Pixels pass through the same clip window as every other draw call, and
//! solid fills are sent as single runs.
//!
//! ## Example
//!
//! ```rust,no_run
//! use embedded_graphics::{
//!     prelude::*,
//!     primitives::{Circle, PrimitiveStyle},
//! };
//! use tft_raster::{Builder, Color, Dimensions, Renderer};
//! # use tft_raster::PixelSink;
//! # struct NullSink;
//! # impl PixelSink for NullSink {
//! #     type Error = core::convert::Infallible;
//! #     fn write_pixel(&mut self, _x: u16, _y: u16, _c: Color) -> Result<(), Self::Error> { Ok(()) }
//! #     fn read_pixel(&mut self, _x: u16, _y: u16) -> Result<Color, Self::Error> { Ok(Color::BLACK) }
//! #     fn write_run(
//! #         &mut self, _x1: u16, _y1: u16, _x2: u16, _y2: u16, _c: Color, _n: u32,
//! #     ) -> Result<(), Self::Error> { Ok(()) }
//! # }
//! # let sink = NullSink;
//! let dims = match Dimensions::new(240, 320) {
//!     Ok(dims) => dims,
//!     Err(_) => return,
//! };
//! let config = match Builder::new().dimensions(dims).build() {
//!     Ok(config) => config,
//!     Err(_) => return,
//! };
//! let mut renderer = Renderer::new(sink, config);
//!
//! let _ = Circle::new(Point::new(10, 10), 40)
//!     .into_styled(PrimitiveStyle::with_stroke(Color::YELLOW, 1))
//!     .draw(&mut renderer);
//! ```

use embedded_graphics_core::{
    Pixel,
    draw_target::DrawTarget,
    geometry::{OriginDimensions, Point, Size},
    primitives::Rectangle,
};

use crate::color::Color;
use crate::error::Error;
use crate::interface::PixelSink;
use crate::renderer::Renderer;

fn saturate(value: u32) -> i32 {
    i32::try_from(value).unwrap_or(i32::MAX)
}

impl<S> DrawTarget for Renderer<'_, S>
where
    S: PixelSink,
{
    type Color = Color;
    type Error = Error<S>;

    fn draw_iter<Iter>(&mut self, pixels: Iter) -> Result<(), Self::Error>
    where
        Iter: IntoIterator<Item = Pixel<Self::Color>>,
    {
        let mut bus = self.bus();
        for Pixel(Point { x, y }, color) in pixels {
            bus.draw_pixel(x, y, color)?;
        }
        Ok(())
    }

    fn fill_solid(&mut self, area: &Rectangle, color: Self::Color) -> Result<(), Self::Error> {
        if area.is_zero_sized() {
            return Ok(());
        }
        let Point { x, y } = area.top_left;
        self.fill_rect(
            x,
            y,
            saturate(area.size.width),
            saturate(area.size.height),
            color,
        )
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        self.fill_screen(color)
    }
}

impl<S> OriginDimensions for Renderer<'_, S>
where
    S: PixelSink,
{
    fn size(&self) -> Size {
        Size::new(u32::from(self.width), u32::from(self.height))
    }
}
