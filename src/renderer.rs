//! Renderer context
//!
//! [`Renderer`] owns everything a draw call reads or mutates: the pixel sink,
//! the device surface, the clip window, the active font, the text cursor and
//! the [`RenderState`]. The clipped pixel and run writers in this module are
//! the only code that talks to the sink; every shape and glyph is built on
//! top of them.

use core::ops::{Deref, DerefMut};

use log::debug;

use crate::clip::ClipWindow;
use crate::color::Color;
use crate::config::{ColorDepth, Config, Dimensions, Orientation, oriented};
use crate::error::Error;
use crate::font::Font;
use crate::interface::PixelSink;

/// Result of a draw call
pub type DrawResult<S> = core::result::Result<(), Error<S>>;

/// Colors and flags consulted by shape and text drawing
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RenderState {
    /// Text foreground color
    pub foreground: Color,
    /// Text background color
    pub background: Color,
    /// Skip background pixels when painting glyphs
    pub transparent: bool,
    /// Wrap text at the clip window's right edge
    pub wrap: bool,
    /// Force proportional fonts onto a fixed advance
    pub force_fixed_width: bool,
    /// Text rotation in degrees, `0..360`
    pub rotation: i32,
    /// Value representing a full circle for arc angles
    pub arc_angle_max: f32,
    /// Rotational offset in degrees for arc and angle-based lines
    pub angle_offset: f32,
}

impl RenderState {
    fn from_config(config: &Config) -> Self {
        Self {
            foreground: config.foreground,
            background: config.background,
            transparent: config.transparent,
            wrap: config.wrap,
            force_fixed_width: config.force_fixed_width,
            rotation: 0,
            arc_angle_max: config.arc_angle_max,
            angle_offset: config.angle_offset,
        }
    }
}

/// Text insertion position
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Cursor {
    /// Column of the next glyph
    pub x: i32,
    /// Row of the current line's top edge
    pub y: i32,
}

/// Rasterizer and text engine bound to one pixel sink
///
/// ## Type Parameters
///
/// * `'f` - Lifetime of the glyph table of the selected font
/// * `S` - Sink type implementing [`PixelSink`]
pub struct Renderer<'f, S>
where
    S: PixelSink,
{
    /// Pixel writer
    pub(crate) sink: S,
    /// Native (portrait) panel dimensions
    native: Dimensions,
    /// Current orientation
    orientation: Orientation,
    /// Bus pixel format
    color_depth: ColorDepth,
    /// Surface width in the current orientation
    pub(crate) width: u16,
    /// Surface height in the current orientation
    pub(crate) height: u16,
    /// Active clip window
    pub(crate) clip: ClipWindow,
    /// Colors and flags
    pub(crate) state: RenderState,
    /// Selected font
    pub(crate) font: Option<Font<'f>>,
    /// Text cursor
    pub(crate) cursor: Cursor,
}

impl<'f, S> Renderer<'f, S>
where
    S: PixelSink,
{
    /// Create a new Renderer
    ///
    /// The clip window starts out covering the whole surface in the
    /// configured orientation. No font is selected.
    pub fn new(sink: S, config: Config) -> Self {
        let dims = config.oriented_dimensions();
        Self {
            sink,
            native: config.dimensions,
            orientation: config.orientation,
            color_depth: config.color_depth,
            width: dims.width,
            height: dims.height,
            clip: ClipWindow::full(dims.width, dims.height),
            state: RenderState::from_config(&config),
            font: None,
            cursor: Cursor::default(),
        }
    }

    /// Consume the renderer and hand back the sink
    pub fn release(self) -> S {
        self.sink
    }

    /// Access the sink
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Access the sink mutably
    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    /// Surface dimensions in the current orientation
    pub fn dimensions(&self) -> Dimensions {
        Dimensions {
            width: self.width,
            height: self.height,
        }
    }

    /// Current orientation
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Bus pixel format
    pub fn color_depth(&self) -> ColorDepth {
        self.color_depth
    }

    /// Switch orientation
    ///
    /// Recomputes the surface size, resets the clip window to the whole
    /// surface and lets the sink reprogram the controller.
    pub fn set_orientation(&mut self, orientation: Orientation) -> DrawResult<S> {
        let dims = oriented(self.native, orientation);
        self.orientation = orientation;
        self.width = dims.width;
        self.height = dims.height;
        self.clip = ClipWindow::full(dims.width, dims.height);
        debug!(
            "orientation {:?}: surface {}x{}",
            orientation, dims.width, dims.height
        );
        self.sink.set_orientation(orientation).map_err(Error::Sink)
    }

    /// Turn color inversion on or off
    pub fn set_inverted(&mut self, inverted: bool) -> DrawResult<S> {
        self.sink.set_inverted(inverted).map_err(Error::Sink)
    }

    /// Active clip window
    pub fn clip_window(&self) -> ClipWindow {
        self.clip
    }

    /// Restrict drawing to the inclusive rectangle `(x1, y1)..=(x2, y2)`
    ///
    /// Edges beyond the surface are clamped; an inverted window collapses
    /// onto its smaller edge.
    pub fn set_clip_window(&mut self, x1: u16, y1: u16, x2: u16, y2: u16) {
        self.clip.set(x1, y1, x2, y2, self.width, self.height);
        debug!(
            "clip window ({}, {})-({}, {})",
            self.clip.x1, self.clip.y1, self.clip.x2, self.clip.y2
        );
    }

    /// Restore the clip window to the whole surface
    pub fn reset_clip_window(&mut self) {
        self.clip = ClipWindow::full(self.width, self.height);
    }

    /// Current colors and flags
    pub fn state(&self) -> &RenderState {
        &self.state
    }

    /// Text cursor after the last print
    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    /// Set the text foreground color
    pub fn set_foreground_color(&mut self, color: Color) {
        self.state.foreground = color;
    }

    /// Set the text background color
    pub fn set_background_color(&mut self, color: Color) {
        self.state.background = color;
    }

    /// Skip (`true`) or paint (`false`) glyph background pixels
    pub fn set_transparent(&mut self, transparent: bool) {
        self.state.transparent = transparent;
    }

    /// Wrap text at the clip window's right edge instead of stopping
    pub fn set_wrap(&mut self, wrap: bool) {
        self.state.wrap = wrap;
    }

    /// Give every proportional glyph the font's widest advance
    pub fn set_force_fixed_width(&mut self, force: bool) {
        self.state.force_fixed_width = force;
    }

    /// Rotate text by `degrees` around the print origin
    pub fn set_rotation_angle(&mut self, degrees: i32) {
        self.state.rotation = degrees.rem_euclid(360);
    }

    /// Set the value representing a full circle for arcs
    pub fn set_arc_params(&mut self, angle_max: f32) {
        self.state.arc_angle_max = angle_max;
    }

    /// Set the rotational offset in degrees for arcs and angle lines
    pub fn set_angle_offset(&mut self, degrees: f32) {
        self.state.angle_offset = degrees;
    }

    /// Select the font used by [`print`](Self::print)
    pub fn select_font(&mut self, font: Font<'f>) {
        debug!("font selected: {:?}", font.kind());
        self.font = Some(font);
    }

    /// Deselect the font; printing becomes a no-op
    pub fn clear_font(&mut self) {
        self.font = None;
    }

    /// Selected font
    pub fn font(&self) -> Option<&Font<'f>> {
        self.font.as_ref()
    }

    /// Hold the bus for a sequence of writes
    ///
    /// The returned guard derefs to the renderer and releases the bus when
    /// dropped, on every exit path.
    pub fn bus(&mut self) -> BusGuard<'_, 'f, S> {
        self.sink.acquire_bus();
        BusGuard { renderer: self }
    }

    /// Draw a pixel; points outside the clip window are dropped
    pub fn draw_pixel(&mut self, x: i32, y: i32, color: Color) -> DrawResult<S> {
        if !self.clip.contains(x, y) {
            return Ok(());
        }
        self.sink
            .write_pixel(x as u16, y as u16, color)
            .map_err(Error::Sink)
    }

    /// Read a pixel back; points outside the clip window read as black
    pub fn read_pixel(&mut self, x: i32, y: i32) -> core::result::Result<Color, Error<S>> {
        if !self.clip.contains(x, y) {
            return Ok(Color::BLACK);
        }
        self.sink
            .read_pixel(x as u16, y as u16)
            .map_err(Error::Sink)
    }

    /// Draw `h` pixels downward from `(x, y)`
    pub fn draw_vline(&mut self, x: i32, y: i32, h: i32, color: Color) -> DrawResult<S> {
        let Some((y, h)) = self.clip.clip_vspan(x, y, h) else {
            return Ok(());
        };
        self.run(x, y, x, y + h - 1, color, h as u32)
    }

    /// Draw `w` pixels rightward from `(x, y)`
    pub fn draw_hline(&mut self, x: i32, y: i32, w: i32, color: Color) -> DrawResult<S> {
        let Some((x, w)) = self.clip.clip_hspan(x, y, w) else {
            return Ok(());
        };
        self.run(x, y, x + w - 1, y, color, w as u32)
    }

    /// Fill a `w` x `h` rectangle with its top-left corner at `(x, y)`
    pub fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32, color: Color) -> DrawResult<S> {
        let Some((x, y, w, h)) = self.clip.clip_rect(x, y, w, h) else {
            return Ok(());
        };
        self.run(x, y, x + w - 1, y + h - 1, color, (w * h) as u32)
    }

    /// Fill the whole surface, ignoring the clip window
    pub fn fill_screen(&mut self, color: Color) -> DrawResult<S> {
        let count = self.dimensions().pixel_count();
        let (w, h) = (i32::from(self.width), i32::from(self.height));
        self.run(0, 0, w - 1, h - 1, color, count)
    }

    fn run(&mut self, x1: i32, y1: i32, x2: i32, y2: i32, color: Color, count: u32) -> DrawResult<S> {
        self.sink
            .write_run(x1 as u16, y1 as u16, x2 as u16, y2 as u16, color, count)
            .map_err(Error::Sink)
    }
}

/// Exclusive hold on the sink's bus
///
/// Created by [`Renderer::bus`]. Derefs to the renderer so draw calls can be
/// made through it; dropping it releases the bus.
pub struct BusGuard<'r, 'f, S>
where
    S: PixelSink,
{
    renderer: &'r mut Renderer<'f, S>,
}

impl<'f, S: PixelSink> Deref for BusGuard<'_, 'f, S> {
    type Target = Renderer<'f, S>;

    fn deref(&self) -> &Self::Target {
        self.renderer
    }
}

impl<S: PixelSink> DerefMut for BusGuard<'_, '_, S> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.renderer
    }
}

impl<S: PixelSink> Drop for BusGuard<'_, '_, S> {
    fn drop(&mut self) {
        self.renderer.sink.release_bus();
    }
}
