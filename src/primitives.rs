//! Shape rasterization
//!
//! Integer midpoint and Bresenham walks for lines, circles, ellipses and
//! triangles. Axis-aligned spans are always emitted through
//! [`Renderer::draw_hline`] / [`Renderer::draw_vline`] so they reach the sink
//! as one run each; isolated points go through [`Renderer::draw_pixel`].

use bitflags::bitflags;

use crate::color::Color;
use crate::interface::PixelSink;
use crate::renderer::{DrawResult, Renderer};

const DEG_TO_RAD: f64 = 0.017_453_292_52;

bitflags! {
    /// Quadrants painted by [`Renderer::draw_ellipse`] and [`Renderer::fill_ellipse`]
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct Quadrants: u8 {
        /// Upper-right quarter
        const UPPER_RIGHT = 0x01;
        /// Upper-left quarter
        const UPPER_LEFT = 0x02;
        /// Lower-left quarter
        const LOWER_LEFT = 0x04;
        /// Lower-right quarter
        const LOWER_RIGHT = 0x08;
        /// Whole ellipse
        const ALL = 0x0F;
    }
}

// Corner selectors for the quarter-circle helpers
const CORNER_TOP_LEFT: u8 = 0x1;
const CORNER_TOP_RIGHT: u8 = 0x2;
const CORNER_BOTTOM_RIGHT: u8 = 0x4;
const CORNER_BOTTOM_LEFT: u8 = 0x8;

// Half selectors for the filled helper
const HALF_RIGHT: u8 = 0x1;
const HALF_LEFT: u8 = 0x2;

/// Vertex `idx` of a regular shape: index 0 sits straight above the center
/// at `deg = 0`, later indices proceed counter-clockwise
fn vertex(cx: i32, cy: i32, radius: f64, degrees: i32) -> (i32, i32) {
    let rad = f64::from(degrees) * DEG_TO_RAD;
    let x = f64::from(cx) - libm::sin(rad) * radius;
    let y = f64::from(cy) - libm::cos(rad) * radius;
    (x as i32, y as i32)
}

impl<S> Renderer<'_, S>
where
    S: PixelSink,
{
    /// Draw a line between two points, both ends inclusive
    pub fn draw_line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, color: Color) -> DrawResult<S> {
        if x0 == x1 {
            return self.draw_vline(x0, y0.min(y1), (y1 - y0).abs() + 1, color);
        }
        if y0 == y1 {
            return self.draw_hline(x0.min(x1), y0, (x1 - x0).abs() + 1, color);
        }

        let steep = (y1 - y0).abs() > (x1 - x0).abs();
        let (mut x0, mut y0, mut x1, mut y1) = if steep {
            (y0, x0, y1, x1)
        } else {
            (x0, y0, x1, y1)
        };
        if x0 > x1 {
            core::mem::swap(&mut x0, &mut x1);
            core::mem::swap(&mut y0, &mut y1);
        }

        let dx = x1 - x0;
        let dy = (y1 - y0).abs();
        let ystep = if y0 < y1 { 1 } else { -1 };
        let mut err = dx >> 1;
        let mut xs = x0;
        let mut dlen = 0;

        // Pixels sharing a minor-axis offset go out as one run
        while x0 <= x1 {
            dlen += 1;
            err -= dy;
            if err < 0 {
                err += dx;
                self.line_segment(steep, xs, y0, dlen, color)?;
                dlen = 0;
                y0 += ystep;
                xs = x0 + 1;
            }
            x0 += 1;
        }
        if dlen > 0 {
            self.line_segment(steep, xs, y0, dlen, color)?;
        }
        Ok(())
    }

    fn line_segment(&mut self, steep: bool, major: i32, minor: i32, len: i32, color: Color) -> DrawResult<S> {
        match (steep, len) {
            (true, 1) => self.draw_pixel(minor, major, color),
            (true, _) => self.draw_vline(minor, major, len, color),
            (false, 1) => self.draw_pixel(major, minor, color),
            (false, _) => self.draw_hline(major, minor, len, color),
        }
    }

    /// Draw a line of `length` pixels along `angle` degrees, starting `start`
    /// pixels away from `(x, y)`
    ///
    /// The angle offset from [`set_angle_offset`](Self::set_angle_offset)
    /// is applied, so with the default offset 0 points up.
    pub fn draw_line_by_angle(
        &mut self,
        x: i32,
        y: i32,
        angle: i32,
        start: u16,
        length: u16,
        color: Color,
    ) -> DrawResult<S> {
        let rad = (f64::from(angle) + f64::from(self.state.angle_offset)) * DEG_TO_RAD;
        let (cos, sin) = (libm::cos(rad), libm::sin(rad));
        let near = f64::from(start);
        let far = f64::from(start) + f64::from(length);
        self.draw_line(
            (f64::from(x) + near * cos) as i32,
            (f64::from(y) + near * sin) as i32,
            (f64::from(x) + far * cos) as i32,
            (f64::from(y) + far * sin) as i32,
            color,
        )
    }

    /// Draw a rectangle outline
    pub fn draw_rect(&mut self, x: i32, y: i32, w: i32, h: i32, color: Color) -> DrawResult<S> {
        self.draw_hline(x, y, w, color)?;
        self.draw_vline(x + w - 1, y, h, color)?;
        self.draw_hline(x, y + h - 1, w, color)?;
        self.draw_vline(x, y, h, color)
    }

    /// Draw a rounded rectangle outline with corner radius `r`
    pub fn draw_round_rect(&mut self, x: i32, y: i32, w: i32, h: i32, r: i32, color: Color) -> DrawResult<S> {
        self.draw_hline(x + r, y, w - 2 * r, color)?;
        self.draw_hline(x + r, y + h - 1, w - 2 * r, color)?;
        self.draw_vline(x, y + r, h - 2 * r, color)?;
        self.draw_vline(x + w - 1, y + r, h - 2 * r, color)?;

        self.circle_corners(x + r, y + r, r, CORNER_TOP_LEFT, color)?;
        self.circle_corners(x + w - r - 1, y + r, r, CORNER_TOP_RIGHT, color)?;
        self.circle_corners(x + w - r - 1, y + h - r - 1, r, CORNER_BOTTOM_RIGHT, color)?;
        self.circle_corners(x + r, y + h - r - 1, r, CORNER_BOTTOM_LEFT, color)
    }

    /// Fill a rounded rectangle with corner radius `r`
    pub fn fill_round_rect(&mut self, x: i32, y: i32, w: i32, h: i32, r: i32, color: Color) -> DrawResult<S> {
        self.fill_rect(x + r, y, w - 2 * r, h, color)?;

        self.circle_halves(x + w - r - 1, y + r, r, HALF_RIGHT, h - 2 * r - 1, color)?;
        self.circle_halves(x + r, y + r, r, HALF_LEFT, h - 2 * r - 1, color)
    }

    /// Quarter-circle outlines, one per bit in `corners`
    fn circle_corners(&mut self, x0: i32, y0: i32, r: i32, corners: u8, color: Color) -> DrawResult<S> {
        let mut f = 1 - r;
        let mut ddf_x = 1;
        let mut ddf_y = -2 * r;
        let mut x = 0;
        let mut y = r;

        let mut bus = self.bus();
        while x < y {
            if f >= 0 {
                y -= 1;
                ddf_y += 2;
                f += ddf_y;
            }
            x += 1;
            ddf_x += 2;
            f += ddf_x;
            if corners & CORNER_BOTTOM_RIGHT != 0 {
                bus.draw_pixel(x0 + x, y0 + y, color)?;
                bus.draw_pixel(x0 + y, y0 + x, color)?;
            }
            if corners & CORNER_TOP_RIGHT != 0 {
                bus.draw_pixel(x0 + x, y0 - y, color)?;
                bus.draw_pixel(x0 + y, y0 - x, color)?;
            }
            if corners & CORNER_BOTTOM_LEFT != 0 {
                bus.draw_pixel(x0 - y, y0 + x, color)?;
                bus.draw_pixel(x0 - x, y0 + y, color)?;
            }
            if corners & CORNER_TOP_LEFT != 0 {
                bus.draw_pixel(x0 - y, y0 - x, color)?;
                bus.draw_pixel(x0 - x, y0 - y, color)?;
            }
        }
        Ok(())
    }

    /// Filled half-disc wedges as vertical runs, stretched down by `delta`
    fn circle_halves(&mut self, x0: i32, y0: i32, r: i32, halves: u8, delta: i32, color: Color) -> DrawResult<S> {
        let mut f = 1 - r;
        let mut ddf_x = 1;
        let mut ddf_y = -2 * r;
        let mut x = 0;
        let mut y = r;
        let mut ylm = x0 - r;

        while x < y {
            if f >= 0 {
                if halves & HALF_RIGHT != 0 {
                    self.draw_vline(x0 + y, y0 - x, 2 * x + 1 + delta, color)?;
                }
                if halves & HALF_LEFT != 0 {
                    self.draw_vline(x0 - y, y0 - x, 2 * x + 1 + delta, color)?;
                }
                ylm = x0 - y;
                y -= 1;
                ddf_y += 2;
                f += ddf_y;
            }
            x += 1;
            ddf_x += 2;
            f += ddf_x;

            // columns already painted by the branch above are skipped
            if x0 - x > ylm {
                if halves & HALF_RIGHT != 0 {
                    self.draw_vline(x0 + x, y0 - y, 2 * y + 1 + delta, color)?;
                }
                if halves & HALF_LEFT != 0 {
                    self.draw_vline(x0 - x, y0 - y, 2 * y + 1 + delta, color)?;
                }
            }
        }
        Ok(())
    }

    /// Draw a circle outline
    pub fn draw_circle(&mut self, x: i32, y: i32, radius: i32, color: Color) -> DrawResult<S> {
        let mut f = 1 - radius;
        let mut ddf_x = 1;
        let mut ddf_y = -2 * radius;
        let mut x1 = 0;
        let mut y1 = radius;

        let mut bus = self.bus();
        bus.draw_pixel(x, y + radius, color)?;
        bus.draw_pixel(x, y - radius, color)?;
        bus.draw_pixel(x + radius, y, color)?;
        bus.draw_pixel(x - radius, y, color)?;
        while x1 < y1 {
            if f >= 0 {
                y1 -= 1;
                ddf_y += 2;
                f += ddf_y;
            }
            x1 += 1;
            ddf_x += 2;
            f += ddf_x;
            bus.draw_pixel(x + x1, y + y1, color)?;
            bus.draw_pixel(x - x1, y + y1, color)?;
            bus.draw_pixel(x + x1, y - y1, color)?;
            bus.draw_pixel(x - x1, y - y1, color)?;
            bus.draw_pixel(x + y1, y + x1, color)?;
            bus.draw_pixel(x - y1, y + x1, color)?;
            bus.draw_pixel(x + y1, y - x1, color)?;
            bus.draw_pixel(x - y1, y - x1, color)?;
        }
        Ok(())
    }

    /// Fill a circle
    pub fn fill_circle(&mut self, x: i32, y: i32, radius: i32, color: Color) -> DrawResult<S> {
        self.draw_vline(x, y - radius, 2 * radius + 1, color)?;
        self.circle_halves(x, y, radius, HALF_RIGHT | HALF_LEFT, 0, color)
    }

    /// Draw the selected quadrants of an ellipse outline
    pub fn draw_ellipse(
        &mut self,
        x0: i32,
        y0: i32,
        rx: i32,
        ry: i32,
        color: Color,
        quadrants: Quadrants,
    ) -> DrawResult<S> {
        ellipse_walk(rx, ry, |x, y| {
            let mut bus = self.bus();
            if quadrants.contains(Quadrants::UPPER_RIGHT) {
                bus.draw_pixel(x0 + x, y0 - y, color)?;
            }
            if quadrants.contains(Quadrants::UPPER_LEFT) {
                bus.draw_pixel(x0 - x, y0 - y, color)?;
            }
            if quadrants.contains(Quadrants::LOWER_RIGHT) {
                bus.draw_pixel(x0 + x, y0 + y, color)?;
            }
            if quadrants.contains(Quadrants::LOWER_LEFT) {
                bus.draw_pixel(x0 - x, y0 + y, color)?;
            }
            Ok(())
        })
    }

    /// Fill the selected quadrants of an ellipse
    pub fn fill_ellipse(
        &mut self,
        x0: i32,
        y0: i32,
        rx: i32,
        ry: i32,
        color: Color,
        quadrants: Quadrants,
    ) -> DrawResult<S> {
        ellipse_walk(rx, ry, |x, y| {
            if quadrants.contains(Quadrants::UPPER_RIGHT) {
                self.draw_vline(x0 + x, y0 - y, y + 1, color)?;
            }
            if quadrants.contains(Quadrants::UPPER_LEFT) {
                self.draw_vline(x0 - x, y0 - y, y + 1, color)?;
            }
            if quadrants.contains(Quadrants::LOWER_RIGHT) {
                self.draw_vline(x0 + x, y0, y + 1, color)?;
            }
            if quadrants.contains(Quadrants::LOWER_LEFT) {
                self.draw_vline(x0 - x, y0, y + 1, color)?;
            }
            Ok(())
        })
    }

    /// Draw a triangle outline
    pub fn draw_triangle(
        &mut self,
        x0: i32,
        y0: i32,
        x1: i32,
        y1: i32,
        x2: i32,
        y2: i32,
        color: Color,
    ) -> DrawResult<S> {
        self.draw_line(x0, y0, x1, y1, color)?;
        self.draw_line(x1, y1, x2, y2, color)?;
        self.draw_line(x2, y2, x0, y0, color)
    }

    /// Fill a triangle with one horizontal run per scanline
    pub fn fill_triangle(
        &mut self,
        x0: i32,
        y0: i32,
        x1: i32,
        y1: i32,
        x2: i32,
        y2: i32,
        color: Color,
    ) -> DrawResult<S> {
        let mut v = [(x0, y0), (x1, y1), (x2, y2)];
        if v[0].1 > v[1].1 {
            v.swap(0, 1);
        }
        if v[1].1 > v[2].1 {
            v.swap(1, 2);
        }
        if v[0].1 > v[1].1 {
            v.swap(0, 1);
        }
        let [(x0, y0), (x1, y1), (x2, y2)] = v;

        if y0 == y2 {
            let a = x0.min(x1).min(x2);
            let b = x0.max(x1).max(x2);
            return self.draw_hline(a, y0, b - a + 1, color);
        }

        let (dx01, dy01) = (x1 - x0, y1 - y0);
        let (dx02, dy02) = (x2 - x0, y2 - y0);
        let (dx12, dy12) = (x2 - x1, y2 - y1);
        let mut sa = 0;
        let mut sb = 0;

        // A flat bottom takes the y1 scanline here so the lower pass is
        // empty; otherwise y1 belongs to the lower pass. Either way neither
        // pass divides by zero.
        let last = if y1 == y2 { y1 } else { y1 - 1 };

        let mut y = y0;
        while y <= last {
            let mut a = x0 + sa / dy01;
            let mut b = x0 + sb / dy02;
            sa += dx01;
            sb += dx02;
            if a > b {
                core::mem::swap(&mut a, &mut b);
            }
            self.draw_hline(a, y, b - a + 1, color)?;
            y += 1;
        }

        sa = dx12 * (y - y1);
        sb = dx02 * (y - y0);
        while y <= y2 {
            let mut a = x1 + sa / dy12;
            let mut b = x0 + sb / dy02;
            sa += dx12;
            sb += dx02;
            if a > b {
                core::mem::swap(&mut a, &mut b);
            }
            self.draw_hline(a, y, b - a + 1, color)?;
            y += 1;
        }
        Ok(())
    }

    /// Draw a regular polygon outline
    ///
    /// `sides` below 3 are raised to 3. `diameter` is the distance from the
    /// center to each vertex and `rotation` turns the shape in degrees.
    pub fn draw_polygon(
        &mut self,
        cx: i32,
        cy: i32,
        sides: u16,
        diameter: i32,
        color: Color,
        rotation: i32,
    ) -> DrawResult<S> {
        let sides = i32::from(sides.max(3));
        let step = 360 / sides;
        let radius = f64::from(diameter);
        let first = vertex(cx, cy, radius, rotation);
        let mut prev = first;
        for idx in 1..=sides {
            let next = if idx == sides {
                first
            } else {
                vertex(cx, cy, radius, idx * step + rotation)
            };
            self.draw_line(prev.0, prev.1, next.0, next.1, color)?;
            prev = next;
        }
        Ok(())
    }

    /// Fill a regular polygon as a triangle fan around its center
    pub fn fill_polygon(
        &mut self,
        cx: i32,
        cy: i32,
        sides: u16,
        diameter: i32,
        color: Color,
        rotation: i32,
    ) -> DrawResult<S> {
        self.draw_polygon(cx, cy, sides, diameter, color, rotation)?;

        let sides = i32::from(sides.max(3));
        let step = 360 / sides;
        let radius = f64::from(diameter);
        let first = vertex(cx, cy, radius, rotation);
        let mut prev = first;
        for idx in 1..=sides {
            let next = if idx == sides {
                first
            } else {
                vertex(cx, cy, radius, idx * step + rotation)
            };
            self.fill_triangle(cx, cy, prev.0, prev.1, next.0, next.1, color)?;
            prev = next;
        }
        Ok(())
    }

    /// Draw a five-pointed star outline
    ///
    /// Inner vertices sit at `diameter / factor` from the center; `factor`
    /// is clamped to `1.0..=4.0`.
    pub fn draw_star(&mut self, cx: i32, cy: i32, diameter: i32, color: Color, factor: f32) -> DrawResult<S> {
        let points = StarPoints::new(cx, cy, diameter, factor);
        for idx in 0..STAR_POINTS {
            let outer = points.outer(idx);
            if idx + 1 < STAR_POINTS {
                let inner_next = points.inner(idx + 1);
                let inner = points.inner(idx);
                self.draw_line(outer.0, outer.1, inner_next.0, inner_next.1, color)?;
                self.draw_line(inner.0, inner.1, outer.0, outer.1, color)?;
            } else {
                let inner = points.inner(idx);
                let inner_first = points.inner(0);
                self.draw_line(outer.0, outer.1, inner.0, inner.1, color)?;
                self.draw_line(inner_first.0, inner_first.1, outer.0, outer.1, color)?;
            }
        }
        Ok(())
    }

    /// Fill a five-pointed star, alternating inner and outer vertices per fan triangle
    pub fn fill_star(&mut self, cx: i32, cy: i32, diameter: i32, color: Color, factor: f32) -> DrawResult<S> {
        let points = StarPoints::new(cx, cy, diameter, factor);
        for idx in 0..STAR_POINTS {
            let outer = points.outer(idx);
            let inner = points.inner(idx);
            if idx + 1 < STAR_POINTS {
                let inner_next = points.inner(idx + 1);
                self.fill_triangle(cx, cy, inner.0, inner.1, outer.0, outer.1, color)?;
                self.fill_triangle(cx, cy, outer.0, outer.1, inner_next.0, inner_next.1, color)?;
            } else {
                let inner_first = points.inner(0);
                self.fill_triangle(cx, cy, inner_first.0, inner_first.1, outer.0, outer.1, color)?;
                self.fill_triangle(cx, cy, outer.0, outer.1, inner.0, inner.1, color)?;
            }
        }
        Ok(())
    }
}

const STAR_POINTS: i32 = 5;
const STAR_STEP: i32 = 360 / STAR_POINTS;

struct StarPoints {
    cx: i32,
    cy: i32,
    outer_radius: f64,
    inner_radius: f64,
}

impl StarPoints {
    fn new(cx: i32, cy: i32, diameter: i32, factor: f32) -> Self {
        let factor = factor.clamp(1.0, 4.0);
        Self {
            cx,
            cy,
            outer_radius: f64::from(diameter),
            inner_radius: f64::from(diameter as f32 / factor),
        }
    }

    fn outer(&self, idx: i32) -> (i32, i32) {
        vertex(self.cx, self.cy, self.outer_radius, idx * STAR_STEP + STAR_STEP)
    }

    fn inner(&self, idx: i32) -> (i32, i32) {
        vertex(self.cx, self.cy, self.inner_radius, idx * STAR_STEP + STAR_STEP / 2)
    }
}

/// Two-pass midpoint ellipse walk in doubled integer units
///
/// Calls `plot(x, y)` with quadrant-relative offsets for every step. The
/// first pass runs from `(rx, 0)` while the slope is shallower than -1, the
/// second from `(0, ry)` for the rest.
fn ellipse_walk<E>(rx: i32, ry: i32, mut plot: impl FnMut(i32, i32) -> Result<(), E>) -> Result<(), E> {
    // doubled squares of 16-bit radii exceed i32
    let (rx2, ry2) = (i64::from(rx) * i64::from(rx), i64::from(ry) * i64::from(ry));
    let (rxrx2, ryry2) = (2 * rx2, 2 * ry2);

    let mut x = rx;
    let mut y = 0;
    let mut xchg = (1 - 2 * i64::from(rx)) * ry2;
    let mut ychg = rx2;
    let mut err = 0i64;
    let mut stopx = ryry2 * i64::from(rx);
    let mut stopy = 0i64;

    while stopx >= stopy {
        plot(x, y)?;
        y += 1;
        stopy += rxrx2;
        err += ychg;
        ychg += rxrx2;
        if 2 * err + xchg > 0 {
            x -= 1;
            stopx -= ryry2;
            err += xchg;
            xchg += ryry2;
        }
    }

    x = 0;
    y = ry;
    xchg = ry2;
    ychg = (1 - 2 * i64::from(ry)) * rx2;
    err = 0;
    stopx = 0;
    stopy = rxrx2 * i64::from(ry);

    while stopx <= stopy {
        plot(x, y)?;
        x += 1;
        stopx += ryry2;
        err += xchg;
        xchg += ryry2;
        if 2 * err + ychg > 0 {
            y -= 1;
            stopy -= rxrx2;
            err += ychg;
            ychg += rxrx2;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{Write, renderer};
    use alloc::collections::BTreeSet;
    use alloc::vec::Vec;

    fn point_set(points: Vec<(i32, i32)>) -> BTreeSet<(i32, i32)> {
        points.into_iter().collect()
    }

    #[test]
    fn test_axis_aligned_lines_match_runs() {
        for (x0, y0, x1, y1) in [(5, 5, 5, 20), (5, 20, 5, 5), (3, 9, 40, 9), (40, 9, 3, 9), (7, 7, 7, 7)] {
            let mut line = renderer(100, 100);
            line.draw_line(x0, y0, x1, y1, Color::RED).unwrap();

            let mut run = renderer(100, 100);
            if x0 == x1 {
                run.draw_vline(x0, y0.min(y1), (y1 - y0).abs() + 1, Color::RED).unwrap();
            } else {
                run.draw_hline(x0.min(x1), y0, (x1 - x0).abs() + 1, Color::RED).unwrap();
            }
            assert_eq!(line.sink().pixels, run.sink().pixels);
            assert_eq!(line.sink().writes.len(), 1);
        }
    }

    #[test]
    fn test_line_covers_endpoints_and_coalesces() {
        let mut r = renderer(100, 100);
        r.draw_line(0, 0, 9, 2, Color::RED).unwrap();
        assert!(r.sink().is_set(0, 0));
        assert!(r.sink().is_set(9, 2));
        assert_eq!(r.sink().pixel_count(), 10);
        // three rows of runs rather than ten pixel writes
        assert_eq!(r.sink().writes.len(), 3);
        for x in 0..10 {
            let column: Vec<_> = (0..3).filter(|y| r.sink().is_set(x, *y)).collect();
            assert_eq!(column.len(), 1, "column {x}");
        }
    }

    #[test]
    fn test_steep_line_walks_rows() {
        let mut r = renderer(100, 100);
        r.draw_line(2, 0, 0, 9, Color::RED).unwrap();
        assert_eq!(r.sink().pixel_count(), 10);
        for y in 0..10 {
            let row: Vec<_> = (0..3).filter(|x| r.sink().is_set(*x, y)).collect();
            assert_eq!(row.len(), 1, "row {y}");
        }
        assert!(r.sink().is_set(2, 0));
        assert!(r.sink().is_set(0, 9));
    }

    #[test]
    fn test_diagonal_line_uses_pixels() {
        let mut r = renderer(100, 100);
        r.draw_line(0, 0, 4, 4, Color::RED).unwrap();
        assert_eq!(
            r.sink().writes.iter().filter(|w| matches!(w, Write::Pixel(..))).count(),
            5
        );
        for i in 0..5 {
            assert!(r.sink().is_set(i, i));
        }
    }

    #[test]
    fn test_circle_is_symmetric() {
        let mut r = renderer(101, 101);
        r.draw_circle(50, 50, 10, Color::RED).unwrap();
        let points = point_set(r.sink().points(Color::RED));
        for &(x, y) in &points {
            assert!(points.contains(&(100 - x, y)));
            assert!(points.contains(&(x, 100 - y)));
            // octant reflection about the diagonal through the center
            assert!(points.contains(&(y, x)));
        }
        assert_eq!(r.sink().depth, 0);
        assert_eq!(r.sink().acquisitions, 1);
    }

    #[test]
    fn test_circle_matches_rounded_radius() {
        for radius in [1, 4, 10, 23] {
            let mut r = renderer(120, 120);
            r.draw_circle(60, 60, radius, Color::RED).unwrap();
            for (x, y) in r.sink().points(Color::RED) {
                let (dx, dy) = (f64::from(x - 60), f64::from(y - 60));
                let dist = libm::round(libm::sqrt(dx * dx + dy * dy)) as i32;
                assert!((dist - radius).abs() <= 1, "({x},{y}) r={radius}");
            }
            // every octant angle is hit
            assert!(r.sink().is_set(60 + radius, 60));
            assert!(r.sink().is_set(60, 60 - radius));
        }
    }

    #[test]
    fn test_fill_circle_covers_disc() {
        let mut r = renderer(64, 64);
        r.fill_circle(30, 30, 8, Color::RED).unwrap();
        for (x, y) in r.sink().points(Color::RED) {
            let (dx, dy) = (x - 30, y - 30);
            assert!(dx * dx + dy * dy <= 9 * 9, "({x},{y}) outside");
        }
        for dy in -8..=8 {
            assert!(r.sink().is_set(30, 30 + dy));
        }
        for dx in -7..=7 {
            assert!(r.sink().is_set(30 + dx, 30), "center row {dx}");
        }
        // only vertical runs
        assert!(r.sink().writes.iter().all(|w| matches!(w, Write::Run { x1, x2, .. } if x1 == x2)));
    }

    #[test]
    fn test_fill_circle_outline_fits_inside_fill() {
        let mut outline = renderer(64, 64);
        outline.draw_circle(30, 30, 12, Color::RED).unwrap();
        let mut fill = renderer(64, 64);
        fill.fill_circle(30, 30, 12, Color::RED).unwrap();
        let filled = point_set(fill.sink().points(Color::RED));
        let missing = outline
            .sink()
            .points(Color::RED)
            .into_iter()
            .filter(|p| !filled.contains(p))
            .count();
        assert_eq!(missing, 0);
    }

    #[test]
    fn test_round_rect_outline_corners() {
        let mut r = renderer(64, 64);
        r.draw_round_rect(10, 10, 30, 20, 5, Color::RED).unwrap();
        assert!(r.sink().is_set(15, 10));
        assert!(r.sink().is_set(34, 10));
        assert!(r.sink().is_set(10, 15));
        assert!(r.sink().is_set(39, 24));
        // corners are cut
        assert!(!r.sink().is_set(10, 10));
        assert!(!r.sink().is_set(39, 29));
        let xs: BTreeSet<i32> = r.sink().points(Color::RED).iter().map(|p| p.0).collect();
        assert_eq!(xs.first(), Some(&10));
        assert_eq!(xs.last(), Some(&39));
    }

    #[test]
    fn test_fill_round_rect_stays_in_bounds() {
        let mut r = renderer(64, 64);
        r.fill_round_rect(10, 10, 30, 20, 5, Color::RED).unwrap();
        for (x, y) in r.sink().points(Color::RED) {
            assert!((10..40).contains(&x) && (10..30).contains(&y), "({x},{y})");
        }
        assert!(r.sink().is_set(25, 20));
        assert!(r.sink().is_set(10, 20));
        assert!(r.sink().is_set(39, 20));
        assert!(!r.sink().is_set(10, 10));
    }

    #[test]
    fn test_ellipse_quadrant_mask() {
        let mut r = renderer(100, 100);
        r.draw_ellipse(50, 50, 20, 10, Color::RED, Quadrants::UPPER_RIGHT).unwrap();
        for (x, y) in r.sink().points(Color::RED) {
            assert!(x >= 50 && y <= 50, "({x},{y})");
        }
        assert!(r.sink().is_set(70, 50));
        assert!(r.sink().is_set(50, 40));
    }

    #[test]
    fn test_ellipse_full_is_symmetric() {
        let mut r = renderer(101, 101);
        r.draw_ellipse(50, 50, 30, 12, Color::RED, Quadrants::ALL).unwrap();
        let points = point_set(r.sink().points(Color::RED));
        for &(x, y) in &points {
            assert!(points.contains(&(100 - x, y)));
            assert!(points.contains(&(x, 100 - y)));
        }
        assert!(points.contains(&(80, 50)));
        assert!(points.contains(&(50, 38)));
    }

    #[test]
    fn test_filled_ellipse_contains_outline() {
        let mut outline = renderer(101, 101);
        outline.draw_ellipse(50, 50, 25, 15, Color::RED, Quadrants::ALL).unwrap();
        let mut fill = renderer(101, 101);
        fill.fill_ellipse(50, 50, 25, 15, Color::RED, Quadrants::ALL).unwrap();
        let filled = point_set(fill.sink().points(Color::RED));
        for p in outline.sink().points(Color::RED) {
            assert!(filled.contains(&p), "{p:?}");
        }
        assert!(filled.contains(&(50, 50)));
    }

    #[test]
    fn test_large_ellipse_stays_exact() {
        let mut r = renderer(320, 240);
        r.draw_ellipse(160, 120, 1100, 1100, Color::RED, Quadrants::ALL).unwrap();
        // the whole curve lies off the panel
        assert!(r.sink().points(Color::RED).is_empty());

        let mut r = renderer(320, 240);
        r.draw_ellipse(-1000, 120, 1100, 30000, Color::RED, Quadrants::ALL).unwrap();
        let points = r.sink().points(Color::RED);
        assert!(!points.is_empty());
        assert!(points.iter().all(|&(x, _)| x >= 99), "{points:?}");

        let mut fill = renderer(320, 240);
        fill.fill_ellipse(160, 120, 2000, 1500, Color::RED, Quadrants::ALL).unwrap();
        assert_eq!(fill.sink().pixel_count(), 320 * 240);
    }

    /// Signed distance of `(px, py)` inside the triangle, measured to its
    /// nearest edge; negative outside
    fn inset(v: [(i32, i32); 3], px: i32, py: i32) -> f64 {
        let area = f64::from((v[1].0 - v[0].0) * (v[2].1 - v[0].1) - (v[1].1 - v[0].1) * (v[2].0 - v[0].0));
        let sign = if area < 0.0 { -1.0 } else { 1.0 };
        let mut nearest = f64::INFINITY;
        for k in 0..3 {
            let (ax, ay) = v[k];
            let (bx, by) = v[(k + 1) % 3];
            let cross = f64::from((bx - ax) * (py - ay) - (by - ay) * (px - ax));
            let len = libm::sqrt(f64::from((bx - ax) * (bx - ax) + (by - ay) * (by - ay)));
            nearest = nearest.min(cross * sign / len);
        }
        nearest
    }

    #[test]
    fn test_fill_triangle_hugs_edges() {
        let cases = [
            [(10, 10), (40, 10), (25, 30)], // flat top
            [(25, 5), (10, 30), (40, 30)],  // flat bottom
            [(12, 3), (45, 20), (5, 41)],   // general
            [(50, 50), (3, 7), (20, 44)],   // unsorted input
        ];
        for tri in cases {
            let mut r = renderer(64, 64);
            r.fill_triangle(tri[0].0, tri[0].1, tri[1].0, tri[1].1, tri[2].0, tri[2].1, Color::RED)
                .unwrap();
            let drawn = point_set(r.sink().points(Color::RED));
            // spans are truncated toward the first vertex, so edges are off
            // by less than a pixel either way
            for y in 0..64 {
                for x in 0..64 {
                    let d = inset(tri, x, y);
                    if drawn.contains(&(x, y)) {
                        assert!(d > -1.0, "{tri:?} ({x},{y}) drawn {d} outside");
                    } else {
                        assert!(d < 1.0, "{tri:?} ({x},{y}) missed {d} inside");
                    }
                }
            }
            for p in tri {
                assert!(drawn.contains(&p), "{tri:?} vertex {p:?}");
            }
            // one horizontal run per scanline
            assert!(r.sink().writes.iter().all(|w| match w {
                Write::Run { y1, y2, .. } => y1 == y2,
                Write::Pixel(..) => false,
            }));
        }
    }

    #[test]
    fn test_flat_triangle_is_one_run() {
        let mut r = renderer(64, 64);
        r.fill_triangle(10, 10, 30, 10, 20, 10, Color::RED).unwrap();
        assert_eq!(
            r.sink().writes,
            [Write::Run {
                x1: 10,
                y1: 10,
                x2: 30,
                y2: 10,
                color: Color::RED,
                count: 21,
            }]
        );
    }

    #[test]
    fn test_fill_triangle_includes_vertices() {
        let mut r = renderer(64, 64);
        r.fill_triangle(12, 3, 45, 20, 5, 41, Color::RED).unwrap();
        assert!(r.sink().is_set(12, 3));
        assert!(r.sink().is_set(45, 20));
        assert!(r.sink().is_set(5, 41));
    }

    #[test]
    fn test_polygon_vertex_placement() {
        assert_eq!(vertex(50, 50, 20.0, 0), (50, 30));
        assert_eq!(vertex(50, 50, 20.0, 90), (30, 50));
        assert_eq!(vertex(50, 50, 20.0, 180), (50, 70));
    }

    #[test]
    fn test_polygon_closes() {
        let mut r = renderer(100, 100);
        r.draw_polygon(50, 50, 4, 20, Color::RED, 0).unwrap();
        for deg in [0, 90, 180, 270] {
            let (x, y) = vertex(50, 50, 20.0, deg);
            assert!(r.sink().is_set(x, y), "vertex at {deg}");
        }
        assert!(!r.sink().is_set(50, 50));
    }

    #[test]
    fn test_polygon_minimum_three_sides() {
        let mut two = renderer(100, 100);
        two.draw_polygon(50, 50, 2, 20, Color::RED, 0).unwrap();
        let mut three = renderer(100, 100);
        three.draw_polygon(50, 50, 3, 20, Color::RED, 0).unwrap();
        assert_eq!(two.sink().pixels, three.sink().pixels);
    }

    #[test]
    fn test_fill_polygon_covers_center() {
        let mut r = renderer(100, 100);
        r.fill_polygon(50, 50, 6, 20, Color::RED, 15).unwrap();
        assert!(r.sink().is_set(50, 50));
        assert!(r.sink().is_set(45, 55));
        for (x, y) in r.sink().points(Color::RED) {
            let (dx, dy) = (x - 50, y - 50);
            assert!(dx * dx + dy * dy <= 21 * 21);
        }
    }

    #[test]
    fn test_star_factor_is_clamped() {
        let mut low = renderer(100, 100);
        low.draw_star(50, 50, 30, Color::RED, 0.2).unwrap();
        let mut one = renderer(100, 100);
        one.draw_star(50, 50, 30, Color::RED, 1.0).unwrap();
        assert_eq!(low.sink().pixels, one.sink().pixels);

        let mut high = renderer(100, 100);
        high.fill_star(50, 50, 30, Color::RED, 9.0).unwrap();
        let mut four = renderer(100, 100);
        four.fill_star(50, 50, 30, Color::RED, 4.0).unwrap();
        assert_eq!(high.sink().pixels, four.sink().pixels);
    }

    #[test]
    fn test_fill_star_points_and_center() {
        let mut r = renderer(100, 100);
        r.fill_star(50, 50, 30, Color::RED, 2.5).unwrap();
        assert!(r.sink().is_set(50, 50));
        let outline = StarPoints::new(50, 50, 30, 2.5);
        for idx in 0..STAR_POINTS {
            let (x, y) = outline.outer(idx);
            assert!(r.sink().is_set(x, y), "tip {idx}");
        }
    }

    #[test]
    fn test_line_by_angle_points_up_by_default() {
        let mut r = renderer(100, 100);
        r.draw_line_by_angle(50, 50, 0, 5, 10, Color::RED).unwrap();
        let points = r.sink().points(Color::RED);
        // endpoints are truncated, so the column may land one left of center
        let column = points[0].0;
        assert!(column == 49 || column == 50);
        assert!(points.iter().all(|p| p.0 == column));
        let ys: Vec<i32> = points.iter().map(|p| p.1).collect();
        assert_eq!(ys, (35..=45).collect::<Vec<_>>());
    }
}
