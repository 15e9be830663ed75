//! Ring and arc fill
//!
//! An arc is the part of the ring `inner² <= x² + y² < outer²` between two
//! angles. Angles are given in units of
//! [`RenderState::arc_angle_max`](crate::RenderState) per full turn and
//! shifted by the angle offset, so with the defaults 0 points up and angles
//! grow clockwise.
//!
//! The fill scans the bounding box column by column. A column through a ring
//! holds at most two runs; once the upper run is known the lower run is
//! assumed to be the same length and only its far end is tested, falling
//! back to a row-by-row search when that test misses.

use crate::color::Color;
use crate::interface::PixelSink;
use crate::renderer::{DrawResult, Renderer};

const DEG_TO_RAD: f64 = 0.017_453_292_52;

/// Slope used for an end angle of exactly 360 degrees
const FULL_TURN_SLOPE: f32 = -1_000_000.0;

/// Bring an angle in degrees into `0..=360`
///
/// Positive multiples of a full turn map to 360, not 0, so an arc ending on
/// a full turn stays non-wrapping.
fn normalize_degrees(angle: f32) -> Option<f32> {
    if !angle.is_finite() {
        return None;
    }
    let mut angle = angle;
    if angle < 0.0 {
        angle %= 360.0;
        if angle < 0.0 {
            angle += 360.0;
        }
    } else if angle > 360.0 {
        angle %= 360.0;
        if angle == 0.0 {
            angle = 360.0;
        }
    }
    Some(angle)
}

/// Non-wrapping arc pieces for a request, in normalized degrees
fn degree_ranges(start: f32, end: f32, angle_max: f32, offset: f32) -> [Option<(f32, f32)>; 2] {
    if angle_max.is_nan() || angle_max <= 0.0 {
        return [None, None];
    }
    let span = end - start;
    let to_degrees = |v: f32| (v / angle_max) * 360.0 + offset;
    let (Some(start), Some(end)) = (
        normalize_degrees(to_degrees(start)),
        normalize_degrees(to_degrees(end)),
    ) else {
        return [None, None];
    };

    if span >= angle_max {
        [Some((0.0, 360.0)), None]
    } else if start > end {
        [Some((start, 360.0)), Some((0.0, end))]
    } else {
        [Some((start, end)), None]
    }
}

fn trig(degrees: f32) -> (f32, f32) {
    let rad = f64::from(degrees) * DEG_TO_RAD;
    (libm::cos(rad) as f32, libm::sin(rad) as f32)
}

/// Point membership for one non-wrapping arc
struct ArcShape {
    start: f32,
    end: f32,
    start_slope: f32,
    end_slope: f32,
    inner2: i32,
    outer2: i32,
}

impl ArcShape {
    fn new(start: f32, end: f32, radius: i32, thickness: i32) -> Self {
        let (cos_start, sin_start) = trig(start);
        let (cos_end, sin_end) = trig(end);
        let inner = radius - thickness;
        Self {
            start,
            end,
            start_slope: cos_start / sin_start,
            end_slope: if end == 360.0 {
                FULL_TURN_SLOPE
            } else {
                cos_end / sin_end
            },
            inner2: inner * inner,
            outer2: radius * radius,
        }
    }

    fn contains(&self, x: i32, y: i32) -> bool {
        let d2 = x * x + y * y;
        if d2 >= self.outer2 || d2 < self.inner2 {
            return false;
        }
        let (fx, fy) = (x as f32, y as f32);

        let after_start = (y > 0 && self.start < 180.0 && fx <= fy * self.start_slope)
            || (y < 0 && self.start > 180.0 && fx >= fy * self.start_slope)
            || (y < 0 && self.start <= 180.0)
            || (y == 0 && self.start <= 180.0 && x < 0)
            || (y == 0 && self.start == 0.0 && x > 0);

        let before_end = (y > 0 && self.end < 180.0 && fx >= fy * self.end_slope)
            || (y < 0 && self.end > 180.0 && fx <= fy * self.end_slope)
            || (y > 0 && self.end >= 180.0)
            || (y == 0 && self.end >= 180.0 && x < 0)
            || (y == 0 && self.start == 0.0 && x > 0);

        after_start && before_end
    }
}

/// Running state of a column scan
#[derive(Default)]
struct ColumnScan {
    upper_started: bool,
    upper_ended: bool,
    lower_started: bool,
    lower_searching: bool,
    upper_start: i32,
    upper_end: i32,
    lower_start: i32,
}

impl<S> Renderer<'_, S>
where
    S: PixelSink,
{
    /// Fill the ring section between `start` and `end`
    ///
    /// `radius` is the outer radius and `thickness` how far the ring reaches
    /// inward from it. A range that wraps past the full turn is drawn as two
    /// pieces; a range spanning a full turn or more draws the whole ring.
    pub fn draw_arc(
        &mut self,
        cx: i32,
        cy: i32,
        radius: i32,
        thickness: i32,
        start: f32,
        end: f32,
        color: Color,
    ) -> DrawResult<S> {
        let ranges = degree_ranges(start, end, self.state.arc_angle_max, self.state.angle_offset);
        for (start, end) in ranges.into_iter().flatten() {
            let mut bus = self.bus();
            bus.fill_arc_degrees(cx, cy, radius, thickness, start, end, color)?;
        }
        Ok(())
    }

    fn fill_arc_degrees(
        &mut self,
        cx: i32,
        cy: i32,
        radius: i32,
        thickness: i32,
        start: f32,
        end: f32,
        color: Color,
    ) -> DrawResult<S> {
        let (cos_start, sin_start) = trig(start);
        let (cos_end, sin_end) = trig(end);

        let (mut xmin, mut xmax) = (i32::MAX, i32::MIN);
        let (mut ymin, mut ymax) = (i32::MAX, i32::MIN);
        for r in [radius as f32, (radius - thickness) as f32] {
            for (cos, sin) in [(cos_start, sin_start), (cos_end, sin_end)] {
                let (px, py) = ((r * cos) as i32, (r * sin) as i32);
                xmin = xmin.min(px);
                xmax = xmax.max(px);
                ymin = ymin.min(py);
                ymax = ymax.max(py);
            }
        }

        // widen the box where the range crosses an axis
        if start < 90.0 && end > 90.0 {
            ymax = radius;
        }
        if start < 180.0 && end > 180.0 {
            xmin = -radius;
        }
        if start < 270.0 && end > 270.0 {
            ymin = -radius;
        }

        let shape = ArcShape::new(start, end, radius, thickness);

        for x in xmin..=xmax {
            self.scan_arc_column(&shape, cx, cy, x, ymin, ymax, color)?;
        }
        Ok(())
    }

    fn scan_arc_column(
        &mut self,
        shape: &ArcShape,
        cx: i32,
        cy: i32,
        x: i32,
        ymin: i32,
        ymax: i32,
        color: Color,
    ) -> DrawResult<S> {
        let mut scan = ColumnScan::default();
        let mut y = ymin;

        while y <= ymax {
            if shape.contains(x, y) {
                if !scan.upper_started {
                    scan.upper_started = true;
                    scan.upper_start = y;
                } else if scan.upper_ended && !scan.lower_started {
                    scan.lower_started = true;
                    scan.lower_start = y;
                    // check where a run as long as the upper one would end
                    y += scan.upper_end - scan.upper_start - 1;
                    if y > ymax - 1 {
                        y = scan.lower_start;
                        scan.lower_searching = true;
                    }
                } else if scan.lower_started && !scan.lower_searching {
                    scan.lower_searching = true;
                }
            } else if scan.upper_started && !scan.upper_ended {
                scan.upper_ended = true;
                scan.upper_end = y - 1;
                self.draw_vline(cx + x, cy + scan.upper_start, y - scan.upper_start, color)?;
                if y < 0 {
                    // jump over the hole in the middle of the ring
                    y = y.abs();
                } else {
                    break;
                }
            } else if scan.lower_started {
                if scan.lower_searching {
                    self.draw_vline(cx + x, cy + scan.lower_start, y - scan.lower_start, color)?;
                    scan.lower_searching = false;
                    break;
                }
                // far end missed, the lower run is shorter
                y = scan.lower_start;
                scan.lower_searching = true;
            }
            y += 1;
        }

        if scan.upper_started && !scan.upper_ended {
            self.draw_vline(cx + x, cy + scan.upper_start, ymax - scan.upper_start + 1, color)?;
        } else if scan.lower_started && scan.lower_searching {
            self.draw_vline(cx + x, cy + scan.lower_start, ymax - scan.lower_start + 1, color)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::renderer;
    use alloc::collections::BTreeSet;

    fn ring(cx: i32, cy: i32, radius: i32, thickness: i32) -> BTreeSet<(i32, i32)> {
        let inner = radius - thickness;
        let mut set = BTreeSet::new();
        for y in -radius..=radius {
            for x in -radius..=radius {
                let d2 = x * x + y * y;
                if d2 < radius * radius && d2 >= inner * inner {
                    set.insert((cx + x, cy + y));
                }
            }
        }
        set
    }

    #[test]
    fn test_normalize_degrees() {
        assert_eq!(normalize_degrees(-90.0), Some(270.0));
        assert_eq!(normalize_degrees(-360.0), Some(0.0));
        assert_eq!(normalize_degrees(360.0), Some(360.0));
        assert_eq!(normalize_degrees(720.0), Some(360.0));
        assert_eq!(normalize_degrees(450.0), Some(90.0));
        assert_eq!(normalize_degrees(f32::NAN), None);
        assert_eq!(normalize_degrees(f32::INFINITY), None);
    }

    #[test]
    fn test_wrapping_range_splits_once() {
        // offset applied a single time to both pieces
        assert_eq!(
            degree_ranges(0.0, 180.0, 360.0, -90.0),
            [Some((270.0, 360.0)), Some((0.0, 90.0))]
        );
        assert_eq!(degree_ranges(10.0, 20.0, 360.0, 0.0), [Some((10.0, 20.0)), None]);
        assert_eq!(degree_ranges(0.0, 100.0, 100.0, -90.0), [Some((0.0, 360.0)), None]);
        assert_eq!(degree_ranges(0.0, 90.0, 0.0, 0.0), [None, None]);
    }

    #[test]
    fn test_full_ring_matches_reference() {
        for (radius, thickness) in [(20, 5), (31, 10), (12, 10), (40, 3)] {
            let mut r = renderer(100, 100);
            r.draw_arc(50, 50, radius, thickness, 0.0, 360.0, Color::RED).unwrap();
            let drawn: BTreeSet<_> = r.sink().points(Color::RED).into_iter().collect();
            assert_eq!(drawn, ring(50, 50, radius, thickness), "r={radius} t={thickness}");
            assert_eq!(r.sink().depth, 0);
        }
    }

    /// Every point of the box around the ring that the arc pieces contain
    fn brute_force_arc(cx: i32, cy: i32, radius: i32, thickness: i32, start: f32, end: f32) -> BTreeSet<(i32, i32)> {
        let mut set = BTreeSet::new();
        for (start, end) in degree_ranges(start, end, 360.0, -90.0).into_iter().flatten() {
            let shape = ArcShape::new(start, end, radius, thickness);
            for y in -radius..=radius {
                for x in -radius..=radius {
                    if shape.contains(x, y) {
                        set.insert((cx + x, cy + y));
                    }
                }
            }
        }
        set
    }

    #[test]
    fn test_partial_arcs_match_brute_force() {
        let cases = [
            (30, 8, 10.0, 200.0),
            (30, 8, 100.0, 300.0),
            (30, 8, 200.0, 340.0),
            // long ranges where a lower run ends early
            (30, 8, 120.0, 75.0),
            (30, 8, 135.0, 60.0),
            (30, 8, 135.0, 120.0),
            (20, 5, 150.0, 45.0),
        ];
        for (radius, thickness, start, end) in cases {
            let mut r = renderer(100, 100);
            r.draw_arc(50, 50, radius, thickness, start, end, Color::RED).unwrap();
            let drawn: BTreeSet<_> = r.sink().points(Color::RED).into_iter().collect();
            assert_eq!(
                drawn,
                brute_force_arc(50, 50, radius, thickness, start, end),
                "r={radius} t={thickness} {start}..{end}"
            );
        }
    }

    #[test]
    fn test_quarter_stays_in_its_quadrant() {
        let mut r = renderer(100, 100);
        // 0 up, clockwise: 0..90 is the upper right quarter
        r.draw_arc(50, 50, 30, 8, 0.0, 90.0, Color::RED).unwrap();
        let drawn = r.sink().points(Color::RED);
        assert!(!drawn.is_empty());
        for &(x, y) in &drawn {
            assert!(x >= 50 && y <= 50, "({x},{y})");
        }
        let reference = ring(50, 50, 30, 8);
        assert!(drawn.iter().all(|p| reference.contains(p)));
        assert!(r.sink().is_set(70, 30));
    }

    #[test]
    fn test_wrapping_arc_covers_both_pieces() {
        let mut r = renderer(100, 100);
        // 270 through 0 to 90: the upper half
        r.draw_arc(50, 50, 30, 8, 270.0, 90.0, Color::RED).unwrap();
        assert!(r.sink().is_set(50, 24));
        assert!(r.sink().is_set(25, 45));
        assert!(r.sink().is_set(75, 45));
        assert!(!r.sink().is_set(50, 76));
        // one bus hold per piece
        assert_eq!(r.sink().acquisitions, 2);
    }

    #[test]
    fn test_arc_params_rescale_angles() {
        let mut degrees = renderer(100, 100);
        degrees.draw_arc(50, 50, 30, 8, 45.0, 200.0, Color::RED).unwrap();

        let mut percent = renderer(100, 100);
        percent.set_arc_params(100.0);
        percent.draw_arc(50, 50, 30, 8, 12.5, 55.555_557, Color::RED).unwrap();

        let a: BTreeSet<_> = degrees.sink().points(Color::RED).into_iter().collect();
        let b: BTreeSet<_> = percent.sink().points(Color::RED).into_iter().collect();
        let diff = a.symmetric_difference(&b).count();
        assert!(diff <= a.len() / 20, "{diff} of {}", a.len());
    }
}
