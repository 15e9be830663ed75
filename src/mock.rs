//! Recording pixel sink for unit tests

use alloc::collections::BTreeMap;
use alloc::vec::Vec;

use crate::color::Color;
use crate::config::{Builder, Dimensions, Orientation};
use crate::interface::PixelSink;
use crate::renderer::Renderer;

/// One call made against the sink
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Write {
    Pixel(u16, u16, Color),
    Run {
        x1: u16,
        y1: u16,
        x2: u16,
        y2: u16,
        color: Color,
        count: u32,
    },
}

#[derive(Debug)]
pub struct MockError;

/// Sink that remembers every write and the resulting surface contents
#[derive(Debug, Default)]
pub struct RecordingSink {
    pub writes: Vec<Write>,
    pub pixels: BTreeMap<(i32, i32), Color>,
    pub depth: u32,
    pub max_depth: u32,
    pub acquisitions: u32,
    /// Writes made while no bus hold was active
    pub unheld: usize,
    pub fail_after: Option<usize>,
    pub orientation: Option<Orientation>,
    pub inverted: Option<bool>,
}

impl RecordingSink {
    pub fn pixel_count(&self) -> usize {
        self.pixels.len()
    }

    pub fn is_set(&self, x: i32, y: i32) -> bool {
        self.pixels.contains_key(&(x, y))
    }

    pub fn color_at(&self, x: i32, y: i32) -> Option<Color> {
        self.pixels.get(&(x, y)).copied()
    }

    /// Points painted with `color`
    pub fn points(&self, color: Color) -> Vec<(i32, i32)> {
        self.pixels
            .iter()
            .filter(|(_, c)| **c == color)
            .map(|(p, _)| *p)
            .collect()
    }

    pub fn clear(&mut self) {
        self.writes.clear();
        self.pixels.clear();
    }

    fn count_unheld(&mut self) {
        if self.depth == 0 {
            self.unheld += 1;
        }
    }

    fn check_fail(&mut self) -> Result<(), MockError> {
        if let Some(n) = self.fail_after {
            if self.writes.len() >= n {
                return Err(MockError);
            }
        }
        Ok(())
    }
}

impl PixelSink for RecordingSink {
    type Error = MockError;

    fn write_pixel(&mut self, x: u16, y: u16, color: Color) -> Result<(), Self::Error> {
        self.check_fail()?;
        self.count_unheld();
        self.writes.push(Write::Pixel(x, y, color));
        self.pixels.insert((i32::from(x), i32::from(y)), color);
        Ok(())
    }

    fn read_pixel(&mut self, x: u16, y: u16) -> Result<Color, Self::Error> {
        Ok(self
            .color_at(i32::from(x), i32::from(y))
            .unwrap_or(Color::BLACK))
    }

    fn write_run(
        &mut self,
        x1: u16,
        y1: u16,
        x2: u16,
        y2: u16,
        color: Color,
        count: u32,
    ) -> Result<(), Self::Error> {
        self.check_fail()?;
        assert!(x1 <= x2 && y1 <= y2, "inverted run {x1},{y1}-{x2},{y2}");
        let area = (u32::from(x2 - x1) + 1) * (u32::from(y2 - y1) + 1);
        assert_eq!(area, count, "run count does not match its rectangle");
        self.count_unheld();
        self.writes.push(Write::Run {
            x1,
            y1,
            x2,
            y2,
            color,
            count,
        });
        for y in y1..=y2 {
            for x in x1..=x2 {
                self.pixels.insert((i32::from(x), i32::from(y)), color);
            }
        }
        Ok(())
    }

    fn acquire_bus(&mut self) {
        self.depth += 1;
        self.max_depth = self.max_depth.max(self.depth);
        self.acquisitions += 1;
    }

    fn release_bus(&mut self) {
        assert!(self.depth > 0, "bus released without acquisition");
        self.depth -= 1;
    }

    fn set_orientation(&mut self, orientation: Orientation) -> Result<(), Self::Error> {
        self.orientation = Some(orientation);
        Ok(())
    }

    fn set_inverted(&mut self, inverted: bool) -> Result<(), Self::Error> {
        self.inverted = Some(inverted);
        Ok(())
    }
}

/// Portrait renderer over a recording sink with default colors
pub fn renderer(width: u16, height: u16) -> Renderer<'static, RecordingSink> {
    let config = Builder::new()
        .dimensions(Dimensions::new(width, height).unwrap())
        .build()
        .unwrap();
    Renderer::new(RecordingSink::default(), config)
}
