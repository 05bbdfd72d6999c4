//! Brush stamping and stroke continuation

use super::line::Line;
use crate::framebuffer::{FrameBuffer, CANVAS};
use crate::geometry::Point;
use crate::traits::{DisplayDriver, DisplayError, Shade};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Shape of the mark left in the framebuffer for one stroke point
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Brush {
    /// Just the target pixel
    Dot,
    /// Target pixel plus its four axis neighbours
    Plus,
}

const DOT: [(i32, i32); 1] = [(0, 0)];
const PLUS: [(i32, i32); 5] = [(0, 0), (1, 0), (-1, 0), (0, 1), (0, -1)];

impl Brush {
    /// Pixel offsets covered by the brush, relative to the target
    pub fn footprint(self) -> &'static [(i32, i32)] {
        match self {
            Brush::Dot => &DOT,
            Brush::Plus => &PLUS,
        }
    }
}

/// Pen settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PenConfig {
    /// Framebuffer mark
    pub brush: Brush,
    /// Radius of the on-screen feedback circle
    pub radius: u16,
}

impl PenConfig {
    /// Thick bitmap stroke, thin on-screen trace
    pub const PLUS: Self = Self {
        brush: Brush::Plus,
        radius: 1,
    };

    /// Single-pixel bitmap stroke, bold on-screen trace
    pub const DOT: Self = Self {
        brush: Brush::Dot,
        radius: 3,
    };
}

impl Default for PenConfig {
    fn default() -> Self {
        Self::PLUS
    }
}

/// Last stroke point and the input freeze latch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DrawCursor {
    last: Option<Point>,
    frozen: bool,
}

impl DrawCursor {
    pub const fn new() -> Self {
        Self {
            last: None,
            frozen: false,
        }
    }

    pub fn last(&self) -> Option<Point> {
        self.last
    }

    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    /// Suspend drawing and hit-testing
    pub fn freeze(&mut self) {
        self.frozen = true;
    }

    /// Resume input processing
    pub fn thaw(&mut self) {
        self.frozen = false;
    }

    /// Forget the last point so the next sample starts a new stroke
    pub fn end_stroke(&mut self) {
        self.last = None;
    }
}

/// Joins stroke samples into continuous lines
#[derive(Debug, Clone, Copy, Default)]
pub struct LineRasterizer {
    pen: PenConfig,
}

impl LineRasterizer {
    pub const fn new(pen: PenConfig) -> Self {
        Self { pen }
    }

    /// Continue the current stroke to `to`
    ///
    /// The first point of a stroke is stamped on its own; later points are
    /// joined to the previous one. The framebuffer is always fully updated;
    /// the first display error, if any, is returned afterwards.
    pub fn draw_to<D: DisplayDriver>(
        &self,
        cursor: &mut DrawCursor,
        canvas: &mut FrameBuffer,
        display: &mut D,
        to: Point,
    ) -> Result<(), DisplayError> {
        if cursor.frozen {
            return Ok(());
        }

        let mut feedback = Ok(());
        let from = cursor.last.unwrap_or(to);
        for point in Line::new(from, to) {
            let stamped = self.stamp(canvas, display, point);
            if feedback.is_ok() {
                feedback = stamped;
            }
        }

        cursor.last = Some(to);
        feedback
    }

    /// Stamp the brush at one point and echo it on the display
    ///
    /// Points off the canvas draw nothing. Brush pixels that fall off the
    /// canvas are dropped.
    pub fn stamp<D: DisplayDriver>(
        &self,
        canvas: &mut FrameBuffer,
        display: &mut D,
        at: Point,
    ) -> Result<(), DisplayError> {
        if !CANVAS.contains(at) {
            return Ok(());
        }

        for &(dx, dy) in self.pen.brush.footprint() {
            canvas.set_pixel(at.x + dx, at.y + dy, true);
        }

        display.fill_circle(at, self.pen.radius, Shade::Ink)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{DisplayCall, MockDisplay};

    #[test]
    fn test_first_point_is_single_stamp() {
        let raster = LineRasterizer::new(PenConfig::DOT);
        let mut cursor = DrawCursor::new();
        let mut canvas = FrameBuffer::new();
        let mut display = MockDisplay::new();

        raster
            .draw_to(&mut cursor, &mut canvas, &mut display, Point::new(10, 10))
            .unwrap();

        assert_eq!(canvas.ink_count(), 1);
        assert!(canvas.get_pixel(10, 10));
        assert_eq!(cursor.last(), Some(Point::new(10, 10)));
        assert_eq!(
            display.calls.as_slice(),
            &[DisplayCall::FillCircle(Point::new(10, 10), 3, Shade::Ink)]
        );
    }

    #[test]
    fn test_continuation_fills_gap() {
        let raster = LineRasterizer::new(PenConfig::DOT);
        let mut cursor = DrawCursor::new();
        let mut canvas = FrameBuffer::new();
        let mut display = MockDisplay::new();

        raster
            .draw_to(&mut cursor, &mut canvas, &mut display, Point::new(10, 10))
            .unwrap();
        raster
            .draw_to(&mut cursor, &mut canvas, &mut display, Point::new(20, 15))
            .unwrap();

        for p in Line::new(Point::new(10, 10), Point::new(20, 15)) {
            assert!(canvas.get_pixel(p.x, p.y));
        }
        assert_eq!(canvas.ink_count(), 11);
        assert_eq!(cursor.last(), Some(Point::new(20, 15)));
    }

    #[test]
    fn test_plus_brush_clipped_at_corner() {
        let raster = LineRasterizer::new(PenConfig::PLUS);
        let mut canvas = FrameBuffer::new();
        let mut display = MockDisplay::new();

        raster.stamp(&mut canvas, &mut display, Point::new(0, 0)).unwrap();

        assert!(canvas.get_pixel(0, 0));
        assert!(canvas.get_pixel(1, 0));
        assert!(canvas.get_pixel(0, 1));
        // (-1, 0) and (0, -1) are dropped, not wrapped
        assert_eq!(canvas.ink_count(), 3);
        assert!(!canvas.get_pixel(319, 0));
    }

    #[test]
    fn test_off_canvas_point_draws_nothing() {
        let raster = LineRasterizer::new(PenConfig::PLUS);
        let mut canvas = FrameBuffer::new();
        let mut display = MockDisplay::new();

        raster
            .stamp(&mut canvas, &mut display, Point::new(-1, 5))
            .unwrap();

        assert!(canvas.is_blank());
        assert!(display.calls.is_empty());
    }

    #[test]
    fn test_frozen_cursor_leaves_canvas() {
        let raster = LineRasterizer::default();
        let mut cursor = DrawCursor::new();
        let mut canvas = FrameBuffer::new();
        let mut display = MockDisplay::new();

        cursor.freeze();
        raster
            .draw_to(&mut cursor, &mut canvas, &mut display, Point::new(50, 50))
            .unwrap();

        assert!(canvas.is_blank());
        assert_eq!(cursor.last(), None);
    }

    #[test]
    fn test_display_error_does_not_stop_bitmap() {
        let raster = LineRasterizer::new(PenConfig::DOT);
        let mut cursor = DrawCursor::new();
        let mut canvas = FrameBuffer::new();
        let mut display = MockDisplay::failing();

        cursor.last = Some(Point::new(0, 0));
        let result = raster.draw_to(&mut cursor, &mut canvas, &mut display, Point::new(5, 0));

        assert_eq!(result, Err(DisplayError::Communication));
        assert_eq!(canvas.ink_count(), 6);
        assert_eq!(cursor.last(), Some(Point::new(5, 0)));
    }

    #[test]
    fn test_end_stroke_starts_fresh() {
        let raster = LineRasterizer::new(PenConfig::DOT);
        let mut cursor = DrawCursor::new();
        let mut canvas = FrameBuffer::new();
        let mut display = MockDisplay::new();

        raster
            .draw_to(&mut cursor, &mut canvas, &mut display, Point::new(10, 10))
            .unwrap();
        cursor.end_stroke();
        raster
            .draw_to(&mut cursor, &mut canvas, &mut display, Point::new(30, 10))
            .unwrap();

        // No line joins the two strokes
        assert_eq!(canvas.ink_count(), 2);
    }
}
