//! Display driver trait for the drawing panel

use crate::geometry::{Point, Rect};

/// Errors that can occur while drawing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError {
    /// Bus error talking to the panel
    Communication,
}

/// The two tones the UI uses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Shade {
    /// Strokes, outlines and text
    Ink,
    /// Background
    Paper,
}

/// Trait for the panel the user draws on
///
/// Coordinates are landscape screen pixels. Implementations clip anything
/// that falls off the panel.
pub trait DisplayDriver {
    /// Fill the entire screen
    fn clear(&mut self, shade: Shade) -> Result<(), DisplayError>;

    /// Fill a rectangle
    fn fill_rect(&mut self, area: Rect, shade: Shade) -> Result<(), DisplayError>;

    /// Draw a one pixel rectangle outline
    fn draw_rect(&mut self, area: Rect, shade: Shade) -> Result<(), DisplayError>;

    /// Draw text with its top-left corner at `origin`
    fn draw_text(
        &mut self,
        origin: Point,
        text: &str,
        fg: Shade,
        bg: Shade,
    ) -> Result<(), DisplayError>;

    /// Fill a circle
    fn fill_circle(&mut self, center: Point, radius: u16, shade: Shade)
        -> Result<(), DisplayError>;

    /// Set a single pixel
    fn set_pixel(&mut self, at: Point, shade: Shade) -> Result<(), DisplayError>;

    /// Push buffered content to the panel
    fn flush(&mut self) -> Result<(), DisplayError> {
        Ok(())
    }
}

/// Glyph cell width assumed when centering labels
pub const GLYPH_WIDTH: i32 = 8;

/// Glyph cell height assumed when centering labels
pub const GLYPH_HEIGHT: i32 = 8;

/// Helper trait for drawing common UI elements
pub trait DisplayExt: DisplayDriver {
    /// Draw a bordered button with a centered label
    fn draw_button(&mut self, area: Rect, label: &str) -> Result<(), DisplayError> {
        self.fill_rect(area, Shade::Paper)?;
        self.draw_rect(area, Shade::Ink)?;

        let text_width = label.len() as i32 * GLYPH_WIDTH;
        let origin = Point::new(
            area.x + (area.width as i32 - text_width).max(0) / 2,
            area.y + (area.height as i32 - GLYPH_HEIGHT).max(0) / 2,
        );
        self.draw_text(origin, label, Shade::Ink, Shade::Paper)
    }

    /// Draw an empty framed box
    fn draw_frame(&mut self, area: Rect) -> Result<(), DisplayError> {
        self.fill_rect(area, Shade::Paper)?;
        self.draw_rect(area, Shade::Ink)
    }
}

// Blanket implementation for all DisplayDriver types
impl<T: DisplayDriver> DisplayExt for T {}
