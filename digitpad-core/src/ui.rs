//! Static screen layout

use core::fmt::Write;

use heapless::String;

use crate::config::CaptureConfig;
use crate::geometry::Point;
use crate::touch::DrawBound;
use crate::traits::{DisplayDriver, DisplayError, DisplayExt, Shade};

/// Where the title line starts
pub const TITLE_ORIGIN: Point = Point::new(10, 10);

/// Where the instruction line starts
pub const HINT_ORIGIN: Point = Point::new(10, 30);

/// Clear the panel and draw the buttons, drawing window and prompts
pub fn draw_ui<D: DisplayDriver>(display: &mut D, config: &CaptureConfig) -> Result<(), DisplayError> {
    display.clear(Shade::Paper)?;

    for button in &config.buttons {
        display.draw_button(button.area, &button.label)?;
    }

    if let DrawBound::Window(window) = config.draw_bound {
        display.draw_frame(window)?;
    }

    display.draw_text(TITLE_ORIGIN, "Draw Digit", Shade::Ink, Shade::Paper)?;

    if let Some(label) = config.send_label() {
        let mut hint: String<32> = String::new();
        // Labels are short enough that this cannot overflow
        let _ = write!(hint, "Press {} when done", label);
        display.draw_text(HINT_ORIGIN, &hint, Shade::Ink, Shade::Paper)?;
    }

    display.flush()
}
