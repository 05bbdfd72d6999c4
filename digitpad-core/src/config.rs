//! Capture configuration
//!
//! Everything that differs between deployments of the pad: where strokes
//! are accepted, how they are inked, which region is sampled, the buttons
//! and the link settings. The `toml` feature parses it from a document on
//! the host; the firmware build bakes the result into the image.

use heapless::{String, Vec};

use crate::extract::RegionExtractor;
use crate::framebuffer::CANVAS;
use crate::geometry::Rect;
use crate::raster::PenConfig;
use crate::touch::{Action, DrawBound, TouchArea, MAX_TOUCH_AREAS};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Maximum button label length
pub const MAX_LABEL_LEN: usize = 8;

/// Configuration problems
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// More buttons than the touch registry holds
    TooManyTouchAreas,
    /// Drawing window or button not fully on the canvas
    OutsideCanvas,
    /// Zero-sized drawing window or button
    EmptyArea,
    /// Bounding-box margin too wide for a region on the canvas
    MarginTooLarge,
    /// Baud rate of zero
    InvalidBaudrate,
    /// TOML syntax or schema error
    Parse,
}

/// A UI button
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ButtonConfig {
    pub action: Action,
    pub area: Rect,
    pub label: String<MAX_LABEL_LEN>,
}

impl ButtonConfig {
    pub fn new(action: Action, area: Rect, label: &str) -> Self {
        let mut text = String::new();
        for ch in label.chars() {
            if text.push(ch).is_err() {
                break;
            }
        }
        Self {
            action,
            area,
            label: text,
        }
    }

    pub fn touch_area(&self) -> TouchArea {
        TouchArea::new(self.area, self.action)
    }
}

/// Serial link settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LinkConfig {
    /// Baud rate (8N1 framing is fixed)
    pub baudrate: u32,
    /// Upper bound on one frame write
    pub write_timeout_ms: u32,
}

impl Default for LinkConfig {
    fn default() -> Self {
        Self {
            baudrate: 9600,
            write_timeout_ms: 500,
        }
    }
}

/// Complete pad configuration
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CaptureConfig {
    /// Where strokes are accepted
    pub draw_bound: DrawBound,
    /// Brush and feedback radius
    pub pen: PenConfig,
    /// Sampling strategy
    pub extractor: RegionExtractor,
    /// Buttons in hit-test priority order
    pub buttons: Vec<ButtonConfig, MAX_TOUCH_AREAS>,
    /// Serial link
    pub link: LinkConfig,
}

/// Drawing window of the windowed layout
pub const DRAW_WINDOW: Rect = Rect::square(140, 100, RegionExtractor::WINDOW_SIDE);

impl Default for CaptureConfig {
    /// Small drawing window sampled one-to-one, large SEND button
    fn default() -> Self {
        let mut buttons = Vec::new();
        let _ = buttons.push(ButtonConfig::new(
            Action::Send,
            Rect::square(248, 176, 64),
            "SEND",
        ));

        Self {
            draw_bound: DrawBound::Window(DRAW_WINDOW),
            pen: PenConfig::PLUS,
            extractor: RegionExtractor::fixed_window(DRAW_WINDOW.origin()),
            buttons,
            link: LinkConfig::default(),
        }
    }
}

impl CaptureConfig {
    /// Whole-canvas drawing, boxed and scaled on send
    pub fn freehand() -> Self {
        let mut buttons = Vec::new();
        let _ = buttons.push(ButtonConfig::new(
            Action::Send,
            Rect::square(280, 208, 32),
            "SAVE",
        ));

        Self {
            draw_bound: DrawBound::Canvas,
            pen: PenConfig::DOT,
            extractor: RegionExtractor::bounding_box(),
            buttons,
            link: LinkConfig::default(),
        }
    }

    /// Check geometry and link settings
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let DrawBound::Window(window) = self.draw_bound {
            check_area(&window)?;
        }
        for button in &self.buttons {
            check_area(&button.area)?;
        }
        if let RegionExtractor::BoundingBoxScaled { margin } = self.extractor {
            if margin > RegionExtractor::MAX_MARGIN {
                return Err(ConfigError::MarginTooLarge);
            }
        }
        if self.link.baudrate == 0 {
            return Err(ConfigError::InvalidBaudrate);
        }
        Ok(())
    }

    /// Label of the first Send button, used in the on-screen prompt
    pub fn send_label(&self) -> Option<&str> {
        self.buttons
            .iter()
            .find(|b| b.action == Action::Send)
            .map(|b| b.label.as_str())
    }

    /// Parse and validate a TOML document
    ///
    /// Missing sections fall back to [`CaptureConfig::default`].
    #[cfg(feature = "toml")]
    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text).map_err(|_| ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }
}

fn check_area(area: &Rect) -> Result<(), ConfigError> {
    if area.width == 0 || area.height == 0 {
        return Err(ConfigError::EmptyArea);
    }
    if !area.is_within(&CANVAS) {
        return Err(ConfigError::OutsideCanvas);
    }
    Ok(())
}
