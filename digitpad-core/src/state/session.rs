//! The capture session context

use digitpad_hal::{OutputPin, UartTx};

use super::events::TouchEvent;
use crate::config::{CaptureConfig, ConfigError};
use crate::extract::ExtractError;
use crate::framebuffer::FrameBuffer;
use crate::geometry::{Point, Rect};
use crate::link::{LinkError, SampleLink, TransmitReport};
use crate::raster::{DrawCursor, LineRasterizer};
use crate::touch::{Action, Route, TouchRouter};
use crate::traits::{DisplayDriver, DisplayError, Shade};
use crate::ui;

/// Result of a save action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SaveOutcome<E> {
    /// Sample written; canvas and UI were reset
    Sent {
        /// Canvas region the sample was taken from
        region: Rect,
        report: TransmitReport,
    },
    /// Nothing to box on the canvas; nothing was sent
    NoDrawing,
    /// The link failed; the canvas is kept for another attempt
    LinkFailed(LinkError<E>),
}

/// What handling one event did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Outcome<E> {
    /// Input is frozen; the event was discarded
    Frozen,
    /// Not on a button and outside the drawing bound
    OutOfBounds(Point),
    /// Stroke continued to this point
    Drew(Point),
    /// Pen lifted
    StrokeEnded,
    /// A send button ran the save action
    Saved(SaveOutcome<E>),
    /// A clear button wiped the canvas
    Cleared,
    /// Still on a button pressed earlier; waits for the pen to lift
    ButtonHeld,
}

/// Canvas, cursor and touch registry for one capture pad
pub struct CaptureSession {
    config: CaptureConfig,
    router: TouchRouter,
    raster: LineRasterizer,
    cursor: DrawCursor,
    canvas: FrameBuffer,
    /// A button fired and the pen has not lifted since
    button_held: bool,
}

impl CaptureSession {
    /// Validate the configuration and register its buttons
    pub fn new(config: CaptureConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let mut router = TouchRouter::new(config.draw_bound);
        for button in &config.buttons {
            router.register(button.touch_area())?;
        }

        Ok(Self {
            raster: LineRasterizer::new(config.pen),
            router,
            cursor: DrawCursor::new(),
            canvas: FrameBuffer::new(),
            button_held: false,
            config,
        })
    }

    /// Draw the initial screen
    pub fn build_ui<D: DisplayDriver>(&self, display: &mut D) -> Result<(), DisplayError> {
        ui::draw_ui(display, &self.config)
    }

    /// Process one input event
    ///
    /// Display failures are returned after the canvas has been updated.
    /// Link failures never escape; they are reported in the outcome.
    /// A button fires once per press: further touches on buttons are
    /// ignored until the next release.
    pub fn handle<D, U>(
        &mut self,
        event: TouchEvent,
        display: &mut D,
        link: &mut SampleLink<U>,
    ) -> Result<Outcome<U::Error>, DisplayError>
    where
        D: DisplayDriver,
        U: UartTx,
    {
        let (x, y) = match event {
            TouchEvent::Release => {
                self.button_held = false;
                self.cursor.end_stroke();
                return Ok(Outcome::StrokeEnded);
            }
            TouchEvent::Touch { x, y } => (x, y),
        };

        match self.router.route(x, y, self.cursor.is_frozen()) {
            Route::Frozen => Ok(Outcome::Frozen),
            Route::OutOfBounds(p) => Ok(Outcome::OutOfBounds(p)),
            Route::Draw(p) => {
                self.raster
                    .draw_to(&mut self.cursor, &mut self.canvas, display, p)?;
                Ok(Outcome::Drew(p))
            }
            Route::Action(_) if self.button_held => Ok(Outcome::ButtonHeld),
            Route::Action(action) => {
                self.button_held = true;
                match action {
                    Action::Send => Ok(Outcome::Saved(self.save(display, link)?)),
                    Action::Clear => {
                        self.reset_canvas(display)?;
                        Ok(Outcome::Cleared)
                    }
                }
            }
        }
    }

    /// Extract the drawing, transmit it and reset on success
    ///
    /// Input stays frozen for the whole action and is released on every
    /// exit path.
    pub fn save<D, U>(
        &mut self,
        display: &mut D,
        link: &mut SampleLink<U>,
    ) -> Result<SaveOutcome<U::Error>, DisplayError>
    where
        D: DisplayDriver,
        U: UartTx,
    {
        self.cursor.freeze();
        let result = self.extract_and_send(display, link);
        self.cursor.thaw();
        result
    }

    fn extract_and_send<D, U>(
        &mut self,
        display: &mut D,
        link: &mut SampleLink<U>,
    ) -> Result<SaveOutcome<U::Error>, DisplayError>
    where
        D: DisplayDriver,
        U: UartTx,
    {
        self.cursor.end_stroke();

        let extraction = match self.config.extractor.extract(&self.canvas) {
            Ok(extraction) => extraction,
            Err(ExtractError::NoDrawingFound) => return Ok(SaveOutcome::NoDrawing),
        };

        match link.send_sample(&extraction.sample) {
            Ok(report) => {
                self.reset_canvas(display)?;
                Ok(SaveOutcome::Sent {
                    region: extraction.region,
                    report,
                })
            }
            Err(e) => Ok(SaveOutcome::LinkFailed(e)),
        }
    }

    /// Wipe the canvas, forget the stroke and redraw the UI
    pub fn reset_canvas<D: DisplayDriver>(&mut self, display: &mut D) -> Result<(), DisplayError> {
        self.canvas.clear();
        self.cursor.end_stroke();
        ui::draw_ui(display, &self.config)
    }

    /// Stop accepting input, blank the panel and switch the backlight off
    ///
    /// The backlight is switched off even if the panel could not be cleared.
    pub fn shutdown<D, P>(&mut self, display: &mut D, backlight: &mut P) -> Result<(), DisplayError>
    where
        D: DisplayDriver,
        P: OutputPin,
    {
        self.cursor.freeze();
        self.cursor.end_stroke();
        let cleared = display
            .clear(Shade::Paper)
            .and_then(|_| display.flush());
        backlight.set_low();
        cleared
    }

    pub fn freeze(&mut self) {
        self.cursor.freeze();
    }

    pub fn thaw(&mut self) {
        self.cursor.thaw();
    }

    pub fn is_frozen(&self) -> bool {
        self.cursor.is_frozen()
    }

    pub fn config(&self) -> &CaptureConfig {
        &self.config
    }

    pub fn canvas(&self) -> &FrameBuffer {
        &self.canvas
    }

    pub fn cursor(&self) -> &DrawCursor {
        &self.cursor
    }

    pub fn router(&self) -> &TouchRouter {
        &self.router
    }
}
