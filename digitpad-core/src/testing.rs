//! Test doubles shared by the unit tests

use std::string::String;
use std::vec::Vec;

use digitpad_hal::{OutputPin, UartTx};

use crate::geometry::{Point, Rect};
use crate::traits::{DisplayDriver, DisplayError, Shade};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplayCall {
    Clear(Shade),
    FillRect(Rect, Shade),
    DrawRect(Rect, Shade),
    Text(Point, String),
    FillCircle(Point, u16, Shade),
    Pixel(Point, Shade),
    Flush,
}

/// Display that records every call
pub struct MockDisplay {
    pub calls: Vec<DisplayCall>,
    fail: bool,
}

impl MockDisplay {
    pub fn new() -> Self {
        Self {
            calls: Vec::new(),
            fail: false,
        }
    }

    /// Every call fails with a communication error
    pub fn failing() -> Self {
        Self {
            calls: Vec::new(),
            fail: true,
        }
    }

    fn record(&mut self, call: DisplayCall) -> Result<(), DisplayError> {
        if self.fail {
            return Err(DisplayError::Communication);
        }
        self.calls.push(call);
        Ok(())
    }

    pub fn texts(&self) -> Vec<&str> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                DisplayCall::Text(_, t) => Some(t.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl DisplayDriver for MockDisplay {
    fn clear(&mut self, shade: Shade) -> Result<(), DisplayError> {
        self.record(DisplayCall::Clear(shade))
    }

    fn fill_rect(&mut self, area: Rect, shade: Shade) -> Result<(), DisplayError> {
        self.record(DisplayCall::FillRect(area, shade))
    }

    fn draw_rect(&mut self, area: Rect, shade: Shade) -> Result<(), DisplayError> {
        self.record(DisplayCall::DrawRect(area, shade))
    }

    fn draw_text(
        &mut self,
        origin: Point,
        text: &str,
        _fg: Shade,
        _bg: Shade,
    ) -> Result<(), DisplayError> {
        self.record(DisplayCall::Text(origin, String::from(text)))
    }

    fn fill_circle(
        &mut self,
        center: Point,
        radius: u16,
        shade: Shade,
    ) -> Result<(), DisplayError> {
        self.record(DisplayCall::FillCircle(center, radius, shade))
    }

    fn set_pixel(&mut self, at: Point, shade: Shade) -> Result<(), DisplayError> {
        self.record(DisplayCall::Pixel(at, shade))
    }

    fn flush(&mut self) -> Result<(), DisplayError> {
        self.record(DisplayCall::Flush)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MockUartError;

/// UART that captures every write
pub struct MockUart {
    pub writes: Vec<Vec<u8>>,
    pub pending: Option<usize>,
    fail: bool,
}

impl MockUart {
    pub fn new() -> Self {
        Self {
            writes: Vec::new(),
            pending: None,
            fail: false,
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::new()
        }
    }
}

impl UartTx for MockUart {
    type Error = MockUartError;

    fn write_blocking(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        if self.fail {
            return Err(MockUartError);
        }
        self.writes.push(data.to_vec());
        Ok(())
    }

    fn pending(&self) -> Option<usize> {
        self.pending
    }
}

/// Backlight pin
pub struct MockPin {
    pub high: bool,
}

impl OutputPin for MockPin {
    fn set_high(&mut self) {
        self.high = true;
    }

    fn set_low(&mut self) {
        self.high = false;
    }

    fn is_set_high(&self) -> bool {
        self.high
    }
}
