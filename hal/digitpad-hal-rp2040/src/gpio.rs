//! GPIO output on embassy-rp pins

use digitpad_hal::OutputPin;
use embassy_rp::gpio::Output;

/// Push-pull output, optionally active-low
pub struct Rp2040Output<'d> {
    pin: Output<'d>,
    /// Logic high drives the pin low
    inverted: bool,
}

impl<'d> Rp2040Output<'d> {
    pub fn new(pin: Output<'d>) -> Self {
        Self {
            pin,
            inverted: false,
        }
    }

    /// For loads switched by a low level, e.g. a PNP backlight transistor
    pub fn new_active_low(pin: Output<'d>) -> Self {
        Self {
            pin,
            inverted: true,
        }
    }
}

impl OutputPin for Rp2040Output<'_> {
    fn set_high(&mut self) {
        if self.inverted {
            self.pin.set_low();
        } else {
            self.pin.set_high();
        }
    }

    fn set_low(&mut self) {
        if self.inverted {
            self.pin.set_high();
        } else {
            self.pin.set_low();
        }
    }

    fn is_set_high(&self) -> bool {
        self.pin.is_set_high() != self.inverted
    }
}
