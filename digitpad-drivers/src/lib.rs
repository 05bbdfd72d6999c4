//! Hardware driver implementations
//!
//! Concrete drivers for the parts of the capture pad that are not plain
//! GPIO or UART:
//!
//! - ILI9341 TFT panel as an `embedded-graphics` draw target
//! - XPT2046 resistive touch controller
//! - [`Canvas`], which exposes any RGB565 draw target as the
//!   [`digitpad_core::traits::DisplayDriver`] the session draws through

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
extern crate std;

pub mod canvas;
pub mod ili9341;
pub mod xpt2046;

pub use canvas::Canvas;
pub use ili9341::{Ili9341, Ili9341Error};
pub use xpt2046::{TouchCalibration, TouchError, Xpt2046};
