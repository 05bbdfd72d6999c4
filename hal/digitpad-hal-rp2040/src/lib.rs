//! RP2040-specific HAL for the digit capture pad
//!
//! Implements the shared `digitpad-hal` traits on embassy-rp peripherals:
//! - Deadline-bounded blocking UART transmitter
//! - GPIO output (backlight)

#![no_std]

pub mod gpio;
pub mod uart;

pub use gpio::Rp2040Output;
pub use uart::{BlockingUartTx, UartBusError};
