//! digitpad Hardware Abstraction Layer
//!
//! This crate defines the hardware traits the capture pipeline talks to.
//! Chip-specific crates implement them so the same pipeline code runs on
//! the board and in host tests.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  digitpad-core / digitpad-firmware      │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  digitpad-hal (this crate - traits)     │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//!            ┌─────────────────┐
//!            │ digitpad-hal-   │
//!            │     rp2040      │
//!            └─────────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::OutputPin`] - Switched output (display backlight)
//! - [`uart::UartTx`] - Serial transmit towards the inference device

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
extern crate std;

pub mod gpio;
pub mod uart;

pub use gpio::OutputPin;
pub use uart::{write_paced, DataBits, PacedWriteError, Parity, StopBits, UartConfig, UartTx};
