//! Board-agnostic core logic for the digit capture pad
//!
//! This crate contains everything between the touch controller and the
//! serial link that does not depend on specific hardware:
//!
//! - Packed 1bpp canvas ([`framebuffer::FrameBuffer`])
//! - Touch routing to UI buttons or the drawing pipeline
//! - Bresenham stroke rasterization with configurable brushes
//! - Region extraction into a 28×28 sample
//! - Sample transmission over any [`digitpad_hal::UartTx`]
//! - The capture session that ties these together
//! - Configuration type definitions

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
extern crate std;

pub mod config;
pub mod extract;
pub mod framebuffer;
pub mod geometry;
pub mod link;
pub mod raster;
pub mod state;
pub mod touch;
pub mod traits;
pub mod ui;

#[cfg(test)]
mod testing;

pub use config::{CaptureConfig, ConfigError};
pub use framebuffer::FrameBuffer;
pub use geometry::{Bounds, Point, Rect};
pub use state::{CaptureSession, Outcome, SaveOutcome, TouchEvent};
