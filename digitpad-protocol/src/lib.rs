//! digitpad Serial Link Protocol
//!
//! This crate defines what goes over the wire between the capture device and
//! the external inference device, and the bit-packing convention shared by
//! every 1bpp raster in the workspace.
//!
//! # Wire Format
//!
//! The link runs at 9600 baud, 8N1. Every write is a single frame:
//! ```text
//! ┌─────────┬──────────────────────────────┐
//! │ PADDING │ PAYLOAD                      │
//! │ 0x00    │ 0–98B (a Sample is 98B)      │
//! └─────────┴──────────────────────────────┘
//! ```
//!
//! The receiver swallows the first byte of every write, so the padding byte
//! is sacrificial and always `0x00`. There is no length, checksum or
//! acknowledgement.
//!
//! # Packing
//!
//! Rasters are row-major, one bit per pixel, most significant bit first:
//! pixel `i` lives in byte `i / 8` under mask `0x80 >> (i % 8)`.

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
extern crate std;

pub mod calibration;
pub mod frame;
pub mod sample;

pub use calibration::Pattern;
pub use frame::{Frame, FrameError, FRAME_PADDING, MAX_FRAME_SIZE, MAX_PAYLOAD_SIZE};
pub use sample::{bit_position, Sample, SAMPLE_BYTES, SAMPLE_SIDE};
