//! Hardware abstraction traits
//!
//! These traits define the interface between the capture pipeline and
//! hardware-specific implementations.

pub mod display;

pub use display::{DisplayDriver, DisplayError, DisplayExt, Shade};
