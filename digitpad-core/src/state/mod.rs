//! Capture session
//!
//! One owned context object holds the canvas, the stroke cursor, the freeze
//! latch and the touch registry. A single driver loop feeds it events; there
//! is no shared state.

pub mod events;
pub mod session;

pub use events::TouchEvent;
pub use session::{CaptureSession, Outcome, SaveOutcome};
