//! Touch input routing
//!
//! Raw controller coordinates are transposed into screen space, then either
//! trigger a UI action or continue the current stroke.

pub mod area;
pub mod router;

pub use area::{Action, TouchArea};
pub use router::{DrawBound, Route, TouchRouter, MAX_TOUCH_AREAS};
