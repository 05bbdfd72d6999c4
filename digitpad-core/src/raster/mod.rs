//! Stroke rasterization
//!
//! Touch samples arrive sparsely while the finger moves, so consecutive
//! samples are joined with Bresenham lines and every lattice point on the
//! way is stamped with the brush.

pub mod line;
pub mod pen;

pub use line::Line;
pub use pen::{Brush, DrawCursor, LineRasterizer, PenConfig};
