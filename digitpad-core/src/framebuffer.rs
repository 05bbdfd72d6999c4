//! Packed 1bpp drawing canvas
//!
//! 320×240 pixels, row-major, MSB-first, 9600 bytes. Out-of-range
//! coordinates are silently ignored by every accessor so that brushes and
//! line walks never need to bounds-check.

use digitpad_protocol::bit_position;

use crate::geometry::{Bounds, Rect};

/// Canvas width in pixels
pub const CANVAS_WIDTH: i32 = 320;

/// Canvas height in pixels
pub const CANVAS_HEIGHT: i32 = 240;

/// Packed canvas size
pub const FRAMEBUFFER_BYTES: usize = (CANVAS_WIDTH * CANVAS_HEIGHT) as usize / 8;

/// Bytes per canvas row (320 is a multiple of 8, rows never share a byte)
const ROW_BYTES: usize = CANVAS_WIDTH as usize / 8;

/// The whole canvas as a rectangle
pub const CANVAS: Rect = Rect::new(0, 0, CANVAS_WIDTH as u16, CANVAS_HEIGHT as u16);

/// Canvas bitmap
#[derive(Clone, PartialEq, Eq)]
pub struct FrameBuffer {
    bits: [u8; FRAMEBUFFER_BYTES],
}

impl Default for FrameBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameBuffer {
    /// Create a blank canvas
    pub const fn new() -> Self {
        Self {
            bits: [0; FRAMEBUFFER_BYTES],
        }
    }

    fn index(x: i32, y: i32) -> Option<usize> {
        if (0..CANVAS_WIDTH).contains(&x) && (0..CANVAS_HEIGHT).contains(&y) {
            Some((y * CANVAS_WIDTH + x) as usize)
        } else {
            None
        }
    }

    /// Set or clear a pixel. Off-canvas coordinates are ignored.
    pub fn set_pixel(&mut self, x: i32, y: i32, ink: bool) {
        let Some(idx) = Self::index(x, y) else {
            return;
        };
        let (byte, mask) = bit_position(idx);
        if ink {
            self.bits[byte] |= mask;
        } else {
            self.bits[byte] &= !mask;
        }
    }

    /// Read a pixel. Off-canvas coordinates read as blank.
    pub fn get_pixel(&self, x: i32, y: i32) -> bool {
        match Self::index(x, y) {
            Some(idx) => {
                let (byte, mask) = bit_position(idx);
                self.bits[byte] & mask != 0
            }
            None => false,
        }
    }

    /// Blank the whole canvas
    pub fn clear(&mut self) {
        self.bits.fill(0);
    }

    /// Whether no pixel is inked
    pub fn is_blank(&self) -> bool {
        self.bits.iter().all(|&b| b == 0)
    }

    /// Minimal box containing every inked pixel, or `None` on a blank canvas
    pub fn bounding_box(&self) -> Option<Bounds> {
        let mut bounds: Option<Bounds> = None;

        for (y, row) in self.bits.chunks_exact(ROW_BYTES).enumerate() {
            let Some(first) = row.iter().position(|&b| b != 0) else {
                continue;
            };
            // A non-zero byte exists, so rposition finds one too
            let last = row.iter().rposition(|&b| b != 0).unwrap_or(first);

            let y = y as i32;
            let row_bounds = Bounds {
                min_x: (first * 8) as i32 + row[first].leading_zeros() as i32,
                min_y: y,
                max_x: (last * 8 + 7) as i32 - row[last].trailing_zeros() as i32,
                max_y: y,
            };

            bounds = Some(match bounds {
                Some(b) => b.union(row_bounds),
                None => row_bounds,
            });
        }

        bounds
    }

    /// Raw packed bytes
    pub fn as_bytes(&self) -> &[u8; FRAMEBUFFER_BYTES] {
        &self.bits
    }

    /// Number of inked pixels
    pub fn ink_count(&self) -> u32 {
        self.bits.iter().map(|b| b.count_ones()).sum()
    }
}

impl core::fmt::Debug for FrameBuffer {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("FrameBuffer")
            .field("ink", &self.ink_count())
            .field("bounds", &self.bounding_box())
            .finish()
    }
}
