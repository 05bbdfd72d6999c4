//! Region extraction into a 28×28 sample
//!
//! Both strategies pick a source rectangle on the canvas and resample it
//! with nearest-neighbour lookup onto the sample grid. A fixed 28×28 window
//! therefore maps one-to-one; a bounding box of any size is scaled.

use digitpad_protocol::{Sample, SAMPLE_SIDE};

use crate::framebuffer::{FrameBuffer, CANVAS};
use crate::geometry::{Point, Rect};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Extraction failures
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ExtractError {
    /// The canvas has no inked pixel to box
    NoDrawingFound,
}

/// How the sampled region is chosen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum RegionExtractor {
    /// Box the drawing, pad it by `margin` on every side, scale to fit
    BoundingBoxScaled { margin: u16 },
    /// Copy the 28×28 window at `origin` as-is
    FixedWindow { origin: Point },
}

/// A sample and the canvas region it was taken from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extraction {
    pub sample: Sample,
    pub region: Rect,
}

impl RegionExtractor {
    /// Padding around the drawing used by the bounding-box strategy
    pub const DEFAULT_MARGIN: u16 = 5;

    /// Widest margin whose padded box still has a `u16` side
    pub const MAX_MARGIN: u16 = (u16::MAX - (CANVAS.width - 1)) / 2;

    /// Window side for the fixed strategy
    pub const WINDOW_SIDE: u16 = SAMPLE_SIDE as u16;

    pub const fn bounding_box() -> Self {
        RegionExtractor::BoundingBoxScaled {
            margin: Self::DEFAULT_MARGIN,
        }
    }

    pub const fn fixed_window(origin: Point) -> Self {
        RegionExtractor::FixedWindow { origin }
    }

    /// Canvas region this strategy would sample
    pub fn region(&self, canvas: &FrameBuffer) -> Result<Rect, ExtractError> {
        match *self {
            RegionExtractor::FixedWindow { origin } => Ok(Rect::square(
                origin.x,
                origin.y,
                Self::WINDOW_SIDE,
            )),
            RegionExtractor::BoundingBoxScaled { margin } => {
                let bounds = canvas
                    .bounding_box()
                    .ok_or(ExtractError::NoDrawingFound)?;
                // Bounds span at most 319 pixels, so the clamped sides fit
                let margin = margin.min(Self::MAX_MARGIN) as i32;
                Ok(Rect::new(
                    bounds.min_x - margin,
                    bounds.min_y - margin,
                    (bounds.max_x - bounds.min_x + 2 * margin) as u16,
                    (bounds.max_y - bounds.min_y + 2 * margin) as u16,
                ))
            }
        }
    }

    /// Produce the sample. The canvas is only read.
    pub fn extract(&self, canvas: &FrameBuffer) -> Result<Extraction, ExtractError> {
        let region = self.region(canvas)?;
        Ok(Extraction {
            sample: resample(canvas, region),
            region,
        })
    }
}

/// Nearest-neighbour resample of `region` onto the sample grid
///
/// Cell `(dx, dy)` reads canvas pixel
/// `(x0 + ⌊dx·w/28⌋, y0 + ⌊dy·h/28⌋)`; off-canvas reads are blank.
fn resample(canvas: &FrameBuffer, region: Rect) -> Sample {
    let side = SAMPLE_SIDE as i32;
    let (w, h) = (region.width as i32, region.height as i32);
    Sample::from_fn(|dx, dy| {
        let x = region.x + (dx as i32 * w) / side;
        let y = region.y + (dy as i32 * h) / side;
        canvas.get_pixel(x, y)
    })
}
