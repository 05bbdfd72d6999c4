//! Hand-built payloads for validating the link without drawing anything.
//!
//! These go through exactly the same framing as a real sample, so a
//! receiver that decodes them correctly will decode samples correctly.

use crate::frame::Frame;
use crate::sample::SAMPLE_BYTES;

/// Seven-segment codes for 0-9, A-F, G and H
pub const SEGMENT_CODES: [u8; 18] = [
    0x3f, 0x06, 0x5b, 0x4f, 0x66, 0x6d, 0x7d, 0x07, 0x7f, 0x6f, 0x77, 0x7c, 0x39, 0x5e, 0x79,
    0x71, 0x3d, 0x76,
];

/// Calibration payloads
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Pattern {
    /// All-blank sample
    Blank,
    /// Blank sample except the last byte, `0x80`
    TailMarker,
    /// Reference input: first byte `0x0E`, rest blank
    Control,
    /// Inverted seven-segment code table (short frame)
    SegmentCodes,
}

impl Pattern {
    /// All patterns, in a stable order
    pub const ALL: [Pattern; 4] = [
        Pattern::Blank,
        Pattern::TailMarker,
        Pattern::Control,
        Pattern::SegmentCodes,
    ];

    /// The pattern after this one, wrapping around
    pub fn next(self) -> Self {
        match self {
            Pattern::Blank => Pattern::TailMarker,
            Pattern::TailMarker => Pattern::Control,
            Pattern::Control => Pattern::SegmentCodes,
            Pattern::SegmentCodes => Pattern::Blank,
        }
    }

    /// Build the frame for this pattern
    pub fn frame(self) -> Frame {
        let mut payload = [0u8; SAMPLE_BYTES];
        let len = match self {
            Pattern::Blank => SAMPLE_BYTES,
            Pattern::TailMarker => {
                payload[SAMPLE_BYTES - 1] = 0x80;
                SAMPLE_BYTES
            }
            Pattern::Control => {
                payload[0] = 0x0E;
                SAMPLE_BYTES
            }
            Pattern::SegmentCodes => {
                for (dst, code) in payload.iter_mut().zip(SEGMENT_CODES) {
                    *dst = !code;
                }
                SEGMENT_CODES.len()
            }
        };

        let mut frame = Frame {
            payload: heapless::Vec::new(),
        };
        // len never exceeds SAMPLE_BYTES
        let _ = frame.payload.extend_from_slice(&payload[..len]);
        frame
    }
}
