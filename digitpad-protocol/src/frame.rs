//! Frame encoding for the sample link.
//!
//! Frame format:
//! - PADDING (1 byte): always 0x00, dropped by the receiver
//! - PAYLOAD (0-98 bytes): a packed sample or a calibration pattern

use heapless::Vec;

use crate::sample::{Sample, SAMPLE_BYTES};

/// Sacrificial first byte of every frame
pub const FRAME_PADDING: u8 = 0x00;

/// Maximum payload size in bytes
pub const MAX_PAYLOAD_SIZE: usize = SAMPLE_BYTES;

/// Maximum complete frame size (PADDING + MAX_PAYLOAD)
pub const MAX_FRAME_SIZE: usize = 1 + MAX_PAYLOAD_SIZE;

/// Errors that can occur during frame encoding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FrameError {
    /// Payload exceeds maximum allowed size
    PayloadTooLarge,
    /// Buffer too small for encoding
    BufferTooSmall,
}

/// A frame ready to be written to the link
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    /// Payload data
    pub payload: Vec<u8, MAX_PAYLOAD_SIZE>,
}

impl Frame {
    /// Create a new frame around the given payload
    pub fn new(payload: &[u8]) -> Result<Self, FrameError> {
        if payload.len() > MAX_PAYLOAD_SIZE {
            return Err(FrameError::PayloadTooLarge);
        }

        let mut payload_vec = Vec::new();
        payload_vec
            .extend_from_slice(payload)
            .map_err(|_| FrameError::PayloadTooLarge)?;

        Ok(Self {
            payload: payload_vec,
        })
    }

    /// Frame carrying a packed sample
    pub fn sample(sample: &Sample) -> Self {
        let mut payload = Vec::new();
        // A sample is exactly MAX_PAYLOAD_SIZE bytes, this cannot overflow
        let _ = payload.extend_from_slice(sample.as_bytes());
        Self { payload }
    }

    /// Number of bytes this frame occupies on the wire
    pub fn wire_len(&self) -> usize {
        1 + self.payload.len()
    }

    /// Encode this frame into a byte buffer
    ///
    /// Returns the number of bytes written
    pub fn encode(&self, buffer: &mut [u8]) -> Result<usize, FrameError> {
        let frame_len = self.wire_len();
        if buffer.len() < frame_len {
            return Err(FrameError::BufferTooSmall);
        }

        buffer[0] = FRAME_PADDING;
        buffer[1..frame_len].copy_from_slice(&self.payload);

        Ok(frame_len)
    }

    /// Encode this frame into a heapless Vec
    pub fn encode_to_vec(&self) -> Result<Vec<u8, MAX_FRAME_SIZE>, FrameError> {
        let mut buffer = [0u8; MAX_FRAME_SIZE];
        let len = self.encode(&mut buffer)?;
        let mut vec = Vec::new();
        vec.extend_from_slice(&buffer[..len])
            .map_err(|_| FrameError::BufferTooSmall)?;
        Ok(vec)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_encode_sample() {
        let frame = Frame::sample(&Sample::new());
        let encoded = frame.encode_to_vec().unwrap();

        assert_eq!(encoded.len(), 99);
        assert_eq!(encoded[0], FRAME_PADDING);
        assert!(encoded[1..].iter().all(|&b| b == 0));
    }

    #[test]
    fn test_frame_padding_precedes_payload() {
        let frame = Frame::new(&[0x0E, 0x42]).unwrap();
        let mut buffer = [0xFFu8; 8];
        let len = frame.encode(&mut buffer).unwrap();

        assert_eq!(len, 3);
        assert_eq!(&buffer[..3], &[0x00, 0x0E, 0x42]);
        // Untouched beyond the frame
        assert_eq!(buffer[3], 0xFF);
    }

    #[test]
    fn test_empty_payload_is_just_padding() {
        let frame = Frame::new(&[]).unwrap();
        assert_eq!(frame.encode_to_vec().unwrap().as_slice(), &[FRAME_PADDING]);
    }

    #[test]
    fn test_payload_too_large() {
        let large_payload = [0u8; MAX_PAYLOAD_SIZE + 1];
        let result = Frame::new(&large_payload);
        assert_eq!(result, Err(FrameError::PayloadTooLarge));
    }

    #[test]
    fn test_buffer_too_small() {
        let frame = Frame::sample(&Sample::new());
        let mut buffer = [0u8; MAX_PAYLOAD_SIZE];
        assert_eq!(frame.encode(&mut buffer), Err(FrameError::BufferTooSmall));
    }
}
