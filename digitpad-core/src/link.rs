//! Sample transmission over the serial link

use digitpad_hal::UartTx;
use digitpad_protocol::{Frame, FrameError, Sample};

/// Transmission failures
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LinkError<E> {
    /// Payload could not be framed; nothing was written
    Frame(FrameError),
    /// The UART reported an error
    Uart(E),
}

impl<E> From<FrameError> for LinkError<E> {
    fn from(e: FrameError) -> Self {
        LinkError::Frame(e)
    }
}

/// What a completed write looked like
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TransmitReport {
    /// Bytes written, padding included
    pub bytes_written: usize,
    /// Bytes the UART still reported pending right after the write
    pub pending: Option<usize>,
}

/// Write side of the link to the inference device
pub struct SampleLink<U> {
    uart: U,
}

impl<U: UartTx> SampleLink<U> {
    pub fn new(uart: U) -> Self {
        Self { uart }
    }

    /// Frame an arbitrary payload and write it
    pub fn transmit(&mut self, payload: &[u8]) -> Result<TransmitReport, LinkError<U::Error>> {
        let frame = Frame::new(payload)?;
        self.send_frame(&frame)
    }

    /// Frame a packed sample and write it
    pub fn send_sample(&mut self, sample: &Sample) -> Result<TransmitReport, LinkError<U::Error>> {
        self.send_frame(&Frame::sample(sample))
    }

    /// Write an already built frame in one blocking write
    pub fn send_frame(&mut self, frame: &Frame) -> Result<TransmitReport, LinkError<U::Error>> {
        let wire = frame.encode_to_vec()?;
        self.uart.write_blocking(&wire).map_err(LinkError::Uart)?;

        Ok(TransmitReport {
            bytes_written: wire.len(),
            pending: self.uart.pending(),
        })
    }

    pub fn uart(&self) -> &U {
        &self.uart
    }

    /// Give the UART back
    pub fn release(self) -> U {
        self.uart
    }
}
