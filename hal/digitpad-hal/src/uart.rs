//! UART serial communication abstractions
//!
//! The sample link is transmit-only: the inference device never answers.

/// UART transmitter
pub trait UartTx {
    /// Error type for transmit operations
    type Error: core::fmt::Debug;

    /// Write data to the UART
    ///
    /// Blocks until all data has been handed to the peripheral or an error
    /// occurs. Implementations should bound the wait and report a timeout
    /// instead of blocking forever.
    fn write_blocking(&mut self, data: &[u8]) -> Result<(), Self::Error>;

    /// Number of bytes still waiting in the peripheral, if the hardware can
    /// report it.
    ///
    /// Informational only; it is not a delivery acknowledgement.
    fn pending(&self) -> Option<usize> {
        None
    }
}

/// Why a paced write stopped early
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PacedWriteError<E> {
    /// The transmitter was still busy when the deadline passed
    Timeout,
    /// The peripheral rejected a chunk
    Uart(E),
}

/// Write `data` in chunks, each only after the transmitter has drained
///
/// With `chunk` no larger than the hardware FIFO, `write` never has to wait
/// for space, so the only wait is the `busy` poll and `expired` bounds it.
/// Bytes already handed over when the deadline passes stay sent.
pub fn write_paced<T, E>(
    tx: &mut T,
    data: &[u8],
    chunk: usize,
    busy: impl Fn(&T) -> bool,
    mut expired: impl FnMut() -> bool,
    mut write: impl FnMut(&mut T, &[u8]) -> Result<(), E>,
) -> Result<(), PacedWriteError<E>> {
    for part in data.chunks(chunk.max(1)) {
        while busy(tx) {
            if expired() {
                return Err(PacedWriteError::Timeout);
            }
        }
        write(tx, part).map_err(PacedWriteError::Uart)?;
    }
    Ok(())
}

/// UART configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct UartConfig {
    /// Baud rate in bits per second
    pub baudrate: u32,
    /// Number of data bits (typically 8)
    pub data_bits: DataBits,
    /// Parity mode
    pub parity: Parity,
    /// Number of stop bits
    pub stop_bits: StopBits,
}

impl UartConfig {
    /// Line settings expected by the inference device: 9600 8N1
    pub const SAMPLE_LINK: Self = Self {
        baudrate: 9600,
        data_bits: DataBits::Eight,
        parity: Parity::None,
        stop_bits: StopBits::One,
    };

    /// Same framing, different baud rate
    pub const fn with_baudrate(self, baudrate: u32) -> Self {
        Self { baudrate, ..self }
    }
}

impl Default for UartConfig {
    fn default() -> Self {
        Self::SAMPLE_LINK
    }
}

/// Number of data bits per frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DataBits {
    Seven,
    Eight,
}

/// Parity mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Parity {
    None,
    Even,
    Odd,
}

/// Number of stop bits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StopBits {
    One,
    Two,
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::cell::Cell;
    use std::vec::Vec;

    #[test]
    fn test_default_is_9600_8n1() {
        let config = UartConfig::default();
        assert_eq!(config.baudrate, 9600);
        assert_eq!(config.data_bits, DataBits::Eight);
        assert_eq!(config.parity, Parity::None);
        assert_eq!(config.stop_bits, StopBits::One);
    }

    /// Transmitter that stays busy for `drain_polls` polls after each chunk
    struct FakeTx {
        queued: bool,
        polls: Cell<u32>,
        drain_polls: Option<u32>,
        chunks: Vec<Vec<u8>>,
    }

    impl FakeTx {
        fn new(drain_polls: Option<u32>) -> Self {
            Self {
                queued: false,
                polls: Cell::new(0),
                drain_polls,
                chunks: Vec::new(),
            }
        }

        fn busy(&self) -> bool {
            if !self.queued {
                return false;
            }
            let n = self.polls.get() + 1;
            self.polls.set(n);
            self.drain_polls.map_or(true, |limit| n <= limit)
        }

        fn push(&mut self, part: &[u8]) -> Result<(), ()> {
            self.chunks.push(part.to_vec());
            self.queued = true;
            self.polls.set(0);
            Ok(())
        }
    }

    #[test]
    fn test_paced_write_splits_into_chunks() {
        let mut tx = FakeTx::new(Some(3));
        let data = [0xAAu8; 99];

        let result = write_paced(
            &mut tx,
            &data,
            32,
            |t| t.busy(),
            || false,
            |t, part| t.push(part),
        );
        assert_eq!(result, Ok(()));
        let sizes: Vec<usize> = tx.chunks.iter().map(|c| c.len()).collect();
        assert_eq!(sizes, [32, 32, 32, 3]);
    }

    #[test]
    fn test_paced_write_times_out_on_stalled_line() {
        // Never drains once the first chunk is queued
        let mut tx = FakeTx::new(None);
        let data = [0u8; 99];
        let mut checks = 0;

        let result = write_paced(
            &mut tx,
            &data,
            32,
            |t| t.busy(),
            || {
                checks += 1;
                checks > 10
            },
            |t, part| t.push(part),
        );
        assert_eq!(result, Err(PacedWriteError::Timeout));
        assert_eq!(tx.chunks.len(), 1);
    }

    #[test]
    fn test_paced_write_reports_uart_error() {
        let mut tx = FakeTx::new(Some(0));
        let result = write_paced(&mut tx, &[1, 2, 3], 32, |t| t.busy(), || false, |_, _| {
            Err::<(), _>(7u8)
        });
        assert_eq!(result, Err(PacedWriteError::Uart(7)));
    }

    #[test]
    fn test_with_baudrate_keeps_framing() {
        let config = UartConfig::SAMPLE_LINK.with_baudrate(115_200);
        assert_eq!(config.baudrate, 115_200);
        assert_eq!(config.parity, Parity::None);
    }
}
