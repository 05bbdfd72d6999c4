//! Deadline-bounded blocking UART transmitter
//!
//! embassy-rp's blocking write spins on a full FIFO forever if the line
//! stalls. Writes here hand over one FIFO-sized chunk at a time, only once
//! the transmitter has drained, and give up if it is still busy when the
//! per-write deadline passes. The deadline is therefore checked at least
//! once per chunk drain (about 33 ms at 9600 baud).

use digitpad_hal::uart::{
    write_paced, DataBits, PacedWriteError, Parity, StopBits, UartConfig, UartTx,
};
use embassy_rp::uart::{self, Blocking, Instance};
use embassy_time::{Duration, Instant};

/// Depth of the RP2040 UART transmit FIFO
const TX_FIFO_DEPTH: usize = 32;

/// UART transmit errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum UartBusError {
    /// The write did not finish before its deadline
    Timeout,
    Framing,
    Overrun,
    Parity,
    /// Break condition or an error the peripheral added later
    Other,
}

impl From<uart::Error> for UartBusError {
    fn from(e: uart::Error) -> Self {
        match e {
            uart::Error::Framing => UartBusError::Framing,
            uart::Error::Overrun => UartBusError::Overrun,
            uart::Error::Parity => UartBusError::Parity,
            _ => UartBusError::Other,
        }
    }
}

/// Translate the shared line settings into embassy-rp's
pub fn embassy_config(config: &UartConfig) -> uart::Config {
    let mut out = uart::Config::default();
    out.baudrate = config.baudrate;
    out.data_bits = match config.data_bits {
        DataBits::Seven => uart::DataBits::DataBits7,
        DataBits::Eight => uart::DataBits::DataBits8,
    };
    out.parity = match config.parity {
        Parity::None => uart::Parity::ParityNone,
        Parity::Even => uart::Parity::ParityEven,
        Parity::Odd => uart::Parity::ParityOdd,
    };
    out.stop_bits = match config.stop_bits {
        StopBits::One => uart::StopBits::STOP1,
        StopBits::Two => uart::StopBits::STOP2,
    };
    out
}

/// Blocking transmitter with a write deadline
pub struct BlockingUartTx<'d, T: Instance> {
    tx: uart::UartTx<'d, T, Blocking>,
    timeout: Duration,
}

impl<'d, T: Instance> BlockingUartTx<'d, T> {
    pub fn new(tx: uart::UartTx<'d, T, Blocking>, timeout_ms: u32) -> Self {
        Self {
            tx,
            timeout: Duration::from_millis(timeout_ms as u64),
        }
    }
}

impl<T: Instance> UartTx for BlockingUartTx<'_, T> {
    type Error = UartBusError;

    fn write_blocking(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        let deadline = Instant::now() + self.timeout;
        write_paced(
            &mut self.tx,
            data,
            TX_FIFO_DEPTH,
            |tx| tx.busy(),
            || Instant::now() > deadline,
            |tx, chunk| tx.blocking_write(chunk),
        )
        .map_err(|e| match e {
            PacedWriteError::Timeout => UartBusError::Timeout,
            PacedWriteError::Uart(e) => UartBusError::from(e),
        })
    }

    /// Upper bound: the whole FIFO while the shifter is busy
    fn pending(&self) -> Option<usize> {
        Some(if self.tx.busy() { TX_FIFO_DEPTH } else { 0 })
    }
}
