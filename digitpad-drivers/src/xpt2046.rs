//! XPT2046 resistive touch controller
//!
//! Reports positions in the controller's native portrait orientation
//! (240×320). The capture session transposes them onto the landscape canvas.

use embedded_hal::digital::OutputPin;
use embedded_hal::spi::SpiBus;

/// Start bit, 12-bit differential X measurement
const GET_X: u8 = 0xD0;

/// Start bit, 12-bit differential Y measurement
const GET_Y: u8 = 0x90;

/// Samples averaged per reported touch
const CONFIDENCE: usize = 5;

/// Largest mean squared deviation accepted between samples
const MAX_DEVIATION: u32 = 50;

/// Touch controller errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TouchError {
    /// SPI transfer failed
    Spi,
    /// Chip select could not be driven
    Pin,
}

/// Raw ADC limits and the output resolution they map onto
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TouchCalibration {
    pub x_min: u16,
    pub x_max: u16,
    pub y_min: u16,
    pub y_max: u16,
    pub width: u16,
    pub height: u16,
}

impl Default for TouchCalibration {
    fn default() -> Self {
        Self {
            x_min: 100,
            x_max: 1962,
            y_min: 100,
            y_max: 1900,
            width: 240,
            height: 320,
        }
    }
}

impl TouchCalibration {
    /// Whether a raw reading lies inside the calibrated panel area
    pub fn accepts(&self, x: u16, y: u16) -> bool {
        (self.x_min..=self.x_max).contains(&x) && (self.y_min..=self.y_max).contains(&y)
    }

    /// Map a raw reading onto output pixels
    pub fn normalize(&self, x: u16, y: u16) -> (u16, u16) {
        (
            scale(x, self.x_min, self.x_max, self.width),
            scale(y, self.y_min, self.y_max, self.height),
        )
    }
}

fn scale(raw: u16, min: u16, max: u16, span: u16) -> u16 {
    let range = max.saturating_sub(min).max(1) as u32;
    let offset = raw.saturating_sub(min) as u32;
    let scaled = offset * span as u32 / range;
    scaled.min(span.saturating_sub(1) as u32) as u16
}

/// XPT2046 driver
pub struct Xpt2046<SPI, CS> {
    spi: SPI,
    cs: CS,
    calibration: TouchCalibration,
}

impl<SPI, CS> Xpt2046<SPI, CS>
where
    SPI: SpiBus,
    CS: OutputPin,
{
    pub fn new(spi: SPI, cs: CS) -> Self {
        Self::with_calibration(spi, cs, TouchCalibration::default())
    }

    pub fn with_calibration(spi: SPI, cs: CS, calibration: TouchCalibration) -> Self {
        Self {
            spi,
            cs,
            calibration,
        }
    }

    pub fn calibration(&self) -> &TouchCalibration {
        &self.calibration
    }

    /// One raw (x, y) reading, or `None` outside the calibrated area
    pub fn raw_touch(&mut self) -> Result<Option<(u16, u16)>, TouchError> {
        let x = self.measure(GET_X)?;
        let y = self.measure(GET_Y)?;
        Ok(self.calibration.accepts(x, y).then_some((x, y)))
    }

    /// A debounced, normalized position
    ///
    /// Takes several readings and reports their mean only if every reading
    /// is valid and they agree closely; otherwise the pen is treated as up.
    pub fn read(&mut self) -> Result<Option<(u16, u16)>, TouchError> {
        let mut samples = [(0u16, 0u16); CONFIDENCE];
        for slot in samples.iter_mut() {
            match self.raw_touch()? {
                Some(sample) => *slot = sample,
                None => return Ok(None),
            }
        }

        let n = CONFIDENCE as u32;
        let mean_x = samples.iter().map(|s| s.0 as u32).sum::<u32>() / n;
        let mean_y = samples.iter().map(|s| s.1 as u32).sum::<u32>() / n;

        let deviation = samples
            .iter()
            .map(|&(x, y)| {
                let dx = x as i32 - mean_x as i32;
                let dy = y as i32 - mean_y as i32;
                (dx * dx + dy * dy) as u32
            })
            .sum::<u32>()
            / n;
        if deviation > MAX_DEVIATION {
            return Ok(None);
        }

        Ok(Some(
            self.calibration.normalize(mean_x as u16, mean_y as u16),
        ))
    }

    /// Give back the bus and chip select
    pub fn release(self) -> (SPI, CS) {
        (self.spi, self.cs)
    }

    fn measure(&mut self, command: u8) -> Result<u16, TouchError> {
        let mut buf = [command, 0, 0];
        self.cs.set_low().map_err(|_| TouchError::Pin)?;
        let transfer = self
            .spi
            .transfer_in_place(&mut buf)
            .and_then(|_| self.spi.flush())
            .map_err(|_| TouchError::Spi);
        self.cs.set_high().map_err(|_| TouchError::Pin)?;
        transfer?;
        Ok(((buf[1] as u16) << 4) | ((buf[2] as u16) >> 4))
    }
}
