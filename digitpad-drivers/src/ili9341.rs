//! ILI9341 TFT panel driver
//!
//! 320×240 landscape, RGB565 over SPI. The driver owns the bus together
//! with the chip-select, data/command and reset lines.

use embedded_graphics::pixelcolor::{IntoStorage, Rgb565};
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{ContainsPoint, Rectangle};
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use embedded_hal::spi::SpiBus;

/// Panel width in landscape orientation
pub const WIDTH: u16 = 320;

/// Panel height in landscape orientation
pub const HEIGHT: u16 = 240;

/// ILI9341 commands
#[allow(dead_code)]
mod cmd {
    pub const SWRESET: u8 = 0x01;
    pub const SLPOUT: u8 = 0x11;
    pub const DISPOFF: u8 = 0x28;
    pub const DISPON: u8 = 0x29;
    pub const CASET: u8 = 0x2A;
    pub const PASET: u8 = 0x2B;
    pub const RAMWR: u8 = 0x2C;
    pub const MADCTL: u8 = 0x36;
    pub const PIXFMT: u8 = 0x3A;
}

/// Row/column exchange plus BGR order: landscape with the connector on the left
const MADCTL_LANDSCAPE: u8 = 0x28;

/// 16 bits per pixel
const PIXFMT_RGB565: u8 = 0x55;

/// Pixels pushed per SPI write when filling
const FILL_CHUNK: usize = 64;

/// Panel errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Ili9341Error {
    /// SPI transfer failed
    Spi,
    /// CS, DC or reset pin could not be driven
    Pin,
}

/// ILI9341 driver
pub struct Ili9341<SPI, CS, DC, RST> {
    spi: SPI,
    cs: CS,
    dc: DC,
    rst: RST,
}

impl<SPI, CS, DC, RST> Ili9341<SPI, CS, DC, RST>
where
    SPI: SpiBus,
    CS: OutputPin,
    DC: OutputPin,
    RST: OutputPin,
{
    pub fn new(spi: SPI, cs: CS, dc: DC, rst: RST) -> Self {
        Self { spi, cs, dc, rst }
    }

    /// Hardware reset and power-up sequence
    pub fn init<D: DelayNs>(&mut self, delay: &mut D) -> Result<(), Ili9341Error> {
        self.rst.set_low().map_err(|_| Ili9341Error::Pin)?;
        delay.delay_ms(10);
        self.rst.set_high().map_err(|_| Ili9341Error::Pin)?;
        delay.delay_ms(120);

        self.command(cmd::SWRESET, &[])?;
        delay.delay_ms(150);
        self.command(cmd::SLPOUT, &[])?;
        delay.delay_ms(120);

        self.command(cmd::PIXFMT, &[PIXFMT_RGB565])?;
        self.command(cmd::MADCTL, &[MADCTL_LANDSCAPE])?;
        self.command(cmd::DISPON, &[])?;
        delay.delay_ms(20);

        Ok(())
    }

    /// Turn the panel output on or off
    pub fn set_display_on(&mut self, on: bool) -> Result<(), Ili9341Error> {
        if on {
            self.command(cmd::DISPON, &[])
        } else {
            self.command(cmd::DISPOFF, &[])
        }
    }

    /// Fill an inclusive, on-panel rectangle with one colour
    pub fn fill_area(
        &mut self,
        x0: u16,
        y0: u16,
        x1: u16,
        y1: u16,
        color: Rgb565,
    ) -> Result<(), Ili9341Error> {
        self.set_window(x0, y0, x1, y1)?;

        let [hi, lo] = color.into_storage().to_be_bytes();
        let mut chunk = [0u8; FILL_CHUNK * 2];
        for pair in chunk.chunks_exact_mut(2) {
            pair[0] = hi;
            pair[1] = lo;
        }

        let mut remaining = (x1 - x0 + 1) as usize * (y1 - y0 + 1) as usize;
        self.selected(|panel| {
            panel.dc.set_high().map_err(|_| Ili9341Error::Pin)?;
            while remaining > 0 {
                let n = remaining.min(FILL_CHUNK);
                panel
                    .spi
                    .write(&chunk[..n * 2])
                    .map_err(|_| Ili9341Error::Spi)?;
                remaining -= n;
            }
            Ok(())
        })
    }

    /// Give back the bus and pins
    pub fn release(self) -> (SPI, CS, DC, RST) {
        (self.spi, self.cs, self.dc, self.rst)
    }

    /// Run `f` with the chip selected, flushing the bus before deselecting
    fn selected<F>(&mut self, f: F) -> Result<(), Ili9341Error>
    where
        F: FnOnce(&mut Self) -> Result<(), Ili9341Error>,
    {
        self.cs.set_low().map_err(|_| Ili9341Error::Pin)?;
        let result = f(self);
        let flushed = self.spi.flush().map_err(|_| Ili9341Error::Spi);
        self.cs.set_high().map_err(|_| Ili9341Error::Pin)?;
        result.and(flushed)
    }

    fn set_window(&mut self, x0: u16, y0: u16, x1: u16, y1: u16) -> Result<(), Ili9341Error> {
        let [x0h, x0l] = x0.to_be_bytes();
        let [x1h, x1l] = x1.to_be_bytes();
        let [y0h, y0l] = y0.to_be_bytes();
        let [y1h, y1l] = y1.to_be_bytes();

        self.command(cmd::CASET, &[x0h, x0l, x1h, x1l])?;
        self.command(cmd::PASET, &[y0h, y0l, y1h, y1l])?;
        self.command(cmd::RAMWR, &[])
    }

    fn command(&mut self, command: u8, params: &[u8]) -> Result<(), Ili9341Error> {
        self.selected(|panel| {
            panel.dc.set_low().map_err(|_| Ili9341Error::Pin)?;
            panel.spi.write(&[command]).map_err(|_| Ili9341Error::Spi)?;
            if !params.is_empty() {
                // The command byte must be clocked out before DC flips
                panel.spi.flush().map_err(|_| Ili9341Error::Spi)?;
                panel.dc.set_high().map_err(|_| Ili9341Error::Pin)?;
                panel.spi.write(params).map_err(|_| Ili9341Error::Spi)?;
            }
            Ok(())
        })
    }

    fn data(&mut self, bytes: &[u8]) -> Result<(), Ili9341Error> {
        self.selected(|panel| {
            panel.dc.set_high().map_err(|_| Ili9341Error::Pin)?;
            panel.spi.write(bytes).map_err(|_| Ili9341Error::Spi)
        })
    }
}

impl<SPI, CS, DC, RST> OriginDimensions for Ili9341<SPI, CS, DC, RST> {
    fn size(&self) -> Size {
        Size::new(WIDTH as u32, HEIGHT as u32)
    }
}

impl<SPI, CS, DC, RST> DrawTarget for Ili9341<SPI, CS, DC, RST>
where
    SPI: SpiBus,
    CS: OutputPin,
    DC: OutputPin,
    RST: OutputPin,
{
    type Color = Rgb565;
    type Error = Ili9341Error;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        let bounds = self.bounding_box();
        for Pixel(point, color) in pixels {
            if !bounds.contains(point) {
                continue;
            }
            let (x, y) = (point.x as u16, point.y as u16);
            self.set_window(x, y, x, y)?;
            self.data(&color.into_storage().to_be_bytes())?;
        }
        Ok(())
    }

    fn fill_solid(&mut self, area: &Rectangle, color: Self::Color) -> Result<(), Self::Error> {
        let area = area.intersection(&self.bounding_box());
        let Some(bottom_right) = area.bottom_right() else {
            return Ok(());
        };
        self.fill_area(
            area.top_left.x as u16,
            area.top_left.y as u16,
            bottom_right.x as u16,
            bottom_right.y as u16,
            color,
        )
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        self.fill_area(0, 0, WIDTH - 1, HEIGHT - 1, color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::cell::{Cell, RefCell};
    use core::convert::Infallible;
    use std::rc::Rc;
    use std::vec::Vec;

    #[derive(Debug, Clone, PartialEq, Eq)]
    enum Bus {
        Cmd(u8),
        Data(Vec<u8>),
    }

    /// SPI bus that tags every write with the DC level
    struct MockSpi {
        cs: Rc<Cell<bool>>,
        dc: Rc<Cell<bool>>,
        log: Rc<RefCell<Vec<Bus>>>,
    }

    impl embedded_hal::spi::ErrorType for MockSpi {
        type Error = Infallible;
    }

    impl SpiBus for MockSpi {
        fn read(&mut self, _words: &mut [u8]) -> Result<(), Infallible> {
            Ok(())
        }

        fn write(&mut self, words: &[u8]) -> Result<(), Infallible> {
            assert!(!self.cs.get(), "write with the panel deselected");
            let entry = if self.dc.get() {
                Bus::Data(words.to_vec())
            } else {
                Bus::Cmd(words[0])
            };
            self.log.borrow_mut().push(entry);
            Ok(())
        }

        fn transfer(&mut self, _read: &mut [u8], _write: &[u8]) -> Result<(), Infallible> {
            Ok(())
        }

        fn transfer_in_place(&mut self, _words: &mut [u8]) -> Result<(), Infallible> {
            Ok(())
        }

        fn flush(&mut self) -> Result<(), Infallible> {
            Ok(())
        }
    }

    struct MockPin {
        level: Rc<Cell<bool>>,
    }

    impl embedded_hal::digital::ErrorType for MockPin {
        type Error = Infallible;
    }

    impl OutputPin for MockPin {
        fn set_low(&mut self) -> Result<(), Infallible> {
            self.level.set(false);
            Ok(())
        }

        fn set_high(&mut self) -> Result<(), Infallible> {
            self.level.set(true);
            Ok(())
        }
    }

    struct NoDelay;

    impl DelayNs for NoDelay {
        fn delay_ns(&mut self, _ns: u32) {}
    }

    type Panel = Ili9341<MockSpi, MockPin, MockPin, MockPin>;

    fn panel() -> (Panel, Rc<RefCell<Vec<Bus>>>) {
        let cs = Rc::new(Cell::new(true));
        let dc = Rc::new(Cell::new(false));
        let log = Rc::new(RefCell::new(Vec::new()));
        let spi = MockSpi {
            cs: cs.clone(),
            dc: dc.clone(),
            log: log.clone(),
        };
        let rst = MockPin {
            level: Rc::new(Cell::new(true)),
        };
        let panel = Ili9341::new(spi, MockPin { level: cs }, MockPin { level: dc }, rst);
        (panel, log)
    }

    fn data_bytes(log: &[Bus]) -> usize {
        log.iter()
            .map(|b| match b {
                Bus::Data(d) => d.len(),
                Bus::Cmd(_) => 0,
            })
            .sum()
    }

    #[test]
    fn test_init_sequence() {
        let (mut panel, log) = panel();
        panel.init(&mut NoDelay).unwrap();

        assert_eq!(
            log.borrow().as_slice(),
            &[
                Bus::Cmd(cmd::SWRESET),
                Bus::Cmd(cmd::SLPOUT),
                Bus::Cmd(cmd::PIXFMT),
                Bus::Data(std::vec![0x55]),
                Bus::Cmd(cmd::MADCTL),
                Bus::Data(std::vec![MADCTL_LANDSCAPE]),
                Bus::Cmd(cmd::DISPON),
            ]
        );
    }

    #[test]
    fn test_single_pixel_window() {
        let (mut panel, log) = panel();
        Pixel(Point::new(300, 10), Rgb565::BLACK)
            .draw(&mut panel)
            .unwrap();

        let log = log.borrow();
        assert_eq!(log[0], Bus::Cmd(cmd::CASET));
        assert_eq!(log[1], Bus::Data(std::vec![0x01, 0x2C, 0x01, 0x2C]));
        assert_eq!(log[2], Bus::Cmd(cmd::PASET));
        assert_eq!(log[3], Bus::Data(std::vec![0x00, 0x0A, 0x00, 0x0A]));
        assert_eq!(log[4], Bus::Cmd(cmd::RAMWR));
        assert_eq!(log[5], Bus::Data(std::vec![0x00, 0x00]));
    }

    #[test]
    fn test_off_panel_pixels_skipped() {
        let (mut panel, log) = panel();
        Pixel(Point::new(320, 0), Rgb565::BLACK)
            .draw(&mut panel)
            .unwrap();
        Pixel(Point::new(-1, 5), Rgb565::BLACK)
            .draw(&mut panel)
            .unwrap();

        assert!(log.borrow().is_empty());
    }

    #[test]
    fn test_fill_solid_is_clipped() {
        let (mut panel, log) = panel();
        let area = Rectangle::new(Point::new(310, 230), Size::new(20, 20));
        panel.fill_solid(&area, Rgb565::WHITE).unwrap();

        let log = log.borrow();
        assert_eq!(log[1], Bus::Data(std::vec![0x01, 0x36, 0x01, 0x3F]));
        assert_eq!(log[3], Bus::Data(std::vec![0x00, 0xE6, 0x00, 0xEF]));
        // 10×10 pixels, 2 bytes each
        assert_eq!(data_bytes(&log[5..]), 200);
        assert!(matches!(&log[5], Bus::Data(d) if d[..2] == [0xFF, 0xFF]));
    }

    #[test]
    fn test_fill_solid_off_panel_is_noop() {
        let (mut panel, log) = panel();
        let area = Rectangle::new(Point::new(400, 0), Size::new(5, 5));
        panel.fill_solid(&area, Rgb565::WHITE).unwrap();
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn test_deselected_between_commands() {
        let (mut panel, _log) = panel();
        panel.set_display_on(false).unwrap();

        let (_spi, cs, _dc, _rst) = panel.release();
        assert!(cs.level.get());
    }

    #[test]
    fn test_clear_covers_panel() {
        let (mut panel, log) = panel();
        panel.clear(Rgb565::WHITE).unwrap();
        assert_eq!(data_bytes(&log.borrow()[5..]), 320 * 240 * 2);
    }
}
