//! Board wiring
//!
//! Pico with a 2.8" ILI9341/XPT2046 module:
//!
//! | Signal        | GPIO | Peripheral |
//! |---------------|------|------------|
//! | LCD SCK       | 18   | SPI0       |
//! | LCD MOSI      | 19   | SPI0       |
//! | LCD CS        | 17   |            |
//! | LCD DC        | 20   |            |
//! | LCD RESET     | 21   |            |
//! | LCD backlight | 22   |            |
//! | Touch SCK     | 10   | SPI1       |
//! | Touch MOSI    | 11   | SPI1       |
//! | Touch MISO    | 12   | SPI1       |
//! | Touch CS      | 13   |            |
//! | Touch IRQ     | 14   | pull-up    |
//! | Link TX       | 4    | UART1      |
//! | Power button  | 15   | pull-up    |

use embassy_rp::gpio::Output;
use embassy_rp::peripherals::{SPI0, SPI1, UART1};
use embassy_rp::spi::{Blocking, Spi};

use digitpad_core::link::SampleLink;
use digitpad_drivers::{Canvas, Ili9341, Xpt2046};
use digitpad_hal_rp2040::{BlockingUartTx, Rp2040Output};

/// Panel SPI clock; the ILI9341 write cycle allows up to ~40 MHz
pub const DISPLAY_SPI_HZ: u32 = 40_000_000;

/// Touch SPI clock; the XPT2046 tops out at 2.5 MHz
pub const TOUCH_SPI_HZ: u32 = 1_000_000;

pub type Panel = Ili9341<Spi<'static, SPI0, Blocking>, Output<'static>, Output<'static>, Output<'static>>;

pub type Display = Canvas<Panel>;

pub type TouchPanel = Xpt2046<Spi<'static, SPI1, Blocking>, Output<'static>>;

pub type Link = SampleLink<BlockingUartTx<'static, UART1>>;

pub type Backlight = Rp2040Output<'static>;
