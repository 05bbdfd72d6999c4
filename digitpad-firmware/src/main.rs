//! digitpad - touch digit capture firmware
//!
//! Main firmware binary for an RP2040 driving a 320×240 ILI9341 panel
//! with an XPT2046 touch controller. The user draws a digit with a stylus;
//! pressing the send button packs it into a 28×28 sample and writes it to
//! the inference device over UART1.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_rp::spi::{self, Spi};
use embassy_rp::uart::UartTx;
use embassy_time::Delay;
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use digitpad_core::link::SampleLink;
use digitpad_core::{CaptureConfig, CaptureSession};
use digitpad_drivers::{Canvas, Ili9341, Xpt2046};
use digitpad_hal::uart::UartConfig;
use digitpad_hal_rp2040::uart::embassy_config;
use digitpad_hal_rp2040::{BlockingUartTx, Rp2040Output};

mod board;
mod channels;
mod config;
mod tasks;

// The session holds the 9.6 KB canvas; keep it out of the task futures
static SESSION: StaticCell<CaptureSession> = StaticCell::new();

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("digitpad firmware starting...");

    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    let config = config::load();
    let link_config = config.link;

    // Panel on SPI0 (transmit only)
    let mut display_spi_config = spi::Config::default();
    display_spi_config.frequency = board::DISPLAY_SPI_HZ;
    let display_spi = Spi::new_blocking_txonly(p.SPI0, p.PIN_18, p.PIN_19, display_spi_config);

    let mut panel = Ili9341::new(
        display_spi,
        Output::new(p.PIN_17, Level::High),
        Output::new(p.PIN_20, Level::Low),
        Output::new(p.PIN_21, Level::High),
    );
    if let Err(e) = panel.init(&mut Delay) {
        error!("Display init failed: {}", e);
    }
    let display = Canvas::new(panel);
    let backlight = Rp2040Output::new(Output::new(p.PIN_22, Level::Low));

    info!("Display initialized");

    // Touch controller on SPI1
    let mut touch_spi_config = spi::Config::default();
    touch_spi_config.frequency = board::TOUCH_SPI_HZ;
    let touch_spi = Spi::new_blocking(p.SPI1, p.PIN_10, p.PIN_11, p.PIN_12, touch_spi_config);
    let touch = Xpt2046::new(touch_spi, Output::new(p.PIN_13, Level::High));
    let pen_irq = Input::new(p.PIN_14, Pull::Up);

    info!("Touch controller initialized");

    // Sample link on UART1, always 8N1
    let line = UartConfig::SAMPLE_LINK.with_baudrate(link_config.baudrate);
    let uart = UartTx::new_blocking(p.UART1, p.PIN_4, embassy_config(&line));
    let link = SampleLink::new(BlockingUartTx::new(uart, link_config.write_timeout_ms));

    info!(
        "Link initialized: {} baud, {} ms write timeout",
        line.baudrate, link_config.write_timeout_ms
    );

    let power_button = Input::new(p.PIN_15, Pull::Up);

    let session = match CaptureSession::new(config) {
        Ok(session) => session,
        Err(e) => {
            warn!("Config rejected by session: {}", e);
            // The built-in layout always validates
            unwrap!(CaptureSession::new(CaptureConfig::default()))
        }
    };
    let session = SESSION.init(session);

    // Spawn tasks
    spawner.spawn(tasks::touch_task(touch, pen_irq)).unwrap();
    spawner.spawn(tasks::power_task(power_button)).unwrap();
    spawner
        .spawn(tasks::controller_task(session, display, link, backlight))
        .unwrap();

    info!("All tasks spawned, ready to draw");
}
