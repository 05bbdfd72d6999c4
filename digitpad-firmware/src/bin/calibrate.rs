//! digitpad link calibration
//!
//! Alternate firmware for bringing up the inference device without a touch
//! panel. Sends one of the fixed calibration patterns over the sample link
//! once a second; the power button advances to the next pattern.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_futures::select::{select, Either};
use embassy_rp::gpio::{Input, Pull};
use embassy_rp::uart::UartTx;
use embassy_time::Timer;
use {defmt_rtt as _, panic_probe as _};

use digitpad_core::link::SampleLink;
use digitpad_hal::uart::UartConfig;
use digitpad_hal_rp2040::uart::embassy_config;
use digitpad_hal_rp2040::BlockingUartTx;
use digitpad_protocol::Pattern;

#[path = "../config.rs"]
mod config;

/// Time between repeats of the current pattern
const RESEND_MS: u64 = 1000;

/// Contact bounce settle time
const DEBOUNCE_MS: u64 = 30;

#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    info!("digitpad link calibration starting...");

    let p = embassy_rp::init(Default::default());
    let link_config = config::load().link;

    let line = UartConfig::SAMPLE_LINK.with_baudrate(link_config.baudrate);
    let uart = UartTx::new_blocking(p.UART1, p.PIN_4, embassy_config(&line));
    let mut link = SampleLink::new(BlockingUartTx::new(uart, link_config.write_timeout_ms));
    let mut button = Input::new(p.PIN_15, Pull::Up);

    let mut pattern = Pattern::Blank;
    info!("Sending {} every {} ms", pattern, RESEND_MS);

    loop {
        match link.send_frame(&pattern.frame()) {
            Ok(report) => {
                debug!(
                    "Sent {}: {} bytes, {} pending",
                    pattern, report.bytes_written, report.pending
                );
            }
            Err(e) => {
                warn!("Failed to send {}: {}", pattern, e);
            }
        }

        if let Either::Second(()) =
            select(Timer::after_millis(RESEND_MS), button.wait_for_falling_edge()).await
        {
            Timer::after_millis(DEBOUNCE_MS).await;
            if button.is_low() {
                pattern = pattern.next();
                info!("Switched to {}", pattern);
            }
        }
    }
}
