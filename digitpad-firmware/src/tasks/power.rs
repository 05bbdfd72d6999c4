//! Power button task

use defmt::*;
use embassy_rp::gpio::Input;
use embassy_time::Timer;

use crate::channels::SHUTDOWN;

/// Contact bounce settle time
const DEBOUNCE_MS: u64 = 30;

/// Power button task - signals shutdown on a debounced press
#[embassy_executor::task]
pub async fn power_task(mut button: Input<'static>) {
    info!("Power button task started");

    loop {
        button.wait_for_falling_edge().await;
        Timer::after_millis(DEBOUNCE_MS).await;

        if button.is_low() {
            info!("Power button pressed");
            SHUTDOWN.signal(());
            return;
        }
    }
}
