//! Touch polling task
//!
//! Sleeps on the XPT2046 pen interrupt, then polls the controller while the
//! pen stays down. Every accepted reading becomes a `Touch` event; lifting
//! the pen after at least one accepted reading sends `Release`.

use defmt::*;
use embassy_rp::gpio::Input;
use embassy_time::{Duration, Ticker};

use digitpad_core::TouchEvent;

use crate::board::TouchPanel;
use crate::channels::TOUCH_CHANNEL;

/// Poll period while the pen is down
const POLL_MS: u64 = 20;

/// Touch task - turns pen activity into touch events
#[embassy_executor::task]
pub async fn touch_task(mut touch: TouchPanel, mut pen_irq: Input<'static>) {
    info!("Touch task started");

    loop {
        pen_irq.wait_for_low().await;

        let mut ticker = Ticker::every(Duration::from_millis(POLL_MS));
        let mut pen_down = false;

        while pen_irq.is_low() {
            match touch.read() {
                Ok(Some((x, y))) => {
                    pen_down = true;
                    let event = TouchEvent::touch(x, y);
                    // Drop moves rather than stall the poll loop
                    if TOUCH_CHANNEL.try_send(event).is_err() {
                        warn!("Touch channel full, dropping {}", event);
                    }
                }
                Ok(None) => {
                    // Pen up between samples or a noisy reading
                }
                Err(e) => {
                    warn!("Touch read failed: {}", e);
                }
            }
            ticker.next().await;
        }

        if pen_down {
            trace!("Pen lifted");
            TOUCH_CHANNEL.send(TouchEvent::Release).await;
        }
    }
}
