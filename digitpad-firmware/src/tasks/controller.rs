//! Capture controller task
//!
//! Owns the capture session, the display and the link. Touch events are
//! handled strictly in arrival order, so a save always completes before the
//! next touch is looked at.

use defmt::*;
use embassy_futures::select::{select, Either};
use embassy_time::Timer;

use digitpad_core::{CaptureSession, Outcome, SaveOutcome, TouchEvent};
use digitpad_hal::OutputPin;

use crate::board::{Backlight, Display, Link};
use crate::channels::{SHUTDOWN, TOUCH_CHANNEL};

/// Controller task - drives the session from touch events
#[embassy_executor::task]
pub async fn controller_task(
    session: &'static mut CaptureSession,
    mut display: Display,
    mut link: Link,
    mut backlight: Backlight,
) {
    info!("Controller task started");

    match session.build_ui(&mut display) {
        Ok(()) => info!("UI drawn, {} buttons", session.config().buttons.len()),
        Err(e) => error!("Failed to draw UI: {}", e),
    }
    backlight.set_high();

    loop {
        match select(TOUCH_CHANNEL.receive(), SHUTDOWN.wait()).await {
            Either::First(event) => {
                if handle_event(session, event, &mut display, &mut link) {
                    drain_stale_touches();
                }
            }
            Either::Second(()) => break,
        }
    }

    info!("Shutting down");
    if let Err(e) = session.shutdown(&mut display, &mut backlight) {
        warn!("Failed to blank display: {}", e);
    }
    info!("Capture halted, display off");

    loop {
        Timer::after_secs(60).await;
        trace!("Halted heartbeat");
    }
}

/// Handle one event; returns true if it ran a save
fn handle_event(
    session: &mut CaptureSession,
    event: TouchEvent,
    display: &mut Display,
    link: &mut Link,
) -> bool {
    match session.handle(event, display, link) {
        Ok(Outcome::Drew(p)) => {
            trace!("Ink at {}", p);
            false
        }
        Ok(Outcome::OutOfBounds(p)) => {
            trace!("Touch outside drawing area: {}", p);
            false
        }
        Ok(Outcome::StrokeEnded) => {
            trace!("Stroke ended");
            false
        }
        Ok(Outcome::Frozen) => {
            debug!("Input frozen, touch ignored");
            false
        }
        Ok(Outcome::ButtonHeld) => {
            trace!("Button still held, waiting for release");
            false
        }
        Ok(Outcome::Cleared) => {
            info!("Canvas cleared");
            false
        }
        Ok(Outcome::Saved(outcome)) => {
            report_save(outcome);
            true
        }
        Err(e) => {
            warn!("Display error: {}", e);
            false
        }
    }
}

fn report_save<E: Format>(outcome: SaveOutcome<E>) {
    match outcome {
        SaveOutcome::Sent { region, report } => {
            info!(
                "Sample sent from {}: {} bytes, {} pending",
                region, report.bytes_written, report.pending
            );
            info!("Canvas reset");
        }
        SaveOutcome::NoDrawing => {
            warn!("No drawing found, nothing sent");
        }
        SaveOutcome::LinkFailed(e) => {
            error!("Sample not sent, canvas kept: {}", e);
        }
    }
}

/// Discard touches queued while the save was running
fn drain_stale_touches() {
    let mut dropped: u32 = 0;
    while TOUCH_CHANNEL.try_receive().is_ok() {
        dropped += 1;
    }
    if dropped > 0 {
        debug!("Discarded {} touches queued during save", dropped);
    }
}
