//! Inter-task communication channels

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use embassy_sync::signal::Signal;

use digitpad_core::TouchEvent;

/// Channel capacity for touch events
const TOUCH_CHANNEL_SIZE: usize = 8;

/// Debounced touch events from the touch task to the controller
pub static TOUCH_CHANNEL: Channel<CriticalSectionRawMutex, TouchEvent, TOUCH_CHANNEL_SIZE> =
    Channel::new();

/// Power button pressed: blank the display and stop capturing
pub static SHUTDOWN: Signal<CriticalSectionRawMutex, ()> = Signal::new();
