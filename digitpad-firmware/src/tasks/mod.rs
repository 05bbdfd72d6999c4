//! Embassy async tasks
//!
//! Each task runs independently and communicates via channels/signals.

pub mod controller;
pub mod power;
pub mod touch;

pub use controller::controller_task;
pub use power::power_task;
pub use touch::touch_task;
