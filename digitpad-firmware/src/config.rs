//! Baked capture configuration
//!
//! build.rs validates digitpad.toml on the host and embeds it as postcard
//! bytes, so the device decodes it without a heap or a TOML parser.

use defmt::*;
use digitpad_core::CaptureConfig;

/// digitpad.toml, encoded at build time
static BAKED_CONFIG: &[u8] = include_bytes!(concat!(env!("OUT_DIR"), "/capture_config.bin"));

/// Decode the baked configuration
///
/// Falls back to the built-in windowed layout if the blob does not decode
/// or no longer validates.
pub fn load() -> CaptureConfig {
    let config = match postcard::from_bytes::<CaptureConfig>(BAKED_CONFIG) {
        Ok(config) => config,
        Err(e) => {
            warn!("Baked config unreadable: {}", Debug2Format(&e));
            warn!("Using built-in layout");
            return CaptureConfig::default();
        }
    };

    match config.validate() {
        Ok(()) => {
            info!(
                "Loaded baked config: {} buttons, {} baud",
                config.buttons.len(),
                config.link.baudrate
            );
            config
        }
        Err(e) => {
            warn!("Baked config invalid: {}", e);
            warn!("Using built-in layout");
            CaptureConfig::default()
        }
    }
}
