//! Switched outputs

/// A push-pull output such as the display backlight
///
/// Levels are logical: an active-low implementation drives the pin low
/// from `set_high`.
pub trait OutputPin {
    /// Drive the output to its active level
    fn set_high(&mut self);

    /// Drive the output to its inactive level
    fn set_low(&mut self);

    /// Logical level last driven
    fn is_set_high(&self) -> bool;
}
