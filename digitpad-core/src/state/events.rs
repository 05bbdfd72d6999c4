//! Input events consumed by the session

/// Raw input from the touch controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TouchEvent {
    /// Pen down or moving, in controller (portrait) coordinates
    Touch { x: u16, y: u16 },
    /// Pen lifted; the next touch starts a new stroke
    Release,
}

impl TouchEvent {
    pub const fn touch(x: u16, y: u16) -> Self {
        TouchEvent::Touch { x, y }
    }
}
