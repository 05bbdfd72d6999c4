//! Touch-sensitive UI regions

use crate::geometry::{Point, Rect};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// What a UI region does when touched
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Action {
    /// Extract the drawing and transmit it
    Send,
    /// Wipe the canvas without sending
    Clear,
}

/// A rectangle bound to one action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TouchArea {
    pub bounds: Rect,
    pub action: Action,
}

impl TouchArea {
    pub const fn new(bounds: Rect, action: Action) -> Self {
        Self { bounds, action }
    }

    /// The bound action, if `p` falls inside this area
    pub fn hit(&self, p: Point) -> Option<Action> {
        self.bounds.contains(p).then_some(self.action)
    }
}
