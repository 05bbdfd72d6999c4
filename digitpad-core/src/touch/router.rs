//! Hit-testing and input gating

use heapless::Vec;

use super::area::{Action, TouchArea};
use crate::config::ConfigError;
use crate::framebuffer::CANVAS;
use crate::geometry::{Point, Rect};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Maximum number of registered UI regions
pub const MAX_TOUCH_AREAS: usize = 4;

/// Where strokes are accepted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum DrawBound {
    /// Anywhere on the canvas
    #[default]
    Canvas,
    /// Only inside this window
    Window(Rect),
}

impl DrawBound {
    /// The accepting region as a rectangle
    pub const fn rect(&self) -> Rect {
        match self {
            DrawBound::Canvas => CANVAS,
            DrawBound::Window(rect) => *rect,
        }
    }

    pub const fn contains(&self, p: Point) -> bool {
        self.rect().contains(p)
    }
}

/// Routing decision for one touch sample
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Route {
    /// Input is frozen; the sample is discarded
    Frozen,
    /// The sample landed on a UI region
    Action(Action),
    /// The sample continues the current stroke
    Draw(Point),
    /// Outside every region and outside the drawing bound
    OutOfBounds(Point),
}

/// Ordered (region, action) registry plus the drawing bound
#[derive(Debug, Clone)]
pub struct TouchRouter {
    areas: Vec<TouchArea, MAX_TOUCH_AREAS>,
    draw_bound: DrawBound,
}

impl TouchRouter {
    pub fn new(draw_bound: DrawBound) -> Self {
        Self {
            areas: Vec::new(),
            draw_bound,
        }
    }

    /// Register a region. Earlier registrations win on overlap.
    pub fn register(&mut self, area: TouchArea) -> Result<(), ConfigError> {
        self.areas
            .push(area)
            .map_err(|_| ConfigError::TooManyTouchAreas)
    }

    pub fn areas(&self) -> &[TouchArea] {
        &self.areas
    }

    pub fn draw_bound(&self) -> DrawBound {
        self.draw_bound
    }

    /// The touch controller is mounted rotated; its X axis is screen Y
    pub const fn transpose(raw_x: u16, raw_y: u16) -> Point {
        Point::new(raw_y as i32, raw_x as i32)
    }

    /// Decide what a raw touch sample means
    pub fn route(&self, raw_x: u16, raw_y: u16, frozen: bool) -> Route {
        if frozen {
            return Route::Frozen;
        }

        let p = Self::transpose(raw_x, raw_y);

        if let Some(action) = self.areas.iter().find_map(|area| area.hit(p)) {
            return Route::Action(action);
        }

        if self.draw_bound.contains(p) {
            Route::Draw(p)
        } else {
            Route::OutOfBounds(p)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn router() -> TouchRouter {
        let mut router = TouchRouter::new(DrawBound::Window(Rect::square(140, 100, 28)));
        router
            .register(TouchArea::new(Rect::square(248, 176, 64), Action::Send))
            .unwrap();
        router
    }

    #[test]
    fn test_frozen_ignores_everything() {
        let router = router();
        // Raw (200, 260) lands on the button once transposed
        assert_eq!(router.route(200, 260, true), Route::Frozen);
        assert_eq!(router.route(110, 150, true), Route::Frozen);
    }

    #[test]
    fn test_coordinates_are_transposed() {
        let router = router();
        assert_eq!(router.route(110, 150, false), Route::Draw(Point::new(150, 110)));
    }

    #[test]
    fn test_button_hit() {
        let router = router();
        assert_eq!(router.route(200, 260, false), Route::Action(Action::Send));
    }

    #[test]
    fn test_outside_window_dropped() {
        let router = router();
        assert_eq!(
            router.route(10, 10, false),
            Route::OutOfBounds(Point::new(10, 10))
        );
    }

    #[test]
    fn test_window_edges_half_open() {
        let bound = DrawBound::Window(Rect::square(140, 100, 28));
        assert!(bound.contains(Point::new(140, 100)));
        assert!(bound.contains(Point::new(167, 127)));
        assert!(!bound.contains(Point::new(168, 110)));
        assert!(!bound.contains(Point::new(139, 110)));
        assert!(!bound.contains(Point::new(150, 128)));

        let router = router();
        assert_eq!(router.route(100, 140, false), Route::Draw(Point::new(140, 100)));
        assert_eq!(router.route(110, 167, false), Route::Draw(Point::new(167, 110)));
        assert_eq!(
            router.route(110, 168, false),
            Route::OutOfBounds(Point::new(168, 110))
        );
    }

    #[test]
    fn test_first_registered_area_wins() {
        let mut router = TouchRouter::new(DrawBound::Canvas);
        router
            .register(TouchArea::new(Rect::square(0, 0, 50), Action::Clear))
            .unwrap();
        router
            .register(TouchArea::new(Rect::square(25, 25, 50), Action::Send))
            .unwrap();

        assert_eq!(router.route(30, 30, false), Route::Action(Action::Clear));
        assert_eq!(router.route(60, 60, false), Route::Action(Action::Send));
    }

    #[test]
    fn test_button_beats_canvas() {
        let mut router = TouchRouter::new(DrawBound::Canvas);
        router
            .register(TouchArea::new(Rect::square(280, 208, 32), Action::Send))
            .unwrap();
        assert_eq!(router.route(220, 290, false), Route::Action(Action::Send));
        assert_eq!(router.route(100, 100, false), Route::Draw(Point::new(100, 100)));
    }

    #[test]
    fn test_canvas_bound_rejects_off_canvas() {
        let router = TouchRouter::new(DrawBound::Canvas);
        assert_eq!(
            router.route(10, 330, false),
            Route::OutOfBounds(Point::new(330, 10))
        );
    }

    #[test]
    fn test_registry_capacity() {
        let mut router = TouchRouter::new(DrawBound::Canvas);
        for i in 0..MAX_TOUCH_AREAS {
            router
                .register(TouchArea::new(Rect::square(i as i32 * 10, 0, 10), Action::Send))
                .unwrap();
        }
        assert_eq!(
            router.register(TouchArea::new(Rect::square(0, 100, 10), Action::Clear)),
            Err(ConfigError::TooManyTouchAreas)
        );
    }
}
