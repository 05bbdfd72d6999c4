//! `embedded-graphics` adapter for the core display trait

use digitpad_core::geometry::{Point, Rect};
use digitpad_core::traits::{DisplayDriver, DisplayError, Shade};
use embedded_graphics::mono_font::ascii::FONT_8X13;
use embedded_graphics::mono_font::MonoTextStyleBuilder;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{Circle, PrimitiveStyle, Rectangle};
use embedded_graphics::text::{Baseline, Text};

/// Black on white
const fn color(shade: Shade) -> Rgb565 {
    match shade {
        Shade::Ink => Rgb565::BLACK,
        Shade::Paper => Rgb565::WHITE,
    }
}

fn to_eg(p: Point) -> embedded_graphics::prelude::Point {
    embedded_graphics::prelude::Point::new(p.x, p.y)
}

fn rectangle(area: Rect) -> Rectangle {
    Rectangle::new(
        to_eg(area.origin()),
        Size::new(area.width as u32, area.height as u32),
    )
}

/// Any RGB565 draw target, seen as the capture pad display
pub struct Canvas<D> {
    target: D,
}

impl<D> Canvas<D>
where
    D: DrawTarget<Color = Rgb565>,
{
    pub fn new(target: D) -> Self {
        Self { target }
    }

    pub fn target(&self) -> &D {
        &self.target
    }

    pub fn target_mut(&mut self) -> &mut D {
        &mut self.target
    }

    pub fn release(self) -> D {
        self.target
    }
}

impl<D> DisplayDriver for Canvas<D>
where
    D: DrawTarget<Color = Rgb565>,
{
    fn clear(&mut self, shade: Shade) -> Result<(), DisplayError> {
        self.target
            .clear(color(shade))
            .map_err(|_| DisplayError::Communication)
    }

    fn fill_rect(&mut self, area: Rect, shade: Shade) -> Result<(), DisplayError> {
        rectangle(area)
            .into_styled(PrimitiveStyle::with_fill(color(shade)))
            .draw(&mut self.target)
            .map_err(|_| DisplayError::Communication)
    }

    fn draw_rect(&mut self, area: Rect, shade: Shade) -> Result<(), DisplayError> {
        rectangle(area)
            .into_styled(PrimitiveStyle::with_stroke(color(shade), 1))
            .draw(&mut self.target)
            .map_err(|_| DisplayError::Communication)
    }

    fn draw_text(
        &mut self,
        origin: Point,
        text: &str,
        fg: Shade,
        bg: Shade,
    ) -> Result<(), DisplayError> {
        let style = MonoTextStyleBuilder::new()
            .font(&FONT_8X13)
            .text_color(color(fg))
            .background_color(color(bg))
            .build();

        Text::with_baseline(text, to_eg(origin), style, Baseline::Top)
            .draw(&mut self.target)
            .map(|_| ())
            .map_err(|_| DisplayError::Communication)
    }

    fn fill_circle(
        &mut self,
        center: Point,
        radius: u16,
        shade: Shade,
    ) -> Result<(), DisplayError> {
        let diameter = 2 * radius as u32 + 1;
        Circle::with_center(to_eg(center), diameter)
            .into_styled(PrimitiveStyle::with_fill(color(shade)))
            .draw(&mut self.target)
            .map_err(|_| DisplayError::Communication)
    }

    fn set_pixel(&mut self, at: Point, shade: Shade) -> Result<(), DisplayError> {
        Pixel(to_eg(at), color(shade))
            .draw(&mut self.target)
            .map_err(|_| DisplayError::Communication)
    }
}
