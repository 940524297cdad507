use twinloop_common::{Color, Vector2D};

use crate::surface::Surface;

/// A single colored segment in model space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Line {
    start: Vector2D,
    end: Vector2D,
    color: Color,
}

impl Line {
    pub fn new(start: Vector2D, end: Vector2D, color: Color) -> Self {
        Self { start, end, color }
    }

    pub fn start(&self) -> Vector2D {
        self.start
    }

    pub fn end(&self) -> Vector2D {
        self.end
    }

    pub fn set_start(&mut self, start: Vector2D) {
        self.start = start;
    }

    pub fn set_end(&mut self, end: Vector2D) {
        self.end = end;
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    /// Both endpoints go through `point * transform + translate` independently.
    pub fn draw(&self, transform: Vector2D, translate: Vector2D, surface: &mut dyn Surface) {
        surface.set_draw_color(self.color);
        surface.draw_line(
            self.start.to_device(transform, translate),
            self.end.to_device(transform, translate),
        );
    }
}
