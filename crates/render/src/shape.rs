use twinloop_common::{Color, Vector2D};

use crate::circle::Circle;
use crate::line::Line;
use crate::sprite::Sprite;
use crate::surface::Surface;

/// Errors raised when shape geometry would be degenerate.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GeometryError {
    #[error("a circle needs at least one side, got {0}")]
    InvalidSides(u32),
    #[error("circle radius must be finite and non-negative, got {0}")]
    InvalidRadius(f64),
}

/// Every drawable the renderer knows about. The set is closed.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Line(Line),
    Circle(Circle),
    Sprite(Sprite),
}

impl Shape {
    /// Draw through `point * transform + translate`; no rotation or shear is applied
    /// to the view.
    pub fn draw(&self, transform: Vector2D, translate: Vector2D, surface: &mut dyn Surface) {
        match self {
            Shape::Line(line) => line.draw(transform, translate, surface),
            Shape::Circle(circle) => circle.draw(transform, translate, surface),
            Shape::Sprite(sprite) => sprite.draw(transform, translate, surface),
        }
    }

    pub fn color(&self) -> Color {
        match self {
            Shape::Line(line) => line.color(),
            Shape::Circle(circle) => circle.color(),
            Shape::Sprite(sprite) => sprite.color(),
        }
    }

    pub fn set_color(&mut self, color: Color) {
        match self {
            Shape::Line(line) => line.set_color(color),
            Shape::Circle(circle) => circle.set_color(color),
            Shape::Sprite(sprite) => sprite.set_color(color),
        }
    }

    pub fn as_circle_mut(&mut self) -> Option<&mut Circle> {
        match self {
            Shape::Circle(circle) => Some(circle),
            _ => None,
        }
    }

    pub fn as_sprite_mut(&mut self) -> Option<&mut Sprite> {
        match self {
            Shape::Sprite(sprite) => Some(sprite),
            _ => None,
        }
    }
}

impl From<Line> for Shape {
    fn from(line: Line) -> Self {
        Shape::Line(line)
    }
}

impl From<Circle> for Shape {
    fn from(circle: Circle) -> Self {
        Shape::Circle(circle)
    }
}

impl From<Sprite> for Shape {
    fn from(sprite: Sprite) -> Self {
        Shape::Sprite(sprite)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::{DrawCommand, DrawList, Rect, TextureId};

    #[test]
    fn dispatches_to_each_variant() {
        let shapes: Vec<Shape> = vec![
            Line::new(Vector2D::ZERO, Vector2D::ONE, Color::WHITE).into(),
            Circle::new(Vector2D::ZERO, 5.0, 3, Color::RED).unwrap().into(),
            Sprite::new(TextureId(1), Rect::new(0, 0, 4, 4), Vector2D::ONE, 0.0).into(),
        ];
        let mut list = DrawList::new();
        for shape in &shapes {
            shape.draw(Vector2D::ONE, Vector2D::ZERO, &mut list);
        }
        assert_eq!(list.lines().len(), 1 + 3);
        let textures = list
            .commands()
            .iter()
            .filter(|c| matches!(c, DrawCommand::Texture { .. }))
            .count();
        assert_eq!(textures, 1);
    }

    #[test]
    fn set_color_through_enum() {
        let mut shape: Shape = Circle::new(Vector2D::ZERO, 1.0, 6, Color::RED).unwrap().into();
        shape.set_color(Color::GREEN);
        assert_eq!(shape.color(), Color::GREEN);
        let circle = shape.as_circle_mut().unwrap();
        assert!(circle.segments().iter().all(|s| s.color() == Color::GREEN));
    }

    #[test]
    fn variant_accessors() {
        let mut line: Shape = Line::new(Vector2D::ZERO, Vector2D::ONE, Color::WHITE).into();
        assert!(line.as_circle_mut().is_none());
        assert!(line.as_sprite_mut().is_none());
    }

    #[test]
    fn error_messages() {
        assert!(GeometryError::InvalidSides(0).to_string().contains("at least one side"));
        assert!(GeometryError::InvalidRadius(-1.0).to_string().contains("-1"));
    }
}
