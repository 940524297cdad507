use twinloop_common::{Color, Vector2D};

use crate::surface::{Rect, Surface, TextureId};

/// An image region drawn at a transformed position, optionally rotated.
///
/// The view scales where a sprite lands but never its size: the destination is always
/// as large as the source rectangle. `angle` is in radians with 0 pointing up.
#[derive(Debug, Clone, PartialEq)]
pub struct Sprite {
    texture: TextureId,
    src: Rect,
    position: Vector2D,
    angle: f64,
    color: Color,
}

impl Sprite {
    pub fn new(texture: TextureId, src: Rect, position: Vector2D, angle: f64) -> Self {
        Self {
            texture,
            src,
            position,
            angle,
            color: Color::BLACK,
        }
    }

    pub fn texture(&self) -> TextureId {
        self.texture
    }

    pub fn source(&self) -> Rect {
        self.src
    }

    pub fn position(&self) -> Vector2D {
        self.position
    }

    pub fn set_position(&mut self, position: Vector2D) {
        self.position = position;
    }

    pub fn angle(&self) -> f64 {
        self.angle
    }

    pub fn set_angle(&mut self, angle: f64) {
        self.angle = angle;
    }

    /// Stored for the shape contract; textures are copied unmodulated.
    pub fn color(&self) -> Color {
        self.color
    }

    pub fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    /// Device rotation in degrees, `(degrees(angle) - 90) mod 360`, in `[0, 360)`.
    pub fn rotation_degrees(&self) -> f64 {
        let degrees = (self.angle.to_degrees() - 90.0).rem_euclid(360.0);
        // rem_euclid can round up to exactly 360 for tiny negative inputs
        if degrees >= 360.0 { 0.0 } else { degrees }
    }

    /// Destination rectangle: transformed origin (truncated), source-sized.
    pub fn destination(&self, transform: Vector2D, translate: Vector2D) -> Rect {
        let origin = self.position.to_device(transform, translate);
        Rect::new(origin.x as i32, origin.y as i32, self.src.w, self.src.h)
    }

    pub fn draw(&self, transform: Vector2D, translate: Vector2D, surface: &mut dyn Surface) {
        surface.copy_texture(
            self.texture,
            self.src,
            self.destination(transform, translate),
            self.rotation_degrees(),
        );
    }
}
