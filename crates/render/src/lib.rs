//! Rendering Adapter: retained 2D shapes and the device-agnostic surface they draw on.
//!
//! # Invariants
//! - Device point = model point * transform + translate, for every shape.
//! - A circle's segments always reflect its current center, radius and side count.
//! - Sprites never own the textures they reference.

mod circle;
mod line;
mod shape;
mod sprite;
mod surface;

pub use circle::Circle;
pub use line::Line;
pub use shape::{GeometryError, Shape};
pub use sprite::Sprite;
pub use surface::{DrawCommand, DrawList, DrawnLine, Rect, Surface, TextureId};

pub fn crate_info() -> &'static str {
    "twinloop-render v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("render"));
    }
}
