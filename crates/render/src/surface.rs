use twinloop_common::{Color, Vector2D};

/// Handle to an image resource in an externally owned texture table.
///
/// Holding a `TextureId` never keeps the image alive and dropping one never frees it;
/// the asset layer that created the texture decides its lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TextureId(pub u32);

/// Integer pixel rectangle, used for sprite source and destination regions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: u32,
    pub h: u32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, w: u32, h: u32) -> Self {
        Self { x, y, w, h }
    }
}

/// Device drawing contract. Every backend (window, headless, recorder) implements this.
///
/// Coordinates passed in are already in device space.
pub trait Surface {
    /// Set the color used by subsequent `draw_line` and `clear` calls.
    fn set_draw_color(&mut self, color: Color);

    /// Draw a straight segment between two device-space points.
    fn draw_line(&mut self, from: Vector2D, to: Vector2D);

    /// Copy `src` of `texture` into `dst`, rotated clockwise by `angle_degrees`
    /// around the destination's center.
    fn copy_texture(&mut self, texture: TextureId, src: Rect, dst: Rect, angle_degrees: f64);

    /// Fill the whole frame with the current draw color.
    fn clear(&mut self);

    /// Show the finished frame.
    fn present(&mut self);
}

/// A single recorded surface call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    SetColor(Color),
    Line {
        from: Vector2D,
        to: Vector2D,
    },
    Texture {
        texture: TextureId,
        src: Rect,
        dst: Rect,
        angle_degrees: f64,
    },
    Clear,
    Present,
}

/// A segment as it was drawn, with the color that was active at the time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawnLine {
    pub color: Color,
    pub from: Vector2D,
    pub to: Vector2D,
}

/// Surface that records every call so a frame can be inspected or replayed later.
///
/// This is the unit of exchange between the simulation thread (which records a world
/// into it) and the presentation thread (which replays it onto the real device).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DrawList {
    commands: Vec<DrawCommand>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Every recorded line, resolved against the draw color active when it was issued.
    pub fn lines(&self) -> Vec<DrawnLine> {
        let mut color = Color::BLACK;
        let mut out = Vec::new();
        for cmd in &self.commands {
            match cmd {
                DrawCommand::SetColor(c) => color = *c,
                DrawCommand::Line { from, to } => out.push(DrawnLine {
                    color,
                    from: *from,
                    to: *to,
                }),
                _ => {}
            }
        }
        out
    }

    /// Reissue the recorded calls on another surface.
    ///
    /// `Present` is not forwarded: frame boundaries belong to whoever owns the device.
    pub fn replay(&self, surface: &mut dyn Surface) {
        for cmd in &self.commands {
            match *cmd {
                DrawCommand::SetColor(color) => surface.set_draw_color(color),
                DrawCommand::Line { from, to } => surface.draw_line(from, to),
                DrawCommand::Texture {
                    texture,
                    src,
                    dst,
                    angle_degrees,
                } => surface.copy_texture(texture, src, dst, angle_degrees),
                DrawCommand::Clear => surface.clear(),
                DrawCommand::Present => {}
            }
        }
    }
}

impl Surface for DrawList {
    fn set_draw_color(&mut self, color: Color) {
        self.commands.push(DrawCommand::SetColor(color));
    }

    fn draw_line(&mut self, from: Vector2D, to: Vector2D) {
        self.commands.push(DrawCommand::Line { from, to });
    }

    fn copy_texture(&mut self, texture: TextureId, src: Rect, dst: Rect, angle_degrees: f64) {
        self.commands.push(DrawCommand::Texture {
            texture,
            src,
            dst,
            angle_degrees,
        });
    }

    fn clear(&mut self) {
        self.commands.push(DrawCommand::Clear);
    }

    fn present(&mut self) {
        self.commands.push(DrawCommand::Present);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lines_pick_up_active_color() {
        let mut list = DrawList::new();
        list.draw_line(Vector2D::ZERO, Vector2D::ONE);
        list.set_draw_color(Color::RED);
        list.draw_line(Vector2D::ONE, Vector2D::new(2.0, 2.0));

        let lines = list.lines();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].color, Color::BLACK);
        assert_eq!(lines[1].color, Color::RED);
        assert_eq!(lines[1].to, Vector2D::new(2.0, 2.0));
    }

    #[test]
    fn replay_copies_everything_but_present() {
        let mut recorded = DrawList::new();
        recorded.set_draw_color(Color::BLUE);
        recorded.clear();
        recorded.draw_line(Vector2D::ZERO, Vector2D::ONE);
        recorded.copy_texture(TextureId(3), Rect::new(0, 0, 8, 8), Rect::new(1, 2, 8, 8), 90.0);
        recorded.present();

        let mut target = DrawList::new();
        recorded.replay(&mut target);

        assert_eq!(target.len(), 4);
        assert_eq!(&recorded.commands()[..4], target.commands());
        assert!(!target.commands().contains(&DrawCommand::Present));
    }

    #[test]
    fn empty_list() {
        let list = DrawList::new();
        assert!(list.is_empty());
        assert!(list.lines().is_empty());
    }
}
