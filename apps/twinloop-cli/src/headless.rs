use std::collections::VecDeque;

use anyhow::ensure;
use twinloop_common::{Color, Vector2D};
use twinloop_input::{EventSource, MouseButton, PlatformEvent};
use twinloop_render::{Rect, Surface, TextureId};

/// Per-frame draw call counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    pub lines: usize,
    pub copies: usize,
}

/// Display without a window: draw calls go to `tracing`, input comes from a script.
///
/// Scripted click `i` arrives after frame `i + 1` is presented; once `frames` frames
/// have been shown the display reports `Quit`, as closing a window would.
pub struct TraceDisplay {
    width: u32,
    height: u32,
    frames: u64,
    presented: u64,
    clicks: VecDeque<Vector2D>,
    pending: VecDeque<PlatformEvent>,
    color: Color,
    current: FrameStats,
    last: FrameStats,
}

impl TraceDisplay {
    pub fn open(
        width: u32,
        height: u32,
        frames: u64,
        clicks: Vec<Vector2D>,
    ) -> anyhow::Result<Self> {
        ensure!(width > 0 && height > 0, "cannot open a {width}x{height} display");
        ensure!(frames > 0, "display must show at least one frame");
        tracing::info!(width, height, frames, "headless display opened");
        Ok(Self {
            width,
            height,
            frames,
            presented: 0,
            clicks: clicks.into(),
            pending: VecDeque::new(),
            color: Color::BLACK,
            current: FrameStats::default(),
            last: FrameStats::default(),
        })
    }

    pub fn presented(&self) -> u64 {
        self.presented
    }

    /// Counts for the most recently presented frame.
    pub fn last_frame(&self) -> FrameStats {
        self.last
    }
}

impl Surface for TraceDisplay {
    fn set_draw_color(&mut self, color: Color) {
        self.color = color;
    }

    fn draw_line(&mut self, from: Vector2D, to: Vector2D) {
        self.current.lines += 1;
        tracing::trace!(
            x0 = from.x,
            y0 = from.y,
            x1 = to.x,
            y1 = to.y,
            color = ?self.color,
            "line"
        );
    }

    fn copy_texture(&mut self, texture: TextureId, src: Rect, dst: Rect, angle_degrees: f64) {
        self.current.copies += 1;
        tracing::trace!(texture = texture.0, ?src, ?dst, angle_degrees, "copy");
    }

    fn clear(&mut self) {
        self.current = FrameStats::default();
    }

    fn present(&mut self) {
        self.presented += 1;
        self.last = std::mem::take(&mut self.current);
        tracing::debug!(
            frame = self.presented,
            lines = self.last.lines,
            copies = self.last.copies,
            "frame presented"
        );

        if let Some(click) = self.clicks.pop_front() {
            self.pending.push_back(PlatformEvent::MouseButtonDown {
                button: MouseButton::Left,
                x: click.x,
                y: click.y,
            });
        }
        if self.presented >= self.frames {
            self.pending.push_back(PlatformEvent::Quit);
        }
    }
}

impl EventSource for TraceDisplay {
    fn poll_event(&mut self) -> Option<PlatformEvent> {
        self.pending.pop_front()
    }
}

impl Drop for TraceDisplay {
    fn drop(&mut self) {
        let last = self.last_frame();
        tracing::info!(
            width = self.width,
            height = self.height,
            presented = self.presented(),
            last_lines = last.lines,
            last_copies = last.copies,
            "headless display closed"
        );
    }
}
