use std::collections::VecDeque;

use twinloop_common::Vector2D;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Middle,
    Right,
}

/// A raw event as reported by the windowing platform.
#[derive(Debug, Clone, PartialEq)]
pub enum PlatformEvent {
    /// The user asked to close the window.
    Quit,
    /// Pointer button pressed at surface coordinates.
    MouseButtonDown { button: MouseButton, x: f64, y: f64 },
    MouseButtonUp { button: MouseButton, x: f64, y: f64 },
    KeyDown { key: String },
    /// Anything the core does not care about (focus, resize, motion...).
    Other,
}

/// Source of platform events. Polling consumes: an event is returned once.
pub trait EventSource {
    fn poll_event(&mut self) -> Option<PlatformEvent>;
}

impl EventSource for VecDeque<PlatformEvent> {
    fn poll_event(&mut self) -> Option<PlatformEvent> {
        self.pop_front()
    }
}

/// Discrete event kinds the world can react to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    MouseClick,
}

/// An input event in the shape the world consumes it: a kind plus a surface position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InputEvent {
    pub kind: EventKind,
    pub position: Vector2D,
}

impl InputEvent {
    pub fn mouse_click(x: f64, y: f64) -> Self {
        Self {
            kind: EventKind::MouseClick,
            position: Vector2D::new(x, y),
        }
    }
}

/// What the presentation loop should do with a platform event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Translated {
    /// Stop presenting and begin shutdown.
    Quit,
    /// Forward to the world.
    Input(InputEvent),
    /// Drop it.
    Ignored,
}

/// Map a platform event onto the world's event vocabulary.
///
/// Only a left-button press becomes a `MouseClick`.
pub fn translate(event: PlatformEvent) -> Translated {
    match event {
        PlatformEvent::Quit => Translated::Quit,
        PlatformEvent::MouseButtonDown {
            button: MouseButton::Left,
            x,
            y,
        } => Translated::Input(InputEvent::mouse_click(x, y)),
        other => {
            tracing::trace!(event = ?other, "ignored platform event");
            Translated::Ignored
        }
    }
}
