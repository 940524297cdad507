//! Input: raw platform events and the world events they turn into.
//!
//! # Invariants
//! - Each platform event is polled at most once; translation never duplicates it.
//! - The world only ever sees translated `InputEvent`s, never raw platform events.

pub mod event;

pub use event::{
    EventKind, EventSource, InputEvent, MouseButton, PlatformEvent, Translated, translate,
};
