//! Shared value types: 2D vectors, RGB colors, entity identifiers.
//!
//! # Invariants
//! - Values are plain `Copy` data; nothing here is shared by reference across threads.

mod types;

pub use types::{Color, EntityId, Vector2D};
