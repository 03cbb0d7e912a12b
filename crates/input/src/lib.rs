//! Terminal input module (engine-facing).
//!
//! This module is intentionally independent of any UI framework. It maps
//! `crossterm` key events into [`crate::types::GameAction`] and classifies
//! pointer drags into swipe directions.

pub mod map;
pub mod swipe;

pub use tui_snake_types as types;

pub use map::{handle_key_event, should_quit};
pub use swipe::{classify_swipe, Gesture, SwipeTracker};
