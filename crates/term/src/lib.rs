//! Terminal "game renderer" module.
//!
//! This is a small, game-oriented rendering layer for terminal gameplay.
//! It avoids widget/layout libraries and instead renders into a simple
//! framebuffer that is flushed to the terminal as a full redraw.
//!
//! Each board cell is drawn 2 characters wide so cells look square.

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use tui_snake_core as core;
pub use tui_snake_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{GameView, Layout, ViewHit, Viewport, MAX_CELL_SCALE};
pub use renderer::{encode_full_into, TerminalRenderer};
