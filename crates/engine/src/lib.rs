//! Game session engine.
//!
//! Wires the pure [`core`] model to its side effects: the step timer, the
//! best-score store and a render callback. A [`Session`] is an explicit,
//! caller-owned object, so several independent games can run side by side
//! and tests need no global fixtures.
//!
//! # Example
//!
//! ```
//! use tui_snake_engine::{render_fn, Session};
//! use tui_snake_store::MemoryStore;
//! use tui_snake_types::{Direction, GameStatus};
//!
//! let mut frames = Vec::new();
//! let mut session = Session::new(7, MemoryStore::new(), render_fn(|s| frames.push(s.status)))
//!     .unwrap();
//!
//! session.set_direction(Direction::Down, 0).unwrap();
//! assert_eq!(session.status(), GameStatus::Running);
//! assert_eq!(session.next_deadline_ms(), Some(200));
//!
//! session.tick(200).unwrap();
//! drop(session);
//! assert_eq!(frames.len(), 3); // initial frame, start, first step
//! ```

pub mod config;
pub mod render;
pub mod session;

pub use tui_snake_core as core;
pub use tui_snake_store as store;
pub use tui_snake_types as types;

pub use config::AppConfig;
pub use render::{render_fn, NullRender, Render, RenderFn};
pub use session::Session;
