//! Core game logic module - pure, deterministic, and testable
//!
//! This module contains the game rules, state management, and simulation logic.
//! It has **zero dependencies** on terminal I/O or storage, making it:
//!
//! - **Deterministic**: Same seed produces identical games
//! - **Testable**: Every rule is exercised headlessly
//! - **Portable**: Can run in any environment (terminal, GUI, headless)
//!
//! # Module Structure
//!
//! - [`board`]: 20x20 occupancy grid with flat-array collision checks
//! - [`game_state`]: Snake body, direction latching, stepping, food and lifecycle
//! - [`rng`]: Seeded LCG used for uniform food placement
//! - [`snapshot`]: Read-only state copy handed to renderers
//! - [`ticker`]: Single periodic step timer with idempotent rescheduling
//!
//! # Game Rules
//!
//! - **Wraparound**: Edges are not walls; the head re-enters from the opposite side
//! - **Latched Direction**: Input sets a pending direction applied once per step
//! - **No Reversal**: A 180° turn request is ignored
//! - **Growth**: Eating food adds one segment and one point
//! - **Speed-up**: Each meal shortens the step interval by 3ms, down to 80ms
//! - **Death**: Only by running into the snake's own body
//!
//! # Example
//!
//! ```
//! use tui_snake_core::{GameState, StepOutcome};
//! use tui_snake_types::{Direction, GameStatus};
//!
//! let mut game = GameState::new(12345);
//! assert_eq!(game.status(), GameStatus::NotStarted);
//!
//! // The first accepted direction starts the game.
//! game.set_direction(Direction::Up);
//! assert_eq!(game.status(), GameStatus::Running);
//!
//! let outcome = game.step();
//! assert!(matches!(outcome, StepOutcome::Moved | StepOutcome::Ate { .. }));
//! assert_eq!(game.direction(), Direction::Up);
//! ```

pub mod board;
pub mod game_state;
pub mod rng;
pub mod snapshot;
pub mod ticker;

pub use tui_snake_types as types;

// Re-export commonly used types for convenience
pub use board::Board;
pub use game_state::{DirectionOutcome, GameState, StepOutcome};
pub use rng::SimpleRng;
pub use snapshot::GameSnapshot;
pub use ticker::Ticker;
