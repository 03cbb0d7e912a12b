//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the application.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (core logic, terminal rendering, input mapping).
//!
//! # Board Dimensions
//!
//! - **Columns**: 20 (indexed 0-19)
//! - **Rows**: 20 (indexed 0-19)
//! - **Spawn**: head at (10, 10), body trailing to the left
//!
//! The board is a torus: leaving one edge re-enters from the opposite edge.
//!
//! # Game Timing Constants
//!
//! Timing values are in milliseconds:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `INITIAL_TICK_MS` | 200 | Step interval of a fresh game |
//! | `TICK_DECREMENT_MS` | 3 | Interval reduction per food eaten |
//! | `MIN_TICK_MS` | 80 | Speed-up stops once the interval reaches this floor |
//!
//! # Examples
//!
//! ```
//! use tui_snake_types::{Direction, Point, BOARD_COLS, BOARD_ROWS};
//!
//! let dir = Direction::Up;
//! assert_eq!(dir.opposite(), Direction::Down);
//! assert_eq!(dir.delta(), (0, -1));
//!
//! let head = Point::new(19, 10);
//! assert_eq!(head.step(Direction::Right), Point::new(0, 10));
//!
//! assert_eq!(BOARD_COLS, 20);
//! assert_eq!(BOARD_ROWS, 20);
//! ```

/// Board width in cells (20 columns)
pub const BOARD_COLS: u8 = 20;

/// Board height in cells (20 rows)
pub const BOARD_ROWS: u8 = 20;

/// Total number of cells on the board.
pub const BOARD_CELLS: usize = (BOARD_COLS as usize) * (BOARD_ROWS as usize);

/// Length of the snake at the start of every game.
pub const INITIAL_LENGTH: usize = 3;

/// Step interval of a fresh game (200ms)
pub const INITIAL_TICK_MS: u32 = 200;

/// Interval reduction applied each time food is eaten (3ms)
pub const TICK_DECREMENT_MS: u32 = 3;

/// Interval floor; no speed-up is applied once the interval is at or below it (80ms)
pub const MIN_TICK_MS: u32 = 80;

/// Minimum pointer displacement, in device-independent pixels, for a drag to count as a swipe.
pub const SWIPE_MIN_DISTANCE: i32 = 10;


/// Travel direction of the snake.
///
/// Each variant is a unit vector on the board; screen coordinates grow
/// rightwards (x) and downwards (y).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Unit vector `(dx, dy)` for this direction
    pub fn delta(&self) -> (i16, i16) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    /// The direction rotated by 180°
    pub fn opposite(&self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// Lowercase name, used as a log field.
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        }
    }
}

/// A cell coordinate on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Point {
    pub x: i16,
    pub y: i16,
}

impl Point {
    pub const fn new(x: i16, y: i16) -> Self {
        Self { x, y }
    }

    /// Move one cell in `dir`, wrapping around the board edges.
    pub fn step(self, dir: Direction) -> Self {
        let (dx, dy) = dir.delta();
        Self {
            x: wrap(self.x + dx, BOARD_COLS as i16),
            y: wrap(self.y + dy, BOARD_ROWS as i16),
        }
    }

    /// Whether the point lies inside `[0, COLS) x [0, ROWS)`.
    pub fn in_bounds(&self) -> bool {
        self.x >= 0 && self.x < BOARD_COLS as i16 && self.y >= 0 && self.y < BOARD_ROWS as i16
    }
}

#[inline]
fn wrap(v: i16, extent: i16) -> i16 {
    v.rem_euclid(extent)
}

/// Lifecycle of a single game.
///
/// - **NotStarted**: fresh board, waiting for the first direction input
/// - **Running**: the tick timer is live and the snake advances every step
/// - **Dead**: the snake ran into itself; the next input starts a fresh board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GameStatus {
    #[default]
    NotStarted,
    Running,
    Dead,
}

impl GameStatus {
    /// Whether a generic tap/click/key should (re)start the game.
    pub fn awaits_start(&self) -> bool {
        matches!(self, GameStatus::NotStarted | GameStatus::Dead)
    }
}

/// Inputs that drive a game session.
///
/// Every input surface (keys, swipes, on-screen buttons, clicks) is reduced to
/// one of these before it reaches the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    /// Request a new travel direction
    Steer(Direction),
    /// Non-directional tap/click/key: starts or restarts when the game is idle
    Nudge,
}
