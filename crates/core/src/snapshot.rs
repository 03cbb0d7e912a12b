use arrayvec::ArrayVec;

use crate::types::{Direction, GameStatus, Point, BOARD_CELLS, INITIAL_TICK_MS};

/// Read-only copy of everything a renderer needs.
///
/// Snake segments are stored head first. The buffer is stack-allocated so a
/// caller can keep one snapshot and refill it every frame via
/// [`GameState::snapshot_into`](crate::GameState::snapshot_into).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GameSnapshot {
    pub snake: ArrayVec<Point, BOARD_CELLS>,
    pub food: Option<Point>,
    pub direction: Direction,
    pub status: GameStatus,
    pub score: u32,
    pub best_score: u32,
    pub tick_ms: u32,
    pub episode_id: u32,
    pub steps: u32,
}

impl GameSnapshot {
    pub fn clear(&mut self) {
        self.snake.clear();
        self.food = None;
        self.direction = Direction::Right;
        self.status = GameStatus::NotStarted;
        self.score = 0;
        self.best_score = 0;
        self.tick_ms = INITIAL_TICK_MS;
        self.episode_id = 0;
        self.steps = 0;
    }

    pub fn head(&self) -> Option<Point> {
        self.snake.first().copied()
    }

    pub fn is_dead(&self) -> bool {
        self.status == GameStatus::Dead
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        let mut s = Self {
            snake: ArrayVec::new(),
            food: None,
            direction: Direction::Right,
            status: GameStatus::NotStarted,
            score: 0,
            best_score: 0,
            tick_ms: INITIAL_TICK_MS,
            episode_id: 0,
            steps: 0,
        };
        s.clear();
        s
    }
}
