//! Game state module - manages the complete game state
//!
//! This module ties together the board, the snake body, food placement and the
//! tick interval. It handles direction latching, stepping, growth, self-collision
//! and the game lifecycle. Timers and persistence are left to the caller; see
//! [`Ticker`](crate::Ticker) and the engine's `Session`.

use std::collections::VecDeque;

use arrayvec::ArrayVec;
use tracing::debug;

use crate::board::Board;
use crate::rng::SimpleRng;
use crate::snapshot::GameSnapshot;
use crate::types::*;

/// Result of a direction request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirectionOutcome {
    /// 180° reversal of the current direction; nothing changed
    Rejected,
    /// Stored as the pending direction of a running game
    Latched,
    /// Stored as the pending direction and the game left `NotStarted`
    Started,
    /// The game was over; the board has been re-initialised
    Restarted,
}

/// Result of a single step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// The game is not running; nothing happened
    Idle,
    /// Advanced one cell, length unchanged
    Moved,
    /// Advanced onto food and grew by one
    Ate {
        score: u32,
        tick_ms: u32,
        /// Whether `tick_ms` changed on this step
        sped_up: bool,
    },
    /// Ran into its own body
    Died { score: u32, new_best: bool },
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    board: Board,
    /// Segments, head first.
    snake: VecDeque<Point>,
    direction: Direction,
    pending: Direction,
    food: Option<Point>,
    score: u32,
    best_score: u32,
    status: GameStatus,
    tick_ms: u32,
    /// Monotonic game id (increments on every re-initialisation).
    episode_id: u32,
    /// Steps taken in the current game.
    steps: u32,
    rng: SimpleRng,
}

impl GameState {
    /// Create a new game with the given RNG seed
    pub fn new(seed: u32) -> Self {
        Self::with_best_score(seed, 0)
    }

    /// Create a new game, carrying a best score recorded by an earlier process.
    pub fn with_best_score(seed: u32, best_score: u32) -> Self {
        let mut state = Self {
            board: Board::new(),
            snake: VecDeque::with_capacity(BOARD_CELLS),
            direction: Direction::Right,
            pending: Direction::Right,
            food: None,
            score: 0,
            best_score,
            status: GameStatus::NotStarted,
            tick_ms: INITIAL_TICK_MS,
            episode_id: 0,
            steps: 0,
            rng: SimpleRng::new(seed),
        };
        state.reset_board();
        state
    }

    /// Start a fresh game on the same session.
    ///
    /// The best score and RNG stream carry over; everything else is reset.
    pub fn init(&mut self) {
        self.episode_id = self.episode_id.wrapping_add(1);
        self.reset_board();
        debug!(episode_id = self.episode_id, "game initialised");
    }

    fn reset_board(&mut self) {
        self.board.clear();
        self.snake.clear();

        let mid_x = (BOARD_COLS / 2) as i16;
        let mid_y = (BOARD_ROWS / 2) as i16;
        for i in 0..INITIAL_LENGTH as i16 {
            let p = Point::new(mid_x - i, mid_y);
            self.snake.push_back(p);
            self.board.set_occupied(p, true);
        }

        self.direction = Direction::Right;
        self.pending = Direction::Right;
        self.score = 0;
        self.status = GameStatus::NotStarted;
        self.tick_ms = INITIAL_TICK_MS;
        self.steps = 0;
        self.place_food();
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn best_score(&self) -> u32 {
        self.best_score
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn pending_direction(&self) -> Direction {
        self.pending
    }

    pub fn food(&self) -> Option<Point> {
        self.food
    }

    pub fn head(&self) -> Option<Point> {
        self.snake.front().copied()
    }

    pub fn snake(&self) -> &VecDeque<Point> {
        &self.snake
    }

    pub fn len(&self) -> usize {
        self.snake.len()
    }

    pub fn tick_ms(&self) -> u32 {
        self.tick_ms
    }

    pub fn episode_id(&self) -> u32 {
        self.episode_id
    }

    pub fn steps(&self) -> u32 {
        self.steps
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Request a new travel direction.
    ///
    /// - A finished game is re-initialised instead (the requested direction is dropped).
    ///   This is checked before the reversal rule, so the reverse of the last
    ///   direction also restarts a dead game.
    /// - An exact reversal of the current direction is ignored, so a single
    ///   keypress can never fold the head back into the neck.
    /// - Otherwise the direction is latched and applied on the next step; a game
    ///   that had not started yet starts running.
    pub fn set_direction(&mut self, dir: Direction) -> DirectionOutcome {
        match self.status {
            GameStatus::Dead => {
                self.init();
                DirectionOutcome::Restarted
            }
            _ if dir == self.direction.opposite() => DirectionOutcome::Rejected,
            GameStatus::NotStarted => {
                self.pending = dir;
                self.status = GameStatus::Running;
                debug!(direction = dir.as_str(), "game started");
                DirectionOutcome::Started
            }
            GameStatus::Running => {
                self.pending = dir;
                DirectionOutcome::Latched
            }
        }
    }

    /// Advance the snake by one cell.
    pub fn step(&mut self) -> StepOutcome {
        if self.status != GameStatus::Running {
            return StepOutcome::Idle;
        }
        let Some(head) = self.head() else {
            return StepOutcome::Idle;
        };

        self.direction = self.pending;
        let next = head.step(self.direction);

        // The tail has not moved yet, so stepping into it counts as a collision.
        if self.board.is_occupied(next) {
            self.status = GameStatus::Dead;
            let new_best = self.score > self.best_score;
            if new_best {
                self.best_score = self.score;
            }
            debug!(score = self.score, new_best, "snake collided with itself");
            return StepOutcome::Died {
                score: self.score,
                new_best,
            };
        }

        self.snake.push_front(next);
        self.board.set_occupied(next, true);
        self.steps = self.steps.wrapping_add(1);

        if self.food == Some(next) {
            self.score += 1;
            let sped_up = self.tick_ms > MIN_TICK_MS;
            if sped_up {
                self.tick_ms = (self.tick_ms - TICK_DECREMENT_MS).max(MIN_TICK_MS);
            }
            self.place_food();
            return StepOutcome::Ate {
                score: self.score,
                tick_ms: self.tick_ms,
                sped_up,
            };
        }

        if let Some(tail) = self.snake.pop_back() {
            self.board.set_occupied(tail, false);
        }
        StepOutcome::Moved
    }

    /// Put food on a uniformly random free cell, or remove it if the board is full.
    fn place_food(&mut self) {
        let mut free = ArrayVec::<Point, BOARD_CELLS>::new();
        self.board.free_cells_into(&mut free);
        self.food = self.rng.pick(&free);
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        out.snake.clear();
        out.snake.extend(self.snake.iter().copied());
        out.food = self.food;
        out.direction = self.direction;
        out.status = self.status;
        out.score = self.score;
        out.best_score = self.best_score;
        out.tick_ms = self.tick_ms;
        out.episode_id = self.episode_id;
        out.steps = self.steps;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    /// Replace the snake body (head first) and set both current and pending direction.
    ///
    /// Food that ends up under the new body is moved to a free cell.
    /// Out-of-bounds and duplicate segments are dropped.
    #[cfg(any(test, feature = "test-util"))]
    pub fn debug_set_snake(&mut self, body: &[Point], dir: Direction) {
        self.board.clear();
        self.snake.clear();
        for &p in body {
            if p.in_bounds() && !self.board.is_occupied(p) {
                self.board.set_occupied(p, true);
                self.snake.push_back(p);
            }
        }
        self.direction = dir;
        self.pending = dir;
        if self.food.map_or(true, |f| self.board.is_occupied(f)) {
            self.place_food();
        }
    }

    /// Move the food to `p`. Returns false (and leaves food untouched) if `p` is
    /// out of bounds or under the snake.
    #[cfg(any(test, feature = "test-util"))]
    pub fn debug_set_food(&mut self, p: Point) -> bool {
        if !p.in_bounds() || self.board.is_occupied(p) {
            return false;
        }
        self.food = Some(p);
        true
    }

    #[cfg(any(test, feature = "test-util"))]
    pub fn debug_set_status(&mut self, status: GameStatus) {
        self.status = status;
    }

    #[cfg(any(test, feature = "test-util"))]
    pub fn debug_set_score(&mut self, score: u32) {
        self.score = score;
    }

    #[cfg(any(test, feature = "test-util"))]
    pub fn debug_set_tick_ms(&mut self, tick_ms: u32) {
        self.tick_ms = tick_ms;
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn running(seed: u32) -> GameState {
        let mut state = GameState::new(seed);
        assert_eq!(state.set_direction(Direction::Right), DirectionOutcome::Started);
        state
    }

    fn body(points: &[(i16, i16)]) -> Vec<Point> {
        points.iter().map(|&(x, y)| Point::new(x, y)).collect()
    }

    fn assert_invariants(state: &GameState) {
        let mut seen = std::collections::HashSet::new();
        for p in state.snake() {
            assert!(p.in_bounds(), "segment {:?} out of bounds", p);
            assert!(seen.insert(*p), "duplicate segment {:?}", p);
            assert!(state.board().is_occupied(*p));
        }
        assert_eq!(state.board().occupied_count(), state.len());
        if let Some(food) = state.food() {
            assert!(food.in_bounds());
            assert!(!state.board().is_occupied(food), "food under snake");
        }
    }

    #[test]
    fn test_new_game_state() {
        let state = GameState::new(12345);

        assert_eq!(state.status(), GameStatus::NotStarted);
        assert_eq!(state.score(), 0);
        assert_eq!(state.tick_ms(), INITIAL_TICK_MS);
        assert_eq!(state.direction(), Direction::Right);
        assert_eq!(state.pending_direction(), Direction::Right);
        assert_eq!(state.episode_id(), 0);
        assert_eq!(
            state.snake().iter().copied().collect::<Vec<_>>(),
            body(&[(10, 10), (9, 10), (8, 10)])
        );
        assert!(state.food().is_some());
        assert_invariants(&state);
    }

    #[test]
    fn test_step_is_idle_before_start() {
        let mut state = GameState::new(1);
        let before = state.snapshot();
        assert_eq!(state.step(), StepOutcome::Idle);
        assert_eq!(state.snapshot(), before);
    }

    #[test]
    fn test_first_direction_starts_game() {
        let mut state = GameState::new(1);
        assert_eq!(state.set_direction(Direction::Up), DirectionOutcome::Started);
        assert_eq!(state.status(), GameStatus::Running);
        assert_eq!(state.pending_direction(), Direction::Up);
        // Current direction only changes on the next step.
        assert_eq!(state.direction(), Direction::Right);
    }

    #[test]
    fn test_reversal_before_start_does_not_start() {
        let mut state = GameState::new(1);
        assert_eq!(state.set_direction(Direction::Left), DirectionOutcome::Rejected);
        assert_eq!(state.status(), GameStatus::NotStarted);
    }

    #[test]
    fn test_reversal_rejected_while_running() {
        let mut state = running(1);
        assert_eq!(state.set_direction(Direction::Left), DirectionOutcome::Rejected);
        assert_eq!(state.pending_direction(), Direction::Right);
        state.step();
        assert_eq!(state.direction(), Direction::Right);
    }

    #[test]
    fn test_pending_applied_once_per_step() {
        let mut state = running(1);
        assert_eq!(state.set_direction(Direction::Up), DirectionOutcome::Latched);
        // Down is the reverse of Up but not of the current direction (Right).
        assert_eq!(state.set_direction(Direction::Down), DirectionOutcome::Latched);
        state.debug_set_food(Point::new(0, 0));
        state.step();
        assert_eq!(state.direction(), Direction::Down);
        assert_eq!(state.head(), Some(Point::new(10, 11)));
    }

    #[test]
    fn test_step_moves_without_growing() {
        let mut state = running(1);
        state.debug_set_food(Point::new(0, 0));
        assert_eq!(state.step(), StepOutcome::Moved);
        assert_eq!(
            state.snake().iter().copied().collect::<Vec<_>>(),
            body(&[(11, 10), (10, 10), (9, 10)])
        );
        assert_eq!(state.score(), 0);
        assert_eq!(state.steps(), 1);
        assert_invariants(&state);
    }

    #[test]
    fn test_eating_grows_and_scores() {
        let mut state = running(1);
        state.debug_set_snake(&body(&[(10, 10), (9, 10), (8, 10)]), Direction::Right);
        assert!(state.debug_set_food(Point::new(11, 10)));

        let outcome = state.step();
        assert_eq!(
            outcome,
            StepOutcome::Ate {
                score: 1,
                tick_ms: INITIAL_TICK_MS - TICK_DECREMENT_MS,
                sped_up: true,
            }
        );
        assert_eq!(
            state.snake().iter().copied().collect::<Vec<_>>(),
            body(&[(11, 10), (10, 10), (9, 10), (8, 10)])
        );
        let food = state.food().unwrap();
        assert_ne!(food, Point::new(11, 10));
        assert_invariants(&state);
    }

    #[test]
    fn test_wraps_right_edge() {
        let mut state = running(1);
        state.debug_set_snake(&body(&[(19, 10), (18, 10), (17, 10)]), Direction::Right);
        state.debug_set_food(Point::new(5, 5));
        state.step();
        assert_eq!(state.head(), Some(Point::new(0, 10)));
        assert_invariants(&state);
    }

    #[test]
    fn test_wraps_top_edge() {
        let mut state = running(1);
        state.debug_set_snake(&body(&[(4, 0), (4, 1), (4, 2)]), Direction::Up);
        state.debug_set_food(Point::new(5, 5));
        state.step();
        assert_eq!(state.head(), Some(Point::new(4, 19)));
    }

    #[test]
    fn test_self_collision_kills() {
        let mut state = running(1);
        // A hook shape whose head points back into the body.
        state.debug_set_snake(
            &body(&[(5, 5), (6, 5), (6, 6), (5, 6), (4, 6)]),
            Direction::Down,
        );
        state.debug_set_score(4);
        let outcome = state.step();
        assert_eq!(outcome, StepOutcome::Died { score: 4, new_best: true });
        assert_eq!(state.status(), GameStatus::Dead);
        assert_eq!(state.best_score(), 4);
        // Dead board is left as it was.
        assert_eq!(state.len(), 5);
        assert_eq!(state.step(), StepOutcome::Idle);
    }

    #[test]
    fn test_moving_into_tail_is_a_collision() {
        let mut state = running(1);
        // 2x2 loop: head (5,5) moving Down runs into the tail at (5,6).
        state.debug_set_snake(&body(&[(5, 5), (6, 5), (6, 6), (5, 6)]), Direction::Down);
        assert!(matches!(state.step(), StepOutcome::Died { .. }));
    }

    #[test]
    fn test_same_direction_kept_through_step() {
        let mut state = running(1);
        state.debug_set_snake(&body(&[(5, 5), (6, 5)]), Direction::Right);
        assert_eq!(state.pending_direction(), Direction::Right);
        let _ = state.step();
        assert_eq!(state.direction(), Direction::Right);
    }

    #[test]
    fn test_lower_score_does_not_replace_best() {
        let mut state = GameState::with_best_score(3, 10);
        state.set_direction(Direction::Right);
        state.debug_set_snake(&body(&[(5, 5), (6, 5), (6, 6), (5, 6)]), Direction::Down);
        state.debug_set_score(2);
        assert_eq!(state.step(), StepOutcome::Died { score: 2, new_best: false });
        assert_eq!(state.best_score(), 10);
    }

    #[test]
    fn test_input_after_death_restarts() {
        let mut state = running(1);
        state.debug_set_snake(&body(&[(5, 5), (6, 5), (6, 6), (5, 6)]), Direction::Down);
        state.step();
        assert_eq!(state.status(), GameStatus::Dead);

        // Even a reversal restarts a finished game.
        assert_eq!(state.set_direction(Direction::Up), DirectionOutcome::Restarted);
        assert_eq!(state.status(), GameStatus::NotStarted);
        assert_eq!(state.len(), INITIAL_LENGTH);
        assert_eq!(state.score(), 0);
        assert_eq!(state.tick_ms(), INITIAL_TICK_MS);
        assert_eq!(state.direction(), Direction::Right);
        assert_eq!(state.episode_id(), 1);
        assert_invariants(&state);
    }

    #[test]
    fn test_speed_up_stops_at_floor() {
        let mut state = running(1);
        state.debug_set_tick_ms(MIN_TICK_MS + 1);
        let food = state.head().unwrap().step(Direction::Right);
        state.debug_set_food(food);
        assert!(matches!(
            state.step(),
            StepOutcome::Ate { sped_up: true, tick_ms: MIN_TICK_MS, .. }
        ));

        state.debug_set_tick_ms(MIN_TICK_MS);
        let food = state.head().unwrap().step(Direction::Right);
        state.debug_set_food(food);
        assert!(matches!(
            state.step(),
            StepOutcome::Ate { sped_up: false, tick_ms: MIN_TICK_MS, .. }
        ));
    }

    #[test]
    fn test_interval_schedule_reaches_floor_after_forty_meals() {
        let mut state = running(5);
        for _ in 0..60 {
            state.debug_set_snake(&body(&[(10, 10), (9, 10), (8, 10)]), Direction::Right);
            assert!(state.debug_set_food(Point::new(11, 10)));
            assert!(matches!(state.step(), StepOutcome::Ate { .. }));
        }
        assert_eq!(state.tick_ms(), MIN_TICK_MS);
        assert_eq!(state.tick_ms(), INITIAL_TICK_MS - 40 * TICK_DECREMENT_MS);
    }

    #[test]
    fn test_no_food_when_board_full() {
        let mut state = running(1);
        let mut all = Vec::new();
        for y in 0..BOARD_ROWS as i16 {
            let row: Vec<Point> = (0..BOARD_COLS as i16).map(|x| Point::new(x, y)).collect();
            if y % 2 == 0 {
                all.extend(row.into_iter().rev());
            } else {
                all.extend(row);
            }
        }
        state.debug_set_snake(&all, Direction::Up);
        assert!(state.food().is_none());
        assert!(state.board().is_full());
    }

    #[test]
    fn test_long_random_walk_keeps_invariants() {
        let mut state = running(42);
        let mut rng = SimpleRng::new(7);
        for _ in 0..2_000 {
            let dir = Direction::ALL[rng.next_range(4) as usize];
            let before_len = state.len();
            let before_score = state.score();
            if state.set_direction(dir) == DirectionOutcome::Restarted {
                state.set_direction(Direction::Right);
                continue;
            }
            match state.step() {
                StepOutcome::Moved => {
                    assert_eq!(state.len(), before_len);
                    assert_eq!(state.score(), before_score);
                }
                StepOutcome::Ate { score, .. } => {
                    assert_eq!(score, before_score + 1);
                    assert_eq!(state.len(), before_len + 1);
                }
                StepOutcome::Died { .. } => {
                    assert!(state.best_score() >= before_score);
                }
                StepOutcome::Idle => {}
            }
            assert_invariants(&state);
        }
    }

    #[test]
    fn test_snapshot_matches_state() {
        let state = GameState::with_best_score(9, 17);
        let snap = state.snapshot();
        assert_eq!(snap.snake.len(), INITIAL_LENGTH);
        assert_eq!(snap.head(), state.head());
        assert_eq!(snap.food, state.food());
        assert_eq!(snap.best_score, 17);
        assert_eq!(snap.status, GameStatus::NotStarted);
        assert_eq!(snap.tick_ms, INITIAL_TICK_MS);
    }
}
