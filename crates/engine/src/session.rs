//! Session: one caller-owned game with its timer, best-score store and renderer.
//!
//! The session is the only place where the pure [`GameState`] meets side
//! effects. Every mutator takes the current monotonic time in milliseconds so
//! the whole thing can be driven deterministically from tests.

use tracing::{debug, info};

use crate::core::{DirectionOutcome, GameSnapshot, GameState, StepOutcome, Ticker};
use crate::render::Render;
use crate::store::{load_or_default, save_or_warn, BestScoreStore};
use crate::types::{Direction, GameAction, GameStatus};

pub struct Session<S, R> {
    state: GameState,
    ticker: Ticker,
    store: S,
    renderer: R,
    snap: GameSnapshot,
}

impl<S: BestScoreStore, R: Render> Session<S, R> {
    /// Create a session, read the best score once, and draw the first frame.
    pub fn new(seed: u32, mut store: S, renderer: R) -> Result<Self, R::Error> {
        let best = load_or_default(&mut store);
        info!(best, seed, "session created");

        let mut session = Self {
            state: GameState::with_best_score(seed, best),
            ticker: Ticker::new(),
            store,
            renderer,
            snap: GameSnapshot::default(),
        };
        session.redraw()?;
        Ok(session)
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn status(&self) -> GameStatus {
        self.state.status()
    }

    pub fn ticker(&self) -> &Ticker {
        &self.ticker
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    /// When the next step is due, or `None` when the game is not running.
    pub fn next_deadline_ms(&self) -> Option<u64> {
        self.ticker.deadline_ms()
    }

    /// Route a reduced input to the matching entry point.
    pub fn apply(
        &mut self,
        action: GameAction,
        now_ms: u64,
    ) -> Result<Option<DirectionOutcome>, R::Error> {
        match action {
            GameAction::Steer(dir) => self.set_direction(dir, now_ms).map(Some),
            GameAction::Nudge => self.nudge(now_ms),
        }
    }

    /// Direction input from any surface.
    pub fn set_direction(
        &mut self,
        dir: Direction,
        now_ms: u64,
    ) -> Result<DirectionOutcome, R::Error> {
        let outcome = self.state.set_direction(dir);
        match outcome {
            DirectionOutcome::Started => {
                self.ticker.reschedule(self.state.tick_ms(), now_ms);
                self.redraw()?;
            }
            DirectionOutcome::Restarted => {
                self.ticker.cancel();
                self.redraw()?;
            }
            DirectionOutcome::Latched | DirectionOutcome::Rejected => {}
        }
        debug!(direction = dir.as_str(), ?outcome, "direction input");
        Ok(outcome)
    }

    /// Non-directional tap/click/key.
    ///
    /// Only acts while the game waits for a start (not started or over): it
    /// re-sends the current direction, which starts or restarts the game.
    pub fn nudge(&mut self, now_ms: u64) -> Result<Option<DirectionOutcome>, R::Error> {
        if !self.state.status().awaits_start() {
            return Ok(None);
        }
        let dir = self.state.direction();
        self.set_direction(dir, now_ms).map(Some)
    }

    /// Run a step if the timer is due. Returns `None` when nothing was due.
    pub fn tick(&mut self, now_ms: u64) -> Result<Option<StepOutcome>, R::Error> {
        if !self.ticker.poll(now_ms) {
            return Ok(None);
        }
        self.step(now_ms).map(Some)
    }

    /// Advance one step immediately, regardless of the timer.
    pub fn step(&mut self, now_ms: u64) -> Result<StepOutcome, R::Error> {
        let outcome = self.state.step();
        match outcome {
            StepOutcome::Idle => return Ok(outcome),
            StepOutcome::Moved => {}
            StepOutcome::Ate {
                score,
                tick_ms,
                sped_up,
            } => {
                if sped_up {
                    self.ticker.reschedule(tick_ms, now_ms);
                }
                debug!(score, tick_ms, "food eaten");
            }
            StepOutcome::Died { score, new_best } => {
                self.ticker.cancel();
                info!(score, new_best, "game over");
                if new_best {
                    save_or_warn(&mut self.store, score);
                }
            }
        }
        self.redraw()?;
        Ok(outcome)
    }

    /// Draw the current state again without changing it (e.g. after a resize).
    pub fn redraw(&mut self) -> Result<(), R::Error> {
        self.state.snapshot_into(&mut self.snap);
        self.renderer.render(&self.snap)
    }

    /// Mutable access to the game for scripted setups in tests.
    #[cfg(any(test, feature = "test-util"))]
    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }
}
