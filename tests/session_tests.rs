use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;

use tui_snake::core::{DirectionOutcome, GameSnapshot, StepOutcome};
use tui_snake::engine::{render_fn, NullRender, Session};
use tui_snake::store::{BestScoreStore, JsonFileStore, MemoryStore};
use tui_snake::types::{Direction, GameStatus, Point, INITIAL_TICK_MS, TICK_DECREMENT_MS};

fn scratch_path(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!(
        "tui-snake-session-{}-{}",
        name,
        std::process::id()
    ));
    let _ = std::fs::remove_dir_all(&dir);
    dir.join("best.json")
}

/// Drive a running session into a collision at time `now_ms`.
fn crash<S: BestScoreStore, R: tui_snake::engine::Render>(
    session: &mut Session<S, R>,
    score: u32,
    now_ms: u64,
) -> StepOutcome
where
    R::Error: std::fmt::Debug,
{
    let state = session.state_mut();
    state.debug_set_score(score);
    state.debug_set_snake(
        &[
            Point::new(5, 5),
            Point::new(6, 5),
            Point::new(6, 6),
            Point::new(5, 6),
        ],
        Direction::Down,
    );
    session.step(now_ms).unwrap()
}

#[test]
fn every_state_change_renders_a_full_frame() {
    let frames: Rc<RefCell<Vec<GameSnapshot>>> = Rc::default();
    let sink = frames.clone();
    let mut session = Session::new(
        11,
        MemoryStore::new(),
        render_fn(move |s: &GameSnapshot| sink.borrow_mut().push(s.clone())),
    )
    .unwrap();
    assert!(session.state_mut().debug_set_food(Point::new(0, 0)));

    assert_eq!(frames.borrow().len(), 1);
    assert_eq!(frames.borrow()[0].status, GameStatus::NotStarted);

    // Starting redraws; latching a turn does not.
    session.set_direction(Direction::Up, 0).unwrap();
    assert_eq!(frames.borrow().len(), 2);
    assert_eq!(
        session.set_direction(Direction::Down, 10).unwrap(),
        DirectionOutcome::Latched
    );
    assert_eq!(frames.borrow().len(), 2);

    session.tick(INITIAL_TICK_MS as u64).unwrap();
    let frames = frames.borrow();
    assert_eq!(frames.len(), 3);
    let last = frames.last().unwrap();
    assert_eq!(last.snake.len(), 3);
    assert_eq!(last.head(), Some(Point::new(10, 11)));
    assert_eq!(last.direction, Direction::Down);
}

#[test]
fn ticks_follow_the_interval() {
    let mut session = Session::new(3, MemoryStore::new(), NullRender).unwrap();
    assert!(session.state_mut().debug_set_food(Point::new(0, 0)));
    assert_eq!(session.tick(10_000).unwrap(), None);

    session.set_direction(Direction::Down, 1_000).unwrap();
    assert_eq!(session.next_deadline_ms(), Some(1_200));
    assert_eq!(session.tick(1_199).unwrap(), None);
    assert!(session.tick(1_200).unwrap().is_some());
    assert_eq!(session.tick(1_200).unwrap(), None);
    assert_eq!(session.next_deadline_ms(), Some(1_400));
}

#[test]
fn eating_reschedules_at_new_speed() {
    let mut session = Session::new(3, MemoryStore::new(), NullRender).unwrap();
    session.set_direction(Direction::Right, 0).unwrap();
    assert!(session.state_mut().debug_set_food(Point::new(11, 10)));

    let outcome = session.tick(200).unwrap();
    assert!(matches!(outcome, Some(StepOutcome::Ate { sped_up: true, .. })));
    let interval = INITIAL_TICK_MS - TICK_DECREMENT_MS;
    assert_eq!(session.ticker().interval_ms(), interval);
    assert_eq!(session.next_deadline_ms(), Some(200 + interval as u64));
}

#[test]
fn death_stops_timer_and_nudge_restarts() {
    let mut session = Session::new(3, MemoryStore::new(), NullRender).unwrap();
    session.set_direction(Direction::Right, 0).unwrap();

    let outcome = crash(&mut session, 4, 50);
    assert_eq!(
        outcome,
        StepOutcome::Died {
            score: 4,
            new_best: true
        }
    );
    assert_eq!(session.status(), GameStatus::Dead);
    assert_eq!(session.next_deadline_ms(), None);
    assert_eq!(session.store().value(), Some(4));

    assert_eq!(session.nudge(60).unwrap(), Some(DirectionOutcome::Restarted));
    assert_eq!(session.status(), GameStatus::NotStarted);
    assert_eq!(session.next_deadline_ms(), None);

    assert_eq!(session.nudge(70).unwrap(), Some(DirectionOutcome::Started));
    assert_eq!(session.next_deadline_ms(), Some(70 + INITIAL_TICK_MS as u64));

    // Nudges do nothing mid-game.
    assert_eq!(session.nudge(80).unwrap(), None);
}

#[test]
fn worse_score_is_not_saved() {
    let mut session = Session::new(3, MemoryStore::with_value(10), NullRender).unwrap();
    assert_eq!(session.state().best_score(), 10);
    session.set_direction(Direction::Right, 0).unwrap();

    crash(&mut session, 3, 10);
    assert_eq!(session.store().saves(), 0);
    assert_eq!(session.state().best_score(), 10);
}

#[test]
fn broken_store_does_not_stop_play() {
    let mut session = Session::new(3, MemoryStore::unreadable(), NullRender).unwrap();
    assert_eq!(session.state().best_score(), 0);
    session.set_direction(Direction::Right, 0).unwrap();
    crash(&mut session, 2, 10);
    assert_eq!(session.state().best_score(), 2);
}

#[test]
fn best_score_survives_across_sessions() {
    let path = scratch_path("persist");

    {
        let mut session = Session::new(1, JsonFileStore::new(&path), NullRender).unwrap();
        assert_eq!(session.state().best_score(), 0);
        session.set_direction(Direction::Right, 0).unwrap();
        crash(&mut session, 12, 10);
    }

    let raw = std::fs::read_to_string(&path).unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(value["best_score"], 12);

    let session = Session::new(2, JsonFileStore::new(&path), NullRender).unwrap();
    assert_eq!(session.state().best_score(), 12);

    let _ = std::fs::remove_dir_all(path.parent().unwrap());
}

#[test]
fn sessions_are_independent() {
    let mut a = Session::new(1, MemoryStore::new(), NullRender).unwrap();
    let mut b = Session::new(1, MemoryStore::new(), NullRender).unwrap();

    a.set_direction(Direction::Up, 0).unwrap();
    a.tick(200).unwrap();

    assert_eq!(a.status(), GameStatus::Running);
    assert_eq!(b.status(), GameStatus::NotStarted);
    assert_eq!(b.tick(200).unwrap(), None);
    assert_eq!(b.state().head(), Some(Point::new(10, 10)));
    assert_eq!(a.state().head(), Some(Point::new(10, 9)));
}
