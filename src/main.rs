//! Terminal Snake runner (default binary).
//!
//! It uses crossterm for keyboard and mouse input and a custom
//! framebuffer-based renderer. The loop is single-threaded: wait for input
//! until the next step is due, dispatch it, then let the session run any due
//! step.

mod logging;

use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};
use tracing::{info, warn};

use tui_snake::core::GameSnapshot;
use tui_snake::engine::{AppConfig, Render, Session};
use tui_snake::input::{handle_key_event, should_quit, Gesture, SwipeTracker};
use tui_snake::store::JsonFileStore;
use tui_snake::term::{FrameBuffer, GameView, TerminalRenderer, ViewHit, Viewport};

/// Upper bound on how long to block for input while no step is scheduled.
const IDLE_POLL: Duration = Duration::from_millis(250);

/// Draws session frames onto the real terminal.
struct TerminalSink {
    term: TerminalRenderer,
    view: GameView,
    fb: FrameBuffer,
    viewport: Viewport,
}

impl TerminalSink {
    fn new(term: TerminalRenderer, viewport: Viewport) -> Self {
        Self {
            term,
            view: GameView::default(),
            fb: FrameBuffer::new(viewport.width, viewport.height),
            viewport,
        }
    }

    fn resize(&mut self, width: u16, height: u16) {
        self.viewport = Viewport::new(width, height);
        self.term.invalidate();
    }
}

impl Render for TerminalSink {
    type Error = anyhow::Error;

    fn render(&mut self, snap: &GameSnapshot) -> Result<()> {
        self.view.render_into(snap, self.viewport, &mut self.fb);
        self.term.draw(&self.fb)
    }
}

fn main() -> Result<()> {
    let config = AppConfig::from_env();
    if let Err(e) = logging::init(&config) {
        eprintln!("logging disabled: {e:#}");
    }

    let seed = config.seed.unwrap_or_else(clock_seed);
    info!(seed, path = %config.best_score_path.display(), "starting");

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
    let mut sink = TerminalSink::new(term, Viewport::new(w, h));
    let result = run(&config, seed, &mut sink);

    // Always try to restore terminal state.
    if let Err(e) = sink.term.exit() {
        warn!(error = %e, "failed to restore terminal");
    }
    if let Err(e) = &result {
        warn!(error = %e, "exiting with error");
    }
    result
}

fn run(config: &AppConfig, seed: u32, sink: &mut TerminalSink) -> Result<()> {
    let store = JsonFileStore::new(config.best_score_path.clone());
    let mut session = Session::new(seed, store, sink)?;
    let mut swipe = SwipeTracker::new();

    let clock = Instant::now();
    let now_ms = || clock.elapsed().as_millis() as u64;

    loop {
        let timeout = session
            .ticker()
            .remaining_ms(now_ms())
            .map_or(IDLE_POLL, Duration::from_millis);

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if should_quit(key) {
                        info!("quit requested");
                        return Ok(());
                    }
                    if let Some(action) = handle_key_event(key) {
                        session.apply(action, now_ms())?;
                    }
                }
                Event::Mouse(mouse) => match swipe.handle_mouse(mouse) {
                    Some(Gesture::Press { col, row }) => {
                        let sink = session.renderer();
                        let hit = sink.view.hit_test(sink.viewport, col, row);
                        match hit {
                            Some(ViewHit::Button(dir)) => {
                                swipe.cancel();
                                session.set_direction(dir, now_ms())?;
                            }
                            Some(ViewHit::Board) => {
                                session.nudge(now_ms())?;
                            }
                            None => {}
                        }
                    }
                    Some(Gesture::Swipe(dir)) => {
                        session.set_direction(dir, now_ms())?;
                    }
                    Some(Gesture::Tap { .. }) | None => {}
                },
                Event::Resize(w, h) => {
                    session.renderer_mut().resize(w, h);
                    session.redraw()?;
                }
                _ => {}
            }
        }

        session.tick(now_ms())?;
    }
}

fn clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| (d.as_nanos() as u32) ^ (d.as_secs() as u32))
        .unwrap_or(1)
}
