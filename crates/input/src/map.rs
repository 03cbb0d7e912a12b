//! Key mapping from terminal events to game actions.

use crate::types::{Direction, GameAction};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Map keyboard input to game actions.
///
/// Arrows and WASD steer; quit keys map to `None` (check [`should_quit`] first);
/// any other key is a [`GameAction::Nudge`], which only matters while the game
/// waits to be started or restarted.
pub fn handle_key_event(key: KeyEvent) -> Option<GameAction> {
    if should_quit(key) {
        return None;
    }

    match key.code {
        KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') => {
            Some(GameAction::Steer(Direction::Up))
        }
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => {
            Some(GameAction::Steer(Direction::Down))
        }
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => {
            Some(GameAction::Steer(Direction::Left))
        }
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => {
            Some(GameAction::Steer(Direction::Right))
        }

        // Bare modifier presses are not "a key" for starting purposes.
        KeyCode::Modifier(_) | KeyCode::Null => None,

        _ => Some(GameAction::Nudge),
    }
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(
        key.code,
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc
    ) || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}
