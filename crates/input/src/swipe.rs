//! Swipe gestures from pointer drags.
//!
//! A press records where the pointer went down; the release classifies the
//! displacement by its dominant axis. Short displacements are taps.
//!
//! Terminal mouse reports are in character cells, which are roughly twice as
//! tall as they are wide, so cell deltas are converted to approximate
//! device-independent pixels before the distance threshold is applied.

use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};

use crate::types::{Direction, SWIPE_MIN_DISTANCE};

/// Approximate width of one terminal column in device-independent pixels.
pub const CELL_PX_W: i32 = 8;

/// Approximate height of one terminal row in device-independent pixels.
pub const CELL_PX_H: i32 = 16;

/// Classify a displacement in device-independent pixels.
///
/// Returns `None` for a tap (both axes below [`SWIPE_MIN_DISTANCE`]). Ties
/// between the axes go to the vertical axis.
pub fn classify_swipe(dx: i32, dy: i32) -> Option<Direction> {
    if dx.abs() < SWIPE_MIN_DISTANCE && dy.abs() < SWIPE_MIN_DISTANCE {
        return None;
    }
    if dx.abs() > dy.abs() {
        Some(if dx > 0 {
            Direction::Right
        } else {
            Direction::Left
        })
    } else {
        Some(if dy > 0 { Direction::Down } else { Direction::Up })
    }
}

/// What a pointer event amounted to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gesture {
    /// Pointer went down at (column, row)
    Press { col: u16, row: u16 },
    /// Pointer released far enough from the press point
    Swipe(Direction),
    /// Pointer released close to the press point
    Tap { col: u16, row: u16 },
}

/// Tracks one pointer from press to release.
#[derive(Debug, Clone, Default)]
pub struct SwipeTracker {
    start: Option<(u16, u16)>,
}

impl SwipeTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_tracking(&self) -> bool {
        self.start.is_some()
    }

    pub fn press(&mut self, col: u16, row: u16) -> Gesture {
        self.start = Some((col, row));
        Gesture::Press { col, row }
    }

    /// Finish the gesture. Returns `None` if no press was seen.
    pub fn release(&mut self, col: u16, row: u16) -> Option<Gesture> {
        let (sx, sy) = self.start.take()?;
        let dx = (col as i32 - sx as i32) * CELL_PX_W;
        let dy = (row as i32 - sy as i32) * CELL_PX_H;
        Some(match classify_swipe(dx, dy) {
            Some(dir) => Gesture::Swipe(dir),
            None => Gesture::Tap { col, row },
        })
    }

    pub fn cancel(&mut self) {
        self.start = None;
    }

    /// Feed a crossterm mouse event. Only the left button is tracked; drags in
    /// between press and release are ignored.
    pub fn handle_mouse(&mut self, ev: MouseEvent) -> Option<Gesture> {
        match ev.kind {
            MouseEventKind::Down(MouseButton::Left) => Some(self.press(ev.column, ev.row)),
            MouseEventKind::Up(MouseButton::Left) => self.release(ev.column, ev.row),
            _ => None,
        }
    }
}
