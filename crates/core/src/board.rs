//! Board module - snake occupancy grid
//!
//! The board is a 20x20 torus. It only tracks which cells the snake occupies;
//! the snake's order lives in [`GameState`](crate::GameState).
//! Uses a flat array for cache locality and zero-allocation collision checks.
//! Coordinates: (x, y) where x ranges 0..19 (left to right), y ranges 0..19 (top to bottom)

use arrayvec::ArrayVec;

use crate::types::{Point, BOARD_CELLS, BOARD_COLS};

/// The game board - 20 columns x 20 rows using flat array storage
#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    /// Flat occupancy array, row-major order (y * COLS + x)
    occupied: [bool; BOARD_CELLS],
    occupied_count: usize,
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Self {
            occupied: [false; BOARD_CELLS],
            occupied_count: 0,
        }
    }

    #[inline(always)]
    fn index(p: Point) -> Option<usize> {
        if !p.in_bounds() {
            return None;
        }
        Some((p.y as usize) * (BOARD_COLS as usize) + (p.x as usize))
    }

    /// Check if a cell is covered by a snake segment.
    /// Out-of-bounds points are never occupied.
    pub fn is_occupied(&self, p: Point) -> bool {
        Self::index(p).map(|i| self.occupied[i]).unwrap_or(false)
    }

    /// Mark a cell as covered or free.
    /// Returns false if out of bounds
    pub fn set_occupied(&mut self, p: Point, value: bool) -> bool {
        let Some(i) = Self::index(p) else {
            return false;
        };
        if self.occupied[i] != value {
            self.occupied[i] = value;
            if value {
                self.occupied_count += 1;
            } else {
                self.occupied_count -= 1;
            }
        }
        true
    }

    pub fn occupied_count(&self) -> usize {
        self.occupied_count
    }

    pub fn is_full(&self) -> bool {
        self.occupied_count == BOARD_CELLS
    }

    /// Clear the entire board
    pub fn clear(&mut self) {
        self.occupied = [false; BOARD_CELLS];
        self.occupied_count = 0;
    }

    /// Collect every free cell in row-major order into `out`.
    ///
    /// `out` is cleared first. Stack-only, no allocation.
    pub fn free_cells_into(&self, out: &mut ArrayVec<Point, BOARD_CELLS>) {
        out.clear();
        for (i, &taken) in self.occupied.iter().enumerate() {
            if !taken {
                let x = (i % BOARD_COLS as usize) as i16;
                let y = (i / BOARD_COLS as usize) as i16;
                out.push(Point::new(x, y));
            }
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
