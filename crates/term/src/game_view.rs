//! GameView: maps a `core::GameSnapshot` into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.
//!
//! Layout, left to right: the bordered board, then (when the viewport is wide
//! enough) a side panel with score, best score, speed and an on-screen d-pad.
//! Each board cell is `2k x k` characters; `k` is the largest scale up to
//! `max_scale` that fits the viewport.

use std::fmt::Write as _;

use crate::core::GameSnapshot;
use crate::fb::{Cell, CellStyle, FrameBuffer, Rgb};
use crate::types::{Direction, GameStatus, Point, BOARD_COLS, BOARD_ROWS};

/// Largest per-cell scale used by default.
pub const MAX_CELL_SCALE: u16 = 2;

/// Largest scale whose bordered frame still fits in `u16` coordinates.
const SCALE_LIMIT: u16 = (u16::MAX - 2) / (2 * BOARD_COLS as u16);

/// Width of the side panel, including its left gap.
const PANEL_W: u16 = 17;
const PANEL_GAP: u16 = 2;
const BUTTON_W: u16 = 5;

// Solarized palette.
const COL_BG: Rgb = Rgb::hex(0x073642);
const COL_GRID: Rgb = Rgb::hex(0x0a3d4a);
const COL_SNAKE: Rgb = Rgb::hex(0x859900);
const COL_HEAD: Rgb = Rgb::hex(0xb8db00);
const COL_FOOD: Rgb = Rgb::hex(0xcb4b16);
const COL_DEAD: Rgb = Rgb::hex(0xdc322f);
const COL_OVERLAY: Rgb = Rgb::hex(0x002b36);
const COL_TEXT: Rgb = Rgb::hex(0xfdf6e3);
const COL_BORDER: Rgb = Rgb::hex(0x586e75);
const COL_BUTTON: Rgb = Rgb::hex(0x0a3d4a);

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// What a pointer position lands on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewHit {
    Board,
    Button(Direction),
}

/// Resolved screen geometry for one viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    pub cell_w: u16,
    pub cell_h: u16,
    pub start_x: u16,
    pub start_y: u16,
    pub frame_w: u16,
    pub frame_h: u16,
    /// Left edge of the side panel, if it fits.
    pub panel_x: Option<u16>,
}

impl Layout {
    fn contains_frame(&self, x: u16, y: u16) -> bool {
        x >= self.start_x
            && x < self.start_x.saturating_add(self.frame_w)
            && y >= self.start_y
            && y < self.start_y.saturating_add(self.frame_h)
    }

    /// Left edge and row of each d-pad button (all buttons are `BUTTON_W` wide).
    pub fn buttons(&self) -> Option<[(Direction, u16, u16); 4]> {
        let px = self.panel_x?;
        let y = self.start_y.saturating_add(9);
        Some([
            (Direction::Up, px + BUTTON_W, y),
            (Direction::Left, px, y + 1),
            (Direction::Right, px + 2 * BUTTON_W, y + 1),
            (Direction::Down, px + BUTTON_W, y + 2),
        ])
    }
}

/// A lightweight terminal renderer for the snake game.
#[derive(Debug, Clone)]
pub struct GameView {
    max_scale: u16,
}

impl Default for GameView {
    fn default() -> Self {
        Self {
            max_scale: MAX_CELL_SCALE,
        }
    }
}

impl GameView {
    /// A view whose board never grows beyond `max_scale`.
    ///
    /// The scale is clamped to `1..=SCALE_LIMIT`, so any `u16` is accepted.
    pub fn with_max_scale(max_scale: u16) -> Self {
        Self {
            max_scale: max_scale.clamp(1, SCALE_LIMIT),
        }
    }

    pub fn layout(&self, viewport: Viewport) -> Layout {
        let mut scale = 1;
        for k in (1..=self.max_scale).rev() {
            let (fw, fh) = frame_size(k);
            if fw <= viewport.width && fh <= viewport.height {
                scale = k;
                break;
            }
        }

        let cell_w = 2 * scale;
        let cell_h = scale;
        let (frame_w, frame_h) = frame_size(scale);
        let with_panel = frame_w
            .checked_add(PANEL_W)
            .is_some_and(|w| w <= viewport.width);
        let total_w = if with_panel { frame_w + PANEL_W } else { frame_w };

        let start_x = viewport.width.saturating_sub(total_w) / 2;
        let start_y = viewport.height.saturating_sub(frame_h) / 2;

        Layout {
            cell_w,
            cell_h,
            start_x,
            start_y,
            frame_w,
            frame_h,
            panel_x: with_panel.then(|| start_x + frame_w + PANEL_GAP),
        }
    }

    /// Map a pointer position (terminal column/row) to what is drawn there.
    pub fn hit_test(&self, viewport: Viewport, col: u16, row: u16) -> Option<ViewHit> {
        let layout = self.layout(viewport);
        if let Some(buttons) = layout.buttons() {
            for (dir, bx, by) in buttons {
                if row == by && col >= bx && col < bx + BUTTON_W {
                    return Some(ViewHit::Button(dir));
                }
            }
        }
        layout.contains_frame(col, row).then_some(ViewHit::Board)
    }

    /// Render the current game state into an existing framebuffer.
    ///
    /// Every call redraws the whole viewport. Callers can reuse a framebuffer
    /// across frames and only resize when the terminal size changes.
    pub fn render_into(&self, snap: &GameSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(Cell::default());

        let layout = self.layout(viewport);
        let bg = CellStyle::new(COL_GRID, COL_BG);
        let border = CellStyle::new(COL_BORDER, Rgb::new(0, 0, 0));

        fb.fill_rect(
            layout.start_x + 1,
            layout.start_y + 1,
            layout.frame_w - 2,
            layout.frame_h - 2,
            ' ',
            bg,
        );
        self.draw_border(fb, &layout, border);

        // Grid.
        for y in 0..BOARD_ROWS as u16 {
            for x in 0..BOARD_COLS as u16 {
                let (px, py) = cell_origin(&layout, x, y);
                fb.put_char(px, py, '·', bg.dim());
            }
        }

        if let Some(food) = snap.food {
            let style = CellStyle::new(COL_FOOD, COL_BG).bold();
            self.draw_cell_marker(fb, &layout, food, '●', style);
        }

        let dead = snap.is_dead();
        for (i, &seg) in snap.snake.iter().enumerate() {
            let fg = if dead {
                COL_DEAD
            } else if i == 0 {
                COL_HEAD
            } else {
                COL_SNAKE
            };
            self.fill_cell(fb, &layout, seg, '█', CellStyle::new(fg, COL_BG));
        }

        if let Some(panel_x) = layout.panel_x {
            self.draw_side_panel(fb, snap, &layout, panel_x);
        }

        match snap.status {
            GameStatus::NotStarted => {
                self.draw_overlay(fb, &layout, "SNAKE", "Press any key or tap to start")
            }
            GameStatus::Dead => {
                let mut sub = String::with_capacity(48);
                let _ = write!(sub, "Score: {} \u{2022} Tap or press to restart", snap.score);
                self.draw_overlay(fb, &layout, "GAME OVER", &sub);
            }
            GameStatus::Running => {}
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    fn draw_border(&self, fb: &mut FrameBuffer, layout: &Layout, style: CellStyle) {
        let (x, y, w, h) = (layout.start_x, layout.start_y, layout.frame_w, layout.frame_h);

        fb.put_char(x, y, '┌', style);
        fb.put_char(x + w - 1, y, '┐', style);
        fb.put_char(x, y + h - 1, '└', style);
        fb.put_char(x + w - 1, y + h - 1, '┘', style);

        for dx in 1..w - 1 {
            fb.put_char(x + dx, y, '─', style);
            fb.put_char(x + dx, y + h - 1, '─', style);
        }
        for dy in 1..h - 1 {
            fb.put_char(x, y + dy, '│', style);
            fb.put_char(x + w - 1, y + dy, '│', style);
        }
    }

    fn fill_cell(&self, fb: &mut FrameBuffer, layout: &Layout, p: Point, ch: char, style: CellStyle) {
        if !p.in_bounds() {
            return;
        }
        let (px, py) = cell_origin(layout, p.x as u16, p.y as u16);
        fb.fill_rect(px, py, layout.cell_w, layout.cell_h, ch, style);
    }

    /// Blank the cell and put a single glyph in its middle.
    fn draw_cell_marker(
        &self,
        fb: &mut FrameBuffer,
        layout: &Layout,
        p: Point,
        ch: char,
        style: CellStyle,
    ) {
        if !p.in_bounds() {
            return;
        }
        self.fill_cell(fb, layout, p, ' ', style);
        let (px, py) = cell_origin(layout, p.x as u16, p.y as u16);
        fb.put_char(px + (layout.cell_w - 1) / 2, py + (layout.cell_h - 1) / 2, ch, style);
    }

    fn draw_side_panel(&self, fb: &mut FrameBuffer, snap: &GameSnapshot, layout: &Layout, x: u16) {
        let label = CellStyle::new(COL_TEXT, Rgb::new(0, 0, 0)).bold();
        let value = CellStyle::default();
        let hint = value.dim();

        let y = layout.start_y;
        fb.put_str(x, y, "SCORE", label);
        fb.put_u32(x, y + 1, snap.score, value);

        fb.put_str(x, y + 3, "BEST", label);
        fb.put_u32(x, y + 4, snap.best_score.max(snap.score), value);

        fb.put_str(x, y + 6, "SPEED", label);
        fb.put_u32(x, y + 7, snap.tick_ms, value);
        let digits = count_digits(snap.tick_ms);
        fb.put_str(x + digits, y + 7, "ms", hint);

        if let Some(buttons) = layout.buttons() {
            let style = CellStyle::new(COL_TEXT, COL_BUTTON).bold();
            for (dir, bx, by) in buttons {
                let glyph = match dir {
                    Direction::Up => "  ▲  ",
                    Direction::Down => "  ▼  ",
                    Direction::Left => "  ◀  ",
                    Direction::Right => "  ▶  ",
                };
                fb.put_str(bx, by, glyph, style);
            }
        }

        fb.put_str(x, y + 13, "arrows/wasd", hint);
        fb.put_str(x, y + 14, "drag to swipe", hint);
        fb.put_str(x, y + 15, "q to quit", hint);
    }

    fn draw_overlay(&self, fb: &mut FrameBuffer, layout: &Layout, title: &str, sub: &str) {
        let inner_x = layout.start_x + 1;
        let inner_y = layout.start_y + 1;
        let inner_w = layout.frame_w - 2;
        let inner_h = layout.frame_h - 2;

        fb.map_rect(inner_x, inner_y, inner_w, inner_h, |s| CellStyle {
            bg: COL_OVERLAY,
            dim: true,
            ..s
        });

        let mid_y = inner_y + inner_h / 2;
        let text = CellStyle::new(COL_TEXT, COL_OVERLAY);
        fb.put_str_centered(inner_x, inner_w, mid_y.saturating_sub(1), title, text.bold());
        fb.put_str_centered(inner_x, inner_w, mid_y + 1, sub, text);
    }
}

fn frame_size(scale: u16) -> (u16, u16) {
    (
        (BOARD_COLS as u16 * 2).saturating_mul(scale).saturating_add(2),
        (BOARD_ROWS as u16).saturating_mul(scale).saturating_add(2),
    )
}

fn cell_origin(layout: &Layout, x: u16, y: u16) -> (u16, u16) {
    (
        layout.start_x + 1 + x * layout.cell_w,
        layout.start_y + 1 + y * layout.cell_h,
    )
}

fn count_digits(mut v: u32) -> u16 {
    let mut n = 1;
    while v >= 10 {
        v /= 10;
        n += 1;
    }
    n
}
