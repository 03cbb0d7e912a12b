//! TerminalRenderer: flushes a framebuffer to a real terminal.
//!
//! Every frame is a full redraw. The screen is only cleared when the frame
//! size changes, so a steady-size redraw overwrites in place without flicker.

use std::io::{self, Write};

use anyhow::Result;

use crossterm::{
    cursor,
    event::{DisableMouseCapture, EnableMouseCapture},
    style::{
        Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
    },
    terminal, QueueableCommand,
};

use crate::fb::{CellStyle, FrameBuffer, Rgb};

pub struct TerminalRenderer {
    stdout: io::Stdout,
    last_size: Option<(u16, u16)>,
    buf: Vec<u8>,
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self {
            stdout: io::stdout(),
            last_size: None,
            buf: Vec::with_capacity(64 * 1024),
        }
    }

    /// Switch the terminal into game mode: raw input, alternate screen, no
    /// cursor, mouse reporting on.
    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.buf.clear();
        self.buf.queue(terminal::EnterAlternateScreen)?;
        self.buf.queue(cursor::Hide)?;
        self.buf.queue(terminal::DisableLineWrap)?;
        self.buf.queue(EnableMouseCapture)?;
        self.flush_buf()?;
        self.last_size = None;
        Ok(())
    }

    pub fn exit(&mut self) -> Result<()> {
        self.buf.clear();
        self.buf.queue(DisableMouseCapture)?;
        self.buf.queue(ResetColor)?;
        self.buf.queue(SetAttribute(Attribute::Reset))?;
        self.buf.queue(terminal::EnableLineWrap)?;
        self.buf.queue(cursor::Show)?;
        self.buf.queue(terminal::LeaveAlternateScreen)?;
        self.flush_buf()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    /// Force the next draw to clear the screen first.
    ///
    /// Useful on terminal resize events.
    pub fn invalidate(&mut self) {
        self.last_size = None;
    }

    /// Redraw the whole framebuffer.
    pub fn draw(&mut self, fb: &FrameBuffer) -> Result<()> {
        let size = (fb.width(), fb.height());
        let clear = self.last_size != Some(size);

        self.buf.clear();
        encode_full_into(fb, clear, &mut self.buf)?;
        self.flush_buf()?;

        self.last_size = Some(size);
        Ok(())
    }

    fn flush_buf(&mut self) -> Result<()> {
        self.stdout.write_all(&self.buf)?;
        self.stdout.flush()?;
        Ok(())
    }
}

/// Encode a full-frame redraw into `out`.
///
/// This builds a sequence of crossterm commands without writing to stdout.
/// Style changes are only emitted between cells whose style differs.
pub fn encode_full_into(fb: &FrameBuffer, clear: bool, out: &mut Vec<u8>) -> Result<()> {
    if clear {
        out.queue(terminal::Clear(terminal::ClearType::All))?;
    }

    let mut current_style: Option<CellStyle> = None;
    for y in 0..fb.height() {
        out.queue(cursor::MoveTo(0, y))?;
        for x in 0..fb.width() {
            let cell = fb.get(x, y).unwrap_or_default();
            if current_style != Some(cell.style) {
                apply_style_into(out, cell.style)?;
                current_style = Some(cell.style);
            }
            out.queue(Print(cell.ch))?;
        }
    }

    out.queue(ResetColor)?;
    out.queue(SetAttribute(Attribute::Reset))?;
    Ok(())
}

fn apply_style_into(out: &mut Vec<u8>, style: CellStyle) -> Result<()> {
    out.queue(SetAttribute(Attribute::Reset))?;
    out.queue(SetForegroundColor(rgb_to_color(style.fg)))?;
    out.queue(SetBackgroundColor(rgb_to_color(style.bg)))?;
    if style.bold {
        out.queue(SetAttribute(Attribute::Bold))?;
    }
    if style.dim {
        out.queue(SetAttribute(Attribute::Dim))?;
    }
    Ok(())
}

fn rgb_to_color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}
