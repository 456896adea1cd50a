//! Crossterm backend: flushes framebuffers to the real terminal.
//!
//! Only rows that changed since the previous frame are rewritten.

use std::io::{self, Stdout, Write};

use anyhow::Result;
use crossterm::{
    QueueableCommand, cursor,
    style::{Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor},
    terminal,
};

use super::fb::{FrameBuffer, Rgb, Style};

pub struct TerminalRenderer {
    stdout: Stdout,
    last: Option<FrameBuffer>,
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
            last: None,
        }
    }

    /// Raw mode, alternate screen, hidden cursor
    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.stdout.queue(terminal::EnterAlternateScreen)?;
        self.stdout.queue(cursor::Hide)?;
        self.stdout.queue(terminal::Clear(terminal::ClearType::All))?;
        self.stdout.flush()?;
        Ok(())
    }

    /// Undo everything `enter` did
    pub fn exit(&mut self) -> Result<()> {
        self.stdout.queue(ResetColor)?;
        self.stdout.queue(SetAttribute(Attribute::Reset))?;
        self.stdout.queue(cursor::Show)?;
        self.stdout.queue(terminal::LeaveAlternateScreen)?;
        self.stdout.flush()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    /// Forget the previous frame so the next draw repaints everything
    pub fn invalidate(&mut self) {
        self.last = None;
        let _ = self.stdout.queue(terminal::Clear(terminal::ClearType::All));
    }

    pub fn draw(&mut self, fb: &FrameBuffer) -> Result<()> {
        let rows = match &self.last {
            Some(prev) => changed_rows(prev, fb),
            None => (0..fb.height()).collect(),
        };

        for y in rows {
            self.stdout.queue(cursor::MoveTo(0, y))?;
            let mut current: Option<Style> = None;
            for cell in fb.row(y) {
                if current != Some(cell.style) {
                    queue_style(&mut self.stdout, cell.style)?;
                    current = Some(cell.style);
                }
                self.stdout.queue(Print(cell.ch))?;
            }
        }

        self.stdout.queue(ResetColor)?;
        self.stdout.queue(SetAttribute(Attribute::Reset))?;
        self.stdout.flush()?;

        match &mut self.last {
            Some(prev) => prev.clone_from(fb),
            None => self.last = Some(fb.clone()),
        }
        Ok(())
    }
}

fn queue_style(out: &mut Stdout, style: Style) -> io::Result<()> {
    out.queue(SetAttribute(Attribute::Reset))?;
    out.queue(SetForegroundColor(to_color(style.fg)))?;
    out.queue(SetBackgroundColor(to_color(style.bg)))?;
    if style.bold {
        out.queue(SetAttribute(Attribute::Bold))?;
    }
    if style.dim {
        out.queue(SetAttribute(Attribute::Dim))?;
    }
    Ok(())
}

fn to_color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}

/// Rows of `next` that differ from `prev` (all rows if the size changed)
fn changed_rows(prev: &FrameBuffer, next: &FrameBuffer) -> Vec<u16> {
    if prev.width() != next.width() || prev.height() != next.height() {
        return (0..next.height()).collect();
    }
    (0..next.height()).filter(|&y| prev.row(y) != next.row(y)).collect()
}
