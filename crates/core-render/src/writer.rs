//! Terminal writer: batches primitive terminal operations and flushes them
//! once per repaint. `Screen` builds one of these per frame; nothing here
//! talks to the terminal until `flush` runs.

use anyhow::Result;
use crossterm::{
    cursor::{Hide, MoveTo, Show},
    queue,
    style::{Print, SetAttribute, Attribute},
    terminal::{Clear, ClearType},
};
use std::io::{Write, stdout};

#[derive(Debug)]
enum Command {
    MoveTo(u16, u16),
    Print(String),
    PrintReversed(char),
    ShowCursor(u16, u16),
    HideCursor,
}

#[derive(Default)]
pub struct Writer {
    cmds: Vec<Command>,
}

impl Writer {
    pub fn new() -> Self {
        Writer { cmds: Vec::new() }
    }

    pub fn move_to(&mut self, x: u16, y: u16) {
        self.cmds.push(Command::MoveTo(x, y));
    }

    pub fn print<S: Into<String>>(&mut self, s: S) {
        let s: String = s.into();
        if !s.is_empty() {
            self.cmds.push(Command::Print(s));
        }
    }

    pub fn print_reversed(&mut self, ch: char) {
        self.cmds.push(Command::PrintReversed(ch));
    }

    pub fn show_cursor(&mut self, x: u16, y: u16) {
        self.cmds.push(Command::ShowCursor(x, y));
    }

    pub fn hide_cursor(&mut self) {
        self.cmds.push(Command::HideCursor);
    }

    /// Flush every queued command to stdout in one batch, then a single
    /// `flush()` call on the underlying writer. Rendering never blocks
    /// beyond this one syscall-bounded flush.
    pub fn flush(self) -> Result<()> {
        tracing::trace!(target: "render.writer", commands = self.cmds.len(), "flush");
        let mut out = stdout();
        queue!(out, Clear(ClearType::All))?;
        for c in self.cmds {
            match c {
                Command::MoveTo(x, y) => queue!(out, MoveTo(x, y))?,
                Command::Print(s) => queue!(out, Print(s))?,
                Command::PrintReversed(ch) => {
                    queue!(
                        out,
                        SetAttribute(Attribute::Reverse),
                        Print(ch),
                        SetAttribute(Attribute::NoReverse)
                    )?;
                }
                Command::ShowCursor(x, y) => queue!(out, MoveTo(x, y), Show)?,
                Command::HideCursor => queue!(out, Hide)?,
            }
        }
        out.flush()?;
        Ok(())
    }
}
