//! Full-control terminal writer.

use crossterm::cursor::{Hide, MoveToColumn, MoveUp, Show};
use crossterm::queue;
use crossterm::terminal::{self, Clear, ClearType};
use std::io;

use super::{Capabilities, Output, Terminal};

/// Columns assumed when the terminal size cannot be read.
pub const FALLBACK_WIDTH: usize = 80;

/// Writer for an interactive terminal.
///
/// Every operation is assembled in a pre-allocated buffer and flushed in a
/// single write so a redraw never shows half a frame. The writer tracks how
/// many lines the current frame spans and clears all of them before the
/// next write.
pub struct Interactive {
    output: Output,
    buf: Vec<u8>,
    frame_lines: usize,
    width: Option<usize>,
}

impl Interactive {
    /// Write to `output`, measuring the terminal for its width.
    pub fn new(output: Output) -> Self {
        Self {
            output,
            buf: Vec::with_capacity(1024),
            frame_lines: 0,
            width: None,
        }
    }

    /// Pin the width instead of measuring the terminal.
    #[must_use]
    pub const fn with_width(mut self, width: usize) -> Self {
        self.width = Some(width);
        self
    }

    fn queue_clear(&mut self) -> io::Result<()> {
        queue!(self.buf, MoveToColumn(0), Clear(ClearType::CurrentLine))?;
        for _ in 1..self.frame_lines {
            queue!(self.buf, MoveUp(1), Clear(ClearType::CurrentLine))?;
        }
        self.frame_lines = 0;
        Ok(())
    }

    fn queue_lines(&mut self, text: &str) -> usize {
        let mut lines = 0;
        for (i, line) in text.split('\n').enumerate() {
            if i > 0 {
                self.buf.extend_from_slice(b"\r\n");
            }
            self.buf.extend_from_slice(line.as_bytes());
            lines += 1;
        }
        lines
    }

    fn flush_buf(&mut self) -> io::Result<()> {
        let result = self.output.write_all(&self.buf);
        self.buf.clear();
        result
    }
}

impl Terminal for Interactive {
    fn capabilities(&self) -> Capabilities {
        Capabilities::all()
    }

    fn write(&mut self, text: &str) -> io::Result<()> {
        self.queue_clear()?;
        self.frame_lines = self.queue_lines(text);
        self.flush_buf()
    }

    fn write_line(&mut self, text: &str) -> io::Result<()> {
        self.queue_clear()?;
        self.queue_lines(text);
        self.buf.extend_from_slice(b"\r\n");
        self.flush_buf()
    }

    fn clear_current_line(&mut self) -> io::Result<()> {
        self.queue_clear()?;
        self.flush_buf()
    }

    fn hide_cursor(&mut self) -> io::Result<()> {
        queue!(self.buf, Hide)?;
        self.flush_buf()
    }

    fn show_cursor(&mut self) -> io::Result<()> {
        queue!(self.buf, Show)?;
        self.flush_buf()
    }

    fn is_interactive(&self) -> bool {
        true
    }

    fn width(&self) -> usize {
        self.width.unwrap_or_else(|| {
            terminal::size()
                .ok()
                .map(|(cols, _)| usize::from(cols))
                .filter(|cols| *cols > 0)
                .unwrap_or(FALLBACK_WIDTH)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::terminal::Capture;

    fn screen(capture: &Capture) -> (Vec<String>, bool) {
        let mut parser = vt100::Parser::new(6, 40, 0);
        parser.process(&capture.contents());
        let rows = parser
            .screen()
            .rows(0, 40)
            .map(|row| row.trim_end().to_owned())
            .collect();
        (rows, parser.screen().hide_cursor())
    }

    fn terminal() -> (Interactive, Capture) {
        let capture = Capture::new();
        (Interactive::new(capture.output()).with_width(40), capture)
    }

    #[test]
    fn test_frames_overwrite_in_place() {
        let (mut term, capture) = terminal();
        term.write("hello world").unwrap();
        term.write("hi").unwrap();
        let (rows, _) = screen(&capture);
        assert_eq!(rows[0], "hi");
        assert_eq!(rows[1], "");
    }

    #[test]
    fn test_line_lands_above_frame() {
        let (mut term, capture) = terminal();
        term.write("frame 1").unwrap();
        term.write_line("log line").unwrap();
        term.write("frame 2").unwrap();
        let (rows, _) = screen(&capture);
        assert_eq!(rows[0], "log line");
        assert_eq!(rows[1], "frame 2");
    }

    #[test]
    fn test_dual_line_frames_clear_both_lines() {
        let (mut term, capture) = terminal();
        term.write("status\ntext").unwrap();
        term.write("next").unwrap();
        let (rows, _) = screen(&capture);
        assert_eq!(rows[0], "next");
        assert_eq!(rows[1], "");

        term.clear_current_line().unwrap();
        let (rows, _) = screen(&capture);
        assert_eq!(rows[0], "");
    }

    #[test]
    fn test_cursor_visibility() {
        let (mut term, capture) = terminal();
        term.hide_cursor().unwrap();
        assert!(screen(&capture).1);
        term.show_cursor().unwrap();
        assert!(!screen(&capture).1);
    }

    #[test]
    fn test_fixed_width() {
        let (term, _) = terminal();
        assert_eq!(term.width(), 40);
        assert!(term.is_interactive());
        assert_eq!(term.capabilities(), Capabilities::all());
    }
}
