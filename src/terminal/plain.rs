//! Writers for non-interactive and disabled output.

use std::io;

use super::{Capabilities, Output, Terminal, FALLBACK_WIDTH};

/// Writer for pipes and files: frames and cursor commands are dropped, only
/// full lines are written. Lines are never cut to a width.
#[derive(Debug)]
pub struct SummaryOnly {
    output: Output,
}

impl SummaryOnly {
    /// Write lines to `output`.
    pub const fn new(output: Output) -> Self {
        Self { output }
    }
}

impl Terminal for SummaryOnly {
    fn capabilities(&self) -> Capabilities {
        Capabilities::RECEIPT
    }

    fn write(&mut self, _text: &str) -> io::Result<()> {
        Ok(())
    }

    fn write_line(&mut self, text: &str) -> io::Result<()> {
        let mut line = String::with_capacity(text.len() + 1);
        line.push_str(text);
        line.push('\n');
        self.output.write_all(line.as_bytes())
    }

    fn clear_current_line(&mut self) -> io::Result<()> {
        Ok(())
    }

    fn hide_cursor(&mut self) -> io::Result<()> {
        Ok(())
    }

    fn show_cursor(&mut self) -> io::Result<()> {
        Ok(())
    }

    fn is_interactive(&self) -> bool {
        false
    }

    fn width(&self) -> usize {
        usize::MAX
    }
}

/// Writer that writes nothing.
#[derive(Debug, Default)]
pub struct Suppressed;

impl Terminal for Suppressed {
    fn capabilities(&self) -> Capabilities {
        Capabilities::empty()
    }

    fn write(&mut self, _text: &str) -> io::Result<()> {
        Ok(())
    }

    fn write_line(&mut self, _text: &str) -> io::Result<()> {
        Ok(())
    }

    fn clear_current_line(&mut self) -> io::Result<()> {
        Ok(())
    }

    fn hide_cursor(&mut self) -> io::Result<()> {
        Ok(())
    }

    fn show_cursor(&mut self) -> io::Result<()> {
        Ok(())
    }

    fn is_interactive(&self) -> bool {
        false
    }

    fn width(&self) -> usize {
        FALLBACK_WIDTH
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::terminal::Capture;

    #[test]
    fn test_summary_only_keeps_lines() {
        let capture = Capture::new();
        let mut term = SummaryOnly::new(capture.output());
        term.hide_cursor().unwrap();
        term.write("frame").unwrap();
        term.clear_current_line().unwrap();
        term.write_line("receipt").unwrap();
        term.show_cursor().unwrap();
        assert_eq!(capture.text(), "receipt\n");
        assert_eq!(term.width(), usize::MAX);
    }

    #[test]
    fn test_suppressed_has_no_capabilities() {
        let mut term = Suppressed;
        term.write_line("x").unwrap();
        assert!(term.capabilities().is_empty());
        assert!(!term.is_interactive());
    }
}
