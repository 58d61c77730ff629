//! Terminal writers.
//!
//! Three writers cover the environments a bar can find itself in:
//! [`Interactive`] redraws frames in place, [`SummaryOnly`] only emits full
//! lines (pipes, files, CI logs) and [`Suppressed`] emits nothing.
//! [`select`] picks one for an [`Output`].

mod interactive;
mod output;
mod plain;

use std::io;

use bitflags::bitflags;

pub use interactive::{Interactive, FALLBACK_WIDTH};
pub use output::{Capture, Output, SharedWriter};
pub use plain::{Suppressed, SummaryOnly};

bitflags! {
    /// What a writer actually puts on screen.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Capabilities: u8 {
        /// Live frames are drawn.
        const FRAMES = 1 << 0;
        /// Cursor visibility is controlled.
        const CURSOR = 1 << 1;
        /// The final summary line is written.
        const RECEIPT = 1 << 2;
    }
}

/// The writer interface the engine draws through.
///
/// `write` replaces the current frame (which may span several lines),
/// `write_line` clears it and emits a permanent line.
pub trait Terminal: Send {
    /// What this writer shows.
    fn capabilities(&self) -> Capabilities;

    /// Replace the current frame with `text`.
    fn write(&mut self, text: &str) -> io::Result<()>;

    /// Clear the current frame and write `text` as a full line.
    fn write_line(&mut self, text: &str) -> io::Result<()>;

    /// Clear the current frame.
    fn clear_current_line(&mut self) -> io::Result<()>;

    /// Hide the cursor.
    fn hide_cursor(&mut self) -> io::Result<()>;

    /// Show the cursor.
    fn show_cursor(&mut self) -> io::Result<()>;

    /// Whether frames are redrawn in place.
    fn is_interactive(&self) -> bool;

    /// Usable columns.
    fn width(&self) -> usize;
}

/// Pick the writer for `output`.
///
/// Disabled output is [`Suppressed`]; otherwise `force_tty` decides, falling
/// back to terminal detection.
pub fn select(output: &Output, enabled: bool, force_tty: Option<bool>) -> Box<dyn Terminal> {
    if !enabled {
        return Box::new(Suppressed);
    }
    if force_tty.unwrap_or_else(|| output.is_terminal()) {
        Box::new(Interactive::new(output.clone()))
    } else {
        Box::new(SummaryOnly::new(output.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select() {
        let output = Capture::new().output();
        assert!(select(&output, false, Some(true)).capabilities().is_empty());
        assert!(select(&output, true, Some(true)).is_interactive());
        assert_eq!(select(&output, true, None).capabilities(), Capabilities::RECEIPT);
        assert_eq!(select(&output, true, Some(false)).capabilities(), Capabilities::RECEIPT);
    }
}
