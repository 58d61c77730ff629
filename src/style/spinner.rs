//! Spinner factories.

use super::{FrameProducer, SpinnerFactory};
use crate::cells::{fit, pad, to_cells, to_string, width_of, Align, Cell};

/// Cycles through precomputed frames.
#[derive(Debug, Clone)]
pub struct Frames {
    frames: Vec<String>,
    index: usize,
}

impl Frames {
    /// Wrap a list of frames. An empty list yields a blank frame of `length`.
    pub fn new(frames: Vec<String>, length: usize) -> Self {
        let frames = if frames.is_empty() {
            vec![" ".repeat(length)]
        } else {
            frames
        };
        Self { frames, index: 0 }
    }
}

impl FrameProducer for Frames {
    fn next_frame(&mut self) -> String {
        let frame = self.frames[self.index].clone();
        self.index = (self.index + 1) % self.frames.len();
        frame
    }
}

/// A spinner made of a fixed list of frames, each fitted to the requested
/// length.
#[derive(Debug, Clone)]
pub struct FrameSpinner {
    frames: Vec<String>,
}

impl FrameSpinner {
    /// Create from frame strings.
    pub fn new<I, S>(frames: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            frames: frames.into_iter().map(Into::into).collect(),
        }
    }

    /// Frames cut as a sliding window over `pattern`, wrapping around.
    pub fn window(pattern: &str, size: usize) -> Self {
        let cells = to_cells(pattern);
        let frames = (0..cells.len())
            .map(|start| {
                let window: Vec<Cell> = cells.iter().cycle().skip(start).take(size).cloned().collect();
                to_string(&window)
            })
            .collect();
        Self { frames }
    }
}

impl SpinnerFactory for FrameSpinner {
    fn natural_length(&self) -> usize {
        self.frames
            .iter()
            .map(|f| width_of(&to_cells(f)))
            .max()
            .unwrap_or(1)
    }

    fn build(&self, length: usize) -> Box<dyn FrameProducer> {
        let frames = self
            .frames
            .iter()
            .map(|frame| to_string(&pad(&to_cells(frame), length, &Cell::SPACE, Align::Center)))
            .map(|frame| to_string(&fit(&to_cells(&frame), length, &Cell::SPACE)))
            .collect();
        Box::new(Frames::new(frames, length))
    }
}

/// A glyph travelling across the available width.
#[derive(Debug, Clone)]
pub struct ScrollSpinner {
    glyph: String,
    background: Cell,
    bounce: bool,
}

impl ScrollSpinner {
    /// Create a spinner that moves `glyph` over `background`. With `bounce`
    /// the glyph reverses at the edges, otherwise it wraps around.
    pub fn new(glyph: impl Into<String>, background: char, bounce: bool) -> Self {
        Self {
            glyph: glyph.into(),
            background: Cell::from_char(background),
            bounce,
        }
    }
}

impl SpinnerFactory for ScrollSpinner {
    fn natural_length(&self) -> usize {
        10
    }

    fn build(&self, length: usize) -> Box<dyn FrameProducer> {
        let glyph = to_cells(&self.glyph);
        let travel = length.saturating_sub(width_of(&glyph));
        let mut positions: Vec<usize> = (0..=travel).collect();
        if self.bounce && travel > 1 {
            positions.extend((1..travel).rev());
        }
        let frames = positions
            .into_iter()
            .map(|offset| {
                let mut cells = vec![self.background.clone(); offset];
                cells.extend_from_slice(&glyph);
                to_string(&fit(&cells, length, &self.background))
            })
            .collect();
        Box::new(Frames::new(frames, length))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect(mut producer: Box<dyn FrameProducer>, n: usize) -> Vec<String> {
        (0..n).map(|_| producer.next_frame()).collect()
    }

    #[test]
    fn test_frames_cycle() {
        let spinner = FrameSpinner::new(["a", "b", "c"]);
        assert_eq!(collect(spinner.build(1), 4), ["a", "b", "c", "a"]);
    }

    #[test]
    fn test_frames_are_fitted() {
        let spinner = FrameSpinner::new(["x", "日本語"]);
        for frame in collect(spinner.build(3), 2) {
            assert_eq!(width_of(&to_cells(&frame)), 3);
        }
    }

    #[test]
    fn test_natural_length() {
        assert_eq!(FrameSpinner::new(["ab", "abcd"]).natural_length(), 4);
    }

    #[test]
    fn test_window_frames() {
        let spinner = FrameSpinner::window("1234", 2);
        assert_eq!(collect(spinner.build(2), 4), ["12", "23", "34", "41"]);
    }

    #[test]
    fn test_scroll_bounces() {
        let spinner = ScrollSpinner::new("o", '.', true);
        assert_eq!(
            collect(spinner.build(3), 5),
            ["o..", ".o.", "..o", ".o.", "o.."]
        );
    }

    #[test]
    fn test_scroll_wraps() {
        let spinner = ScrollSpinner::new("o", '.', false);
        assert_eq!(collect(spinner.build(3), 4), ["o..", ".o.", "..o", "o.."]);
    }

    #[test]
    fn test_zero_length_spinner() {
        let spinner = ScrollSpinner::new("●", ' ', true);
        assert_eq!(collect(spinner.build(0), 1), [""]);
    }
}
