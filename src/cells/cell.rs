//! Cell: one grapheme cluster and the number of columns it occupies.
//!
//! # Storage
//!
//! Most graphemes (ASCII, Latin, CJK, single-codepoint emoji) fit in four
//! UTF-8 bytes and are stored inline. Longer clusters such as ZWJ emoji
//! sequences spill to a boxed string.
//!
//! # Width
//!
//! Width is decided by the leading code point of the cluster:
//! - ASCII is 1 column
//! - emoji pictograph ranges and regional indicators are 2 columns
//! - everything else follows `unicode-width` for the leading code point,
//!   clamped to 1..=2
//!
//! This is an approximation. Modifier sequences and text-presentation
//! emoji followed by VS16 are measured by their first code point only.

use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthChar;

#[derive(Clone, PartialEq, Eq, Hash)]
enum Grapheme {
    /// UTF-8 bytes stored in place.
    Inline { bytes: [u8; 4], len: u8 },
    /// Clusters longer than four bytes.
    Spilled(Box<str>),
}

/// A single display unit.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Cell {
    grapheme: Grapheme,
    width: u8,
}

impl Cell {
    /// A blank cell.
    pub const SPACE: Self = Self {
        grapheme: Grapheme::Inline {
            bytes: [b' ', 0, 0, 0],
            len: 1,
        },
        width: 1,
    };

    /// Create a cell from a grapheme cluster.
    ///
    /// The caller is expected to pass exactly one cluster; use [`to_cells`]
    /// to split arbitrary text.
    pub fn new(grapheme: &str) -> Self {
        let bytes = grapheme.as_bytes();
        let stored = if bytes.len() <= 4 {
            let mut inline = [0u8; 4];
            inline[..bytes.len()].copy_from_slice(bytes);
            Grapheme::Inline {
                bytes: inline,
                len: bytes.len() as u8,
            }
        } else {
            Grapheme::Spilled(grapheme.into())
        };
        Self {
            grapheme: stored,
            width: grapheme_width(grapheme),
        }
    }

    /// Create a cell from a single character.
    pub fn from_char(c: char) -> Self {
        let mut buf = [0u8; 4];
        Self::new(c.encode_utf8(&mut buf))
    }

    /// The grapheme as a string slice.
    pub fn grapheme(&self) -> &str {
        match &self.grapheme {
            Grapheme::Inline { bytes, len } => {
                std::str::from_utf8(&bytes[..*len as usize]).unwrap_or_default()
            }
            Grapheme::Spilled(s) => s,
        }
    }

    /// Display width in columns (1 or 2).
    #[inline]
    pub const fn width(&self) -> usize {
        self.width as usize
    }

    /// Whether the grapheme spilled out of inline storage.
    #[inline]
    pub const fn is_spilled(&self) -> bool {
        matches!(self.grapheme, Grapheme::Spilled(_))
    }
}

impl Default for Cell {
    fn default() -> Self {
        Self::SPACE
    }
}

impl From<char> for Cell {
    fn from(c: char) -> Self {
        Self::from_char(c)
    }
}

impl std::fmt::Debug for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Cell")
            .field("grapheme", &self.grapheme())
            .field("width", &self.width)
            .finish()
    }
}

impl std::fmt::Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.grapheme())
    }
}

fn is_wide_pictograph(c: char) -> bool {
    matches!(
        u32::from(c),
        0x1F1E6..=0x1F1FF   // regional indicators
            | 0x1F300..=0x1F64F // misc symbols and pictographs, emoticons
            | 0x1F680..=0x1F6FF // transport and map
            | 0x1F900..=0x1F9FF // supplemental symbols and pictographs
            | 0x1FA70..=0x1FAFF // symbols and pictographs extended-A
    )
}

fn grapheme_width(grapheme: &str) -> u8 {
    let Some(lead) = grapheme.chars().next() else {
        return 0;
    };
    if lead.is_ascii() {
        return 1;
    }
    if is_wide_pictograph(lead) {
        return 2;
    }
    match UnicodeWidthChar::width(lead) {
        Some(w) if w >= 2 => 2,
        _ => 1,
    }
}

/// Split text into cells, one per extended grapheme cluster.
pub fn to_cells(text: &str) -> Vec<Cell> {
    text.graphemes(true).map(Cell::new).collect()
}

/// Total display width of a cell sequence.
pub fn width_of(cells: &[Cell]) -> usize {
    cells.iter().map(Cell::width).sum()
}

/// Concatenate cells back into a string.
pub fn to_string(cells: &[Cell]) -> String {
    cells.iter().map(Cell::grapheme).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ascii_is_single_width() {
        let cells = to_cells("abc |=>");
        assert_eq!(cells.len(), 7);
        assert!(cells.iter().all(|c| c.width() == 1));
    }

    #[test]
    fn test_cjk_is_double_width() {
        let cells = to_cells("日本");
        assert_eq!(cells.len(), 2);
        assert_eq!(width_of(&cells), 4);
    }

    #[test]
    fn test_fullwidth_forms() {
        assert_eq!(Cell::from_char('Ａ').width(), 2);
    }

    #[test]
    fn test_emoji_is_double_width() {
        assert_eq!(Cell::new("🚀").width(), 2);
        assert_eq!(Cell::new("😀").width(), 2);
    }

    #[test]
    fn test_zwj_cluster_is_one_cell() {
        let cells = to_cells("👨‍👩‍👧");
        assert_eq!(cells.len(), 1);
        assert!(cells[0].is_spilled());
        assert_eq!(cells[0].width(), 2);
        assert_eq!(cells[0].grapheme(), "👨‍👩‍👧");
    }

    #[test]
    fn test_combining_mark_stays_with_base() {
        let cells = to_cells("e\u{301}x");
        assert_eq!(cells.len(), 2);
        assert_eq!(cells[0].grapheme(), "e\u{301}");
        assert_eq!(width_of(&cells), 2);
    }

    #[test]
    fn test_box_drawing_is_single_width() {
        assert_eq!(width_of(&to_cells("█▏░")), 3);
    }

    #[test]
    fn test_empty_input() {
        assert!(to_cells("").is_empty());
        assert_eq!(width_of(&[]), 0);
    }

    #[test]
    fn test_round_trip_string() {
        let text = "ok 日本 👨‍👩‍👧!";
        assert_eq!(to_string(&to_cells(text)), text);
    }
}
