//! Width arithmetic over cell sequences.

use super::cell::{to_cells, to_string, width_of, Cell};

/// The marker appended to a truncated line.
pub const ELLIPSIS: &str = "...";

/// Where content sits when padding leaves slack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Align {
    /// Content first, filler after.
    #[default]
    Start,
    /// Filler first, content after.
    End,
    /// Filler on both sides; the odd column goes to the end.
    Center,
}

/// Keep leading cells while they fit in `width` columns.
///
/// Stops at the first cell that would overflow, so the result may be
/// narrower than `width` when a double-width cell straddles the edge.
pub fn truncate(cells: &[Cell], width: usize) -> Vec<Cell> {
    let mut used = 0;
    cells
        .iter()
        .take_while(|cell| {
            used += cell.width();
            used <= width
        })
        .cloned()
        .collect()
}

/// Build exactly `columns` columns of filler.
///
/// Repeats `fill` while it fits; any remainder left by a double-width
/// filler is made up with spaces.
fn filler(columns: usize, fill: &Cell) -> Vec<Cell> {
    let step = fill.width().max(1);
    let mut out = vec![fill.clone(); columns / step];
    out.extend(std::iter::repeat_n(Cell::SPACE, columns % step));
    out
}

/// Pad `cells` up to `width` columns.
///
/// Content already at or over `width` is returned unchanged.
pub fn pad(cells: &[Cell], width: usize, fill: &Cell, align: Align) -> Vec<Cell> {
    let deficit = width.saturating_sub(width_of(cells));
    if deficit == 0 {
        return cells.to_vec();
    }
    let (before, after) = match align {
        Align::Start => (0, deficit),
        Align::End => (deficit, 0),
        Align::Center => (deficit / 2, deficit - deficit / 2),
    };
    let mut out = filler(before, fill);
    out.extend_from_slice(cells);
    out.extend(filler(after, fill));
    out
}

/// Force `cells` to exactly `width` columns.
///
/// Over-wide content is truncated at a cell boundary, then any shortfall
/// (including the gap a dropped wide cell leaves) is padded at the end.
pub fn fit(cells: &[Cell], width: usize, fill: &Cell) -> Vec<Cell> {
    pad(&truncate(cells, width), width, fill, Align::Start)
}

/// Shorten `text` to at most `width` columns, marking the cut with
/// [`ELLIPSIS`].
pub fn ellipsize(text: &str, width: usize) -> String {
    let cells = to_cells(text);
    if width_of(&cells) <= width {
        return text.to_owned();
    }
    let marker = ELLIPSIS.len();
    if width <= marker {
        return to_string(&truncate(&cells, width));
    }
    let mut out = to_string(&truncate(&cells, width - marker));
    out.push_str(ELLIPSIS);
    out
}
