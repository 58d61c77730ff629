//! Cells: display-width-aware text units.
//!
//! Everything that measures, pads or truncates rendered text works on
//! [`Cell`]s rather than on bytes or `char`s:
//! - [`Cell`]: one grapheme cluster plus its terminal column width
//! - [`to_cells`] / [`width_of`]: conversion and measurement
//! - [`fit`], [`pad`], [`truncate`], [`ellipsize`]: width arithmetic

mod cell;
mod fit;

pub use cell::{to_cells, to_string, width_of, Cell};
pub use fit::{ellipsize, fit, pad, truncate, Align, ELLIPSIS};
