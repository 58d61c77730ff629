//! Frame composition.
//!
//! The [`Composer`] turns a [`Snapshot`] of the bar into the text of one
//! frame, fitted to the terminal width. It is a pure function of its input
//! apart from the spinner animations, which advance one frame per call.

mod compose;
mod snapshot;

pub use compose::{Composer, Frame};
pub use snapshot::{Outcome, Snapshot};
