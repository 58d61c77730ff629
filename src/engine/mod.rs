//! Progress engine.
//!
//! A [`LiveBar`] owns the bar state and drives the redraw ticker. Work is
//! reported through [`BarHandle`]s; finishing produces a [`Receipt`].
//!
//! ## Threads
//!
//! - **Caller threads**: update counts and texts through handles
//! - **Ticker thread**: redraws at an interval derived from the throughput
//! - **Interrupt thread** (`ctrlc`): finalizes the registered bar on Ctrl+C
//!
//! All of them go through one lock around the state; redraws and printed
//! lines never interleave on the terminal.

mod bar;
mod interrupt;
mod receipt;
mod state;
mod ticker;

pub use bar::{BarHandle, LiveBar, Resume};
pub use interrupt::INTERRUPT_EXIT_CODE;
pub use receipt::Receipt;
