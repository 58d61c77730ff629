//! # Livebar
//!
//! An animated terminal progress bar that estimates time to completion from
//! observed throughput and coexists with ordinary log output.
//!
//! ## Core Concepts
//!
//! - **Live frame**: a spinner, a bar and text widgets composed into one line
//!   that fits the terminal width, redrawn on a background ticker
//! - **Adaptive redraws**: the frame rate follows the throughput on a log
//!   scale, from 2 to 60 frames per second
//! - **Smoothed ETA**: rate samples are exponentially smoothed and anchored
//!   in time, so stalls and skipped items do not distort the estimate
//! - **Print bridge**: text printed while the bar runs lands above the frame
//!   instead of tearing it
//! - **Graceful degradation**: pipes get only the final summary line; a
//!   failing terminal disables the frame, never the caller's work
//!
//! ## Example
//!
//! ```no_run
//! use livebar::{track, Config};
//!
//! let files = vec!["a.txt", "b.txt", "c.txt"];
//! for file in track(files, &Config::new().title("upload").unit("B")) {
//!     // process `file`
//!     let _ = file;
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod bridge;
pub mod cells;
pub mod config;
pub mod engine;
pub mod error;
pub mod render;
pub mod style;
pub mod terminal;
pub mod timing;
pub mod track;
pub mod widget;

// Re-exports for convenience
pub use bridge::PrintBridge;
pub use config::{Config, Defaults, Settings};
pub use engine::{BarHandle, LiveBar, Receipt, Resume};
pub use error::{Error, Result};
pub use style::{BarChoice, SpinnerChoice};
pub use terminal::{Capture, Output};
pub use track::{track, Tracked};
#[cfg(feature = "stream")]
pub use track::{track_stream, TrackedStream};
pub use widget::{format_duration, format_rate, DurationFormat, Scale, WidgetSetting};
