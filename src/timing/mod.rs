//! Timing: throughput estimation, the elapsed-time clock and redraw pacing.
//!
//! - [`RateSmoother`]: exponential smoothing of a noisy rate signal
//! - [`EtaCalculator`]: time-anchored rate sampling and ETA
//! - [`Timer`]: elapsed time that stops while paused
//! - [`calculate_fps`] / [`refresh_interval`]: throughput-driven redraw rate

mod calibrate;
mod eta;
mod smoother;
mod timer;

pub use calibrate::{
    calculate_fps, refresh_interval, Refresh, DEFAULT_CALIBRATION, MAX_FPS, MIN_FPS,
};
pub use eta::EtaCalculator;
pub use smoother::{RateSmoother, DEFAULT_ALPHA};
pub use timer::Timer;
