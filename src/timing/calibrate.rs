//! Redraw pacing: map throughput to a frame rate on a log scale.
//!
//! Throughput spans many orders of magnitude, so a linear map would redraw
//! slow jobs too rarely and fast ones wastefully often. The calibration
//! throughput is the rate that saturates at [`MAX_FPS`].

use std::time::Duration;

/// Lowest redraw rate; idle and indeterminate bars still animate.
pub const MIN_FPS: f64 = 2.0;
/// Highest redraw rate.
pub const MAX_FPS: f64 = 60.0;
/// Throughput (items/s) that maps to [`MAX_FPS`] by default.
pub const DEFAULT_CALIBRATION: f64 = 1_000_000.0;

/// How the redraw interval is chosen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Refresh {
    /// Recompute from the observed rate every tick.
    Auto {
        /// Throughput that maps to the maximum frame rate.
        calibration: f64,
    },
    /// A constant interval.
    Fixed(Duration),
}

impl Refresh {
    /// Build from a refresh period in seconds; zero or negative selects auto.
    pub fn from_secs(refresh_secs: f64, calibration: f64) -> Self {
        if refresh_secs > 0.0 && refresh_secs.is_finite() {
            Self::Fixed(Duration::from_secs_f64(refresh_secs))
        } else {
            Self::Auto { calibration }
        }
    }

    /// The interval to wait before the next tick.
    pub fn interval(&self, rate: f64) -> Duration {
        match *self {
            Self::Fixed(interval) => interval,
            Self::Auto { calibration } => refresh_interval(rate, calibration),
        }
    }
}

impl Default for Refresh {
    fn default() -> Self {
        Self::Auto {
            calibration: DEFAULT_CALIBRATION,
        }
    }
}

/// Frames per second for a throughput, in `[MIN_FPS, MAX_FPS]`.
pub fn calculate_fps(rate: f64, calibration: f64) -> f64 {
    if rate.is_nan() || rate <= 0.0 {
        return MIN_FPS;
    }
    let calibration = if calibration > 0.0 && calibration.is_finite() {
        calibration
    } else {
        DEFAULT_CALIBRATION
    };
    let fps = (rate + 1.0).log10() * (MAX_FPS / (calibration + 1.0).log10());
    fps.clamp(MIN_FPS, MAX_FPS)
}

/// Time between redraws for a throughput.
pub fn refresh_interval(rate: f64, calibration: f64) -> Duration {
    Duration::from_secs_f64(1.0 / calculate_fps(rate, calibration))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_idle_floor() {
        assert_eq!(calculate_fps(0.0, DEFAULT_CALIBRATION), MIN_FPS);
        assert_eq!(calculate_fps(-5.0, DEFAULT_CALIBRATION), MIN_FPS);
        assert_eq!(calculate_fps(f64::NAN, DEFAULT_CALIBRATION), MIN_FPS);
        assert_eq!(refresh_interval(0.0, DEFAULT_CALIBRATION), Duration::from_millis(500));
    }

    #[test]
    fn test_calibration_saturates() {
        assert!((calculate_fps(DEFAULT_CALIBRATION, DEFAULT_CALIBRATION) - MAX_FPS).abs() < 1e-9);
        assert_eq!(calculate_fps(1e12, DEFAULT_CALIBRATION), MAX_FPS);
        assert_eq!(calculate_fps(f64::INFINITY, DEFAULT_CALIBRATION), MAX_FPS);
    }

    #[test]
    fn test_monotonic_and_bounded() {
        let mut last = 0.0;
        let mut rate = 0.0;
        while rate < 1e9 {
            let fps = calculate_fps(rate, DEFAULT_CALIBRATION);
            assert!(fps >= last);
            assert!((MIN_FPS..=MAX_FPS).contains(&fps));
            last = fps;
            rate = rate * 1.7 + 0.3;
        }
    }

    #[test]
    fn test_lower_calibration_redraws_faster() {
        assert!(calculate_fps(100.0, 1_000.0) > calculate_fps(100.0, 1_000_000.0));
    }

    #[test]
    fn test_fixed_refresh_overrides() {
        let refresh = Refresh::from_secs(0.25, DEFAULT_CALIBRATION);
        assert_eq!(refresh.interval(0.0), Duration::from_millis(250));
        assert_eq!(refresh.interval(1e9), Duration::from_millis(250));
    }

    #[test]
    fn test_non_positive_refresh_is_auto() {
        assert_eq!(Refresh::from_secs(0.0, 10.0), Refresh::Auto { calibration: 10.0 });
        assert_eq!(Refresh::from_secs(-1.0, 10.0), Refresh::Auto { calibration: 10.0 });
    }
}
