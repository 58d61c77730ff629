//! ETA estimation from time-anchored count samples.

use super::smoother::RateSmoother;
use std::time::Instant;

/// Smoothed throughput and time-to-completion.
///
/// A rate sample is taken only when both time and count have advanced
/// since the last anchor, so repeated reads at the same count never feed
/// the smoother and a stall does not collapse the rate. Because the delta
/// is anchored in time rather than per call, the redraw tick and on-demand
/// reads can both call [`update`](Self::update) without double counting.
#[derive(Debug, Clone)]
pub struct EtaCalculator {
    smoother: RateSmoother,
    anchor: Option<(u64, Instant)>,
}

impl EtaCalculator {
    /// Create a calculator with the given smoothing factor.
    pub fn new(alpha: f64) -> Self {
        Self {
            smoother: RateSmoother::new(alpha),
            anchor: None,
        }
    }

    /// Sample now and return the ETA in seconds.
    pub fn update(&mut self, count: u64, total: Option<u64>) -> f64 {
        self.update_at(count, total, Instant::now())
    }

    /// Sample at `now` and return the ETA in seconds.
    ///
    /// Returns positive infinity when the total is unknown or no positive
    /// rate has been observed yet; zero once the count reaches the total.
    pub fn update_at(&mut self, count: u64, total: Option<u64>, now: Instant) -> f64 {
        match self.anchor {
            None => self.anchor = Some((count, now)),
            Some((last_count, last_time)) => {
                let dt = now.saturating_duration_since(last_time).as_secs_f64();
                if count < last_count {
                    // count went backwards (manual mode): re-anchor, no sample
                    self.anchor = Some((count, now));
                } else if count > last_count && dt > 0.0 {
                    self.smoother.update((count - last_count) as f64 / dt);
                    self.anchor = Some((count, now));
                }
            }
        }
        self.eta(count, total)
    }

    fn eta(&self, count: u64, total: Option<u64>) -> f64 {
        let Some(total) = total else {
            return f64::INFINITY;
        };
        let rate = self.smoother.value();
        if rate <= 0.0 {
            return f64::INFINITY;
        }
        (total.saturating_sub(count)) as f64 / rate
    }

    /// The last smoothed rate, in items per second.
    #[inline]
    pub const fn rate(&self) -> f64 {
        self.smoother.value()
    }

    /// Forget the rate and the anchor.
    pub fn reset(&mut self) {
        self.smoother.reset();
        self.anchor = None;
    }
}
