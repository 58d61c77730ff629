//! Exponential smoothing for rate samples.

/// Default smoothing factor.
pub const DEFAULT_ALPHA: f64 = 0.1;

/// Exponentially smoothed rate.
///
/// Lower `alpha` reacts more slowly to bursts and gives a steadier ETA.
/// The first sample is taken as-is so the estimate does not have to climb
/// out of a false zero baseline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RateSmoother {
    alpha: f64,
    smoothed: f64,
    initialized: bool,
}

impl RateSmoother {
    /// Create a smoother. `alpha` outside `(0, 1]` falls back to [`DEFAULT_ALPHA`].
    pub fn new(alpha: f64) -> Self {
        let alpha = if alpha > 0.0 && alpha <= 1.0 {
            alpha
        } else {
            DEFAULT_ALPHA
        };
        Self {
            alpha,
            smoothed: 0.0,
            initialized: false,
        }
    }

    /// The smoothing factor in use.
    #[inline]
    pub const fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Feed a sample and return the new smoothed value.
    pub fn update(&mut self, sample: f64) -> f64 {
        if self.initialized {
            self.smoothed = self.alpha.mul_add(sample, (1.0 - self.alpha) * self.smoothed);
        } else {
            self.smoothed = sample;
            self.initialized = true;
        }
        self.smoothed
    }

    /// Current smoothed value; 0 before the first sample.
    #[inline]
    pub const fn value(&self) -> f64 {
        self.smoothed
    }

    /// Forget all samples.
    pub const fn reset(&mut self) {
        self.smoothed = 0.0;
        self.initialized = false;
    }
}

impl Default for RateSmoother {
    fn default() -> Self {
        Self::new(DEFAULT_ALPHA)
    }
}
