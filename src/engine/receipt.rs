//! The frozen result of a finished bar.

use std::time::Duration;

/// Summary of a finished bar. Produced once, never changed.
#[derive(Debug, Clone, PartialEq)]
pub struct Receipt {
    /// The announced total, if any.
    pub total: Option<u64>,
    /// Effective count at the end.
    pub count: u64,
    /// Completion in percent. Not capped at 100; zero without a total.
    pub percent: f64,
    /// Running time, pauses excluded.
    pub elapsed: Duration,
    /// Effective items per second over the whole run.
    pub rate: f64,
    /// Neither overflow nor underflow.
    pub success: bool,
    /// The count exceeded the total.
    pub overflow: bool,
    /// The count fell short of the total.
    pub underflow: bool,
}

impl Receipt {
    /// Build a receipt from the final effective count.
    ///
    /// `fraction` is the completion to report; pass `None` when it is
    /// unknown.
    pub fn new(total: Option<u64>, count: u64, fraction: Option<f64>, elapsed: Duration) -> Self {
        let overflow = total.is_some_and(|t| count > t);
        let underflow = total.is_some_and(|t| count < t);
        let secs = elapsed.as_secs_f64();
        Self {
            total,
            count,
            percent: fraction.map_or(0.0, |f| f * 100.0),
            elapsed,
            rate: if secs > 0.0 { count as f64 / secs } else { 0.0 },
            success: !(overflow || underflow),
            overflow,
            underflow,
        }
    }

    /// Elapsed running time in seconds.
    pub fn elapsed_secs(&self) -> f64 {
        self.elapsed.as_secs_f64()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_is_neither_flow() {
        let cases = [(Some(10), 10), (Some(10), 15), (Some(10), 3), (None, 3), (None, 0)];
        for (total, count) in cases {
            let fraction = total.map(|t| count as f64 / t as f64);
            let r = Receipt::new(total, count, fraction, Duration::from_secs(1));
            assert_eq!(r.success, !(r.overflow || r.underflow), "{total:?} {count}");
            if total.is_none() {
                assert!(!r.overflow && !r.underflow);
            }
        }
    }

    #[test]
    fn test_rate_and_percent() {
        let r = Receipt::new(Some(10), 15, Some(1.5), Duration::from_secs(5));
        assert_eq!(r.rate, 3.0);
        assert_eq!(r.percent, 150.0);
        assert!(r.overflow && !r.success);

        let r = Receipt::new(None, 4, None, Duration::ZERO);
        assert_eq!(r.rate, 0.0);
        assert_eq!(r.percent, 0.0);
    }
}
