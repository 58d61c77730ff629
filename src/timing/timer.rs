//! Elapsed-time clock with pause support.

use std::time::{Duration, Instant};

/// Wall-clock time spent running, excluding pauses.
#[derive(Debug, Clone, Copy)]
pub struct Timer {
    started: Instant,
    paused_total: Duration,
    paused_since: Option<Instant>,
}

impl Timer {
    /// Start a timer now.
    pub fn start() -> Self {
        Self::start_at(Instant::now())
    }

    /// Start a timer at a given instant.
    pub const fn start_at(started: Instant) -> Self {
        Self {
            started,
            paused_total: Duration::ZERO,
            paused_since: None,
        }
    }

    /// Elapsed running time as of now.
    pub fn elapsed(&self) -> Duration {
        self.elapsed_at(Instant::now())
    }

    /// Elapsed running time as of `now`.
    pub fn elapsed_at(&self, now: Instant) -> Duration {
        let current_pause = self
            .paused_since
            .map_or(Duration::ZERO, |since| now.saturating_duration_since(since));
        now.saturating_duration_since(self.started)
            .saturating_sub(self.paused_total)
            .saturating_sub(current_pause)
    }

    /// Stop the clock. Pausing a paused timer does nothing.
    pub fn pause_at(&mut self, now: Instant) {
        if self.paused_since.is_none() {
            self.paused_since = Some(now);
        }
    }

    /// Restart the clock. Resuming a running timer does nothing.
    pub fn resume_at(&mut self, now: Instant) {
        if let Some(since) = self.paused_since.take() {
            self.paused_total += now.saturating_duration_since(since);
        }
    }

    /// Whether the clock is stopped.
    #[inline]
    pub const fn is_paused(&self) -> bool {
        self.paused_since.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_elapsed_grows_while_running() {
        let t0 = Instant::now();
        let timer = Timer::start_at(t0);
        assert_eq!(timer.elapsed_at(t0 + Duration::from_secs(3)), Duration::from_secs(3));
    }

    #[test]
    fn test_pause_freezes_elapsed() {
        let t0 = Instant::now();
        let mut timer = Timer::start_at(t0);
        timer.pause_at(t0 + Duration::from_secs(2));
        assert!(timer.is_paused());
        assert_eq!(timer.elapsed_at(t0 + Duration::from_secs(2)), Duration::from_secs(2));
        assert_eq!(timer.elapsed_at(t0 + Duration::from_secs(9)), Duration::from_secs(2));
        timer.resume_at(t0 + Duration::from_secs(10));
        assert_eq!(timer.elapsed_at(t0 + Duration::from_secs(11)), Duration::from_secs(3));
    }

    #[test]
    fn test_double_pause_keeps_first_mark() {
        let t0 = Instant::now();
        let mut timer = Timer::start_at(t0);
        timer.pause_at(t0 + Duration::from_secs(1));
        timer.pause_at(t0 + Duration::from_secs(4));
        timer.resume_at(t0 + Duration::from_secs(5));
        assert_eq!(timer.elapsed_at(t0 + Duration::from_secs(5)), Duration::from_secs(1));
    }

    #[test]
    fn test_real_clock_pause() {
        let mut timer = Timer::start();
        timer.pause_at(Instant::now());
        let before = timer.elapsed();
        std::thread::sleep(Duration::from_millis(30));
        assert!(timer.elapsed().abs_diff(before) < Duration::from_millis(5));
    }
}
