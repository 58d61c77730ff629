//! Mutable bar state, guarded by the engine's lock.

use std::io;
use std::time::{Duration, Instant};

use super::Receipt;
use crate::config::Settings;
use crate::render::{Composer, Frame, Outcome, Snapshot};
use crate::terminal::{Capabilities, Output, Terminal};
use crate::timing::{EtaCalculator, Timer};

/// Fraction denominator in manual mode when no total was given.
const MANUAL_SCALE: u64 = 100;

/// Tolerance for fractional deltas that should sum to a whole item.
const FRACTION_EPSILON: f64 = 1e-9;

/// Counts, texts and clocks.
#[derive(Debug)]
pub(crate) struct Progress {
    pub total: Option<u64>,
    pub current: u64,
    pub skipped: u64,
    fractional: f64,
    manual: Option<f64>,
    manual_mode: bool,
    pub title: Option<String>,
    pub text: Option<String>,
    pub timer: Timer,
    origin: Instant,
    estimator: EtaCalculator,
    eta: f64,
}

impl Progress {
    pub fn new(total: Option<u64>, settings: &Settings, now: Instant) -> Self {
        let mut progress = Self {
            total,
            current: 0,
            skipped: 0,
            fractional: 0.0,
            manual: None,
            manual_mode: settings.manual,
            title: settings.title.clone(),
            text: None,
            timer: Timer::start_at(now),
            origin: now,
            estimator: EtaCalculator::new(settings.eta_alpha),
            eta: f64::INFINITY,
        };
        progress.refresh_eta(now);
        progress
    }

    pub const fn effective(&self) -> u64 {
        self.current.saturating_sub(self.skipped)
    }

    pub fn fraction(&self) -> Option<f64> {
        if self.manual_mode {
            return Some(self.manual.unwrap_or(0.0));
        }
        let effective = self.effective();
        self.total.map(|total| match total {
            0 if effective == 0 => 1.0,
            0 => effective as f64,
            total => effective as f64 / total as f64,
        })
    }

    /// Apply one update: a fraction in manual mode, a delta otherwise.
    /// Fractional deltas accumulate until they add up to whole items.
    pub fn update(&mut self, value: f64, skipped: bool) {
        if self.manual_mode {
            self.set_fraction(value);
        } else if value.is_finite() && value > 0.0 {
            let pending = self.fractional + value;
            let whole = (pending + FRACTION_EPSILON).floor();
            self.fractional = (pending - whole).max(0.0);
            self.add(whole as u64, skipped);
        }
    }

    pub fn add(&mut self, n: u64, skipped: bool) {
        self.current = self.current.saturating_add(n);
        if skipped {
            self.skipped = self.skipped.saturating_add(n);
        }
    }

    pub fn set_fraction(&mut self, fraction: f64) {
        if !fraction.is_finite() {
            return;
        }
        let fraction = fraction.max(0.0);
        let scale = self.total.unwrap_or(MANUAL_SCALE);
        self.manual = Some(fraction);
        self.current = (fraction * scale as f64).round() as u64;
        self.skipped = 0;
    }

    fn eta_total(&self) -> Option<u64> {
        match self.total {
            None if self.manual_mode => Some(MANUAL_SCALE),
            total => total,
        }
    }

    /// Sample the estimator against pause-free time.
    pub fn refresh_eta(&mut self, now: Instant) -> f64 {
        let at = self.origin + self.timer.elapsed_at(now);
        self.eta = self
            .estimator
            .update_at(self.effective(), self.eta_total(), at);
        self.eta
    }

    pub const fn rate(&self) -> f64 {
        self.estimator.rate()
    }

    pub fn elapsed(&self, now: Instant) -> Duration {
        self.timer.elapsed_at(now)
    }

    pub fn snapshot(&self, now: Instant) -> Snapshot<'_> {
        Snapshot {
            title: self.title.as_deref(),
            text: self.text.as_deref(),
            total: self.total,
            count: self.effective(),
            fraction: self.fraction(),
            elapsed: self.elapsed(now),
            rate: self.rate(),
            eta: self.eta,
            outcome: None,
        }
    }

    pub fn receipt(&self, now: Instant) -> Receipt {
        let fraction = if self.manual_mode || self.total.is_some() {
            self.fraction()
        } else {
            None
        };
        Receipt::new(self.total, self.effective(), fraction, self.elapsed(now))
    }
}

/// Everything behind the engine lock.
pub(crate) struct BarState {
    pub progress: Progress,
    pub running: bool,
    pub paused: bool,
    pub render_enabled: bool,
    pub receipt: Option<Receipt>,
    composer: Composer,
    terminal: Box<dyn Terminal>,
    last_frame: Option<Frame>,
    output_enabled: bool,
    write_receipt: bool,
}

impl BarState {
    pub fn new(
        total: Option<u64>,
        settings: &Settings,
        terminal: Box<dyn Terminal>,
        now: Instant,
    ) -> Self {
        Self {
            progress: Progress::new(total, settings, now),
            running: true,
            paused: false,
            render_enabled: terminal.capabilities().contains(Capabilities::FRAMES),
            receipt: None,
            composer: Composer::new(settings),
            terminal,
            last_frame: None,
            output_enabled: settings.enabled,
            write_receipt: settings.receipt,
        }
    }

    fn has(&self, capability: Capabilities) -> bool {
        self.terminal.capabilities().contains(capability)
    }

    /// Compose and write a frame.
    pub fn draw(&mut self, now: Instant) -> io::Result<()> {
        if !self.render_enabled {
            return Ok(());
        }
        let width = self.terminal.width();
        let snapshot = self.progress.snapshot(now);
        let frame = self.composer.compose(&snapshot, width);
        self.terminal.write(&frame.to_text())?;
        self.last_frame = Some(frame);
        Ok(())
    }

    pub fn hide_cursor(&mut self) -> io::Result<()> {
        if self.render_enabled && self.has(Capabilities::CURSOR) {
            self.terminal.hide_cursor()?;
        }
        Ok(())
    }

    /// Clear the frame and reveal the cursor.
    pub fn clear(&mut self) -> io::Result<()> {
        if self.render_enabled {
            self.terminal.clear_current_line()?;
            if self.has(Capabilities::CURSOR) {
                self.terminal.show_cursor()?;
            }
        }
        Ok(())
    }

    /// Write `text` above the frame, then put the frame back.
    pub fn print_line(&mut self, text: &str) -> io::Result<()> {
        if !self.output_enabled || (self.has(Capabilities::FRAMES) && !self.render_enabled) {
            let mut line = String::with_capacity(text.len() + 1);
            line.push_str(text);
            line.push('\n');
            return Output::Stderr.write_all(line.as_bytes());
        }
        self.terminal.write_line(text)?;
        if self.running && !self.paused && self.render_enabled {
            if let Some(frame) = &self.last_frame {
                self.terminal.write(&frame.to_text())?;
            }
        }
        Ok(())
    }

    /// Freeze the state and write the summary line. Returns the receipt and
    /// any write error.
    pub fn finalize(&mut self, now: Instant) -> (Receipt, io::Result<()>) {
        if self.paused {
            self.progress.timer.resume_at(now);
            self.paused = false;
        }
        self.running = false;
        let receipt = self.progress.receipt(now);
        self.receipt = Some(receipt.clone());
        let result = self.write_receipt(now, &receipt);
        (receipt, result)
    }

    fn write_receipt(&mut self, now: Instant, receipt: &Receipt) -> io::Result<()> {
        let interactive = self.has(Capabilities::FRAMES);
        if interactive && !self.render_enabled {
            // Restore the cursor even after the live frame was given up.
            let _ = self.terminal.clear_current_line();
            if self.has(Capabilities::CURSOR) {
                let _ = self.terminal.show_cursor();
            }
            return Ok(());
        }
        if self.write_receipt && self.has(Capabilities::RECEIPT) {
            let mut snapshot = self.progress.snapshot(now);
            snapshot.outcome = Some(Outcome::classify(receipt.count, receipt.total));
            snapshot.rate = receipt.rate;
            let line = self.composer.compose_receipt(&snapshot, self.terminal.width());
            self.terminal.write_line(&line)?;
        } else if interactive {
            self.terminal.clear_current_line()?;
        }
        if interactive && self.has(Capabilities::CURSOR) {
            self.terminal.show_cursor()?;
        }
        Ok(())
    }
}
