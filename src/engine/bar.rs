//! The live bar, its handles, and the pause guard.

use std::io;
use std::ops::ControlFlow;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use std::time::{Duration, Instant};

use super::interrupt;
use super::state::BarState;
use super::ticker::Ticker;
use super::Receipt;
use crate::bridge::{PrintBridge, Sink};
use crate::config::{Config, Settings};
use crate::error::{Error, Result};
use crate::terminal::{self, Output, Terminal};
use crate::widget::{format_duration, DurationFormat, Monitor, Widget, WidgetSetting};

/// State shared by the bar, its handles, the ticker and the interrupt slot.
pub(crate) struct Shared {
    state: Mutex<BarState>,
    ticker: Mutex<Option<Ticker>>,
    bridge: PrintBridge,
    settings: Settings,
}

impl Shared {
    fn lock(&self) -> MutexGuard<'_, BarState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// One redraw. Runs with the bridge paused so output produced while
    /// rendering goes straight to its destination.
    fn tick(&self) -> ControlFlow<(), Duration> {
        self.bridge.pause();
        let outcome = catch_unwind(AssertUnwindSafe(|| self.render_tick()));
        let flow = match outcome {
            Ok(Ok(Some(interval))) => ControlFlow::Continue(interval),
            Ok(Ok(None)) => ControlFlow::Break(()),
            Ok(Err(e)) => {
                self.lock().render_enabled = false;
                tracing::warn!(error = %e, "terminal write failed, live frame disabled");
                ControlFlow::Break(())
            }
            Err(_) => {
                self.lock().render_enabled = false;
                tracing::warn!("frame rendering panicked, live frame disabled");
                ControlFlow::Break(())
            }
        };
        self.bridge.resume();
        flow
    }

    fn render_tick(&self) -> io::Result<Option<Duration>> {
        let mut state = self.lock();
        if !state.running || !state.render_enabled {
            return Ok(None);
        }
        let now = Instant::now();
        state.progress.refresh_eta(now);
        if !state.paused {
            state.draw(now)?;
        }
        let interval = self.settings.refresh.interval(state.progress.rate());
        tracing::trace!(?interval, count = state.progress.effective(), "tick");
        Ok(Some(interval))
    }

    /// Write a permanent line above the frame.
    fn print_line(&self, text: &str) {
        self.bridge.pause();
        let result = self.lock().print_line(text);
        if let Err(e) = result {
            tracing::debug!(error = %e, "print failed");
        }
        self.bridge.resume();
    }

    fn count_changed(&self, state: &BarState) {
        self.bridge.update_position(state.progress.effective());
    }

    /// Finalize once. Later calls return the first receipt.
    pub(crate) fn finish(&self) -> Receipt {
        if let Some(receipt) = self.lock().receipt.clone() {
            return receipt;
        }

        let ticker = self
            .ticker
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(ticker) = ticker {
            ticker.stop();
        }
        self.bridge.uninstall();

        let (receipt, result) = {
            let mut state = self.lock();
            if let Some(receipt) = state.receipt.clone() {
                return receipt;
            }
            state.finalize(Instant::now())
        };
        interrupt::deregister(self);

        if let Err(e) = result {
            tracing::warn!(error = %e, "could not write the final line");
        }
        tracing::debug!(
            total = ?receipt.total,
            count = receipt.count,
            elapsed = ?receipt.elapsed,
            success = receipt.success,
            overflow = receipt.overflow,
            underflow = receipt.underflow,
            "bar finished"
        );
        receipt
    }
}

/// A live progress bar.
///
/// The bar redraws itself on a background thread until it is finished with
/// [`finish`](Self::finish) or dropped. Progress is reported through
/// [`BarHandle`]s, which can be cloned and sent to other threads.
///
/// ```no_run
/// use livebar::{Config, LiveBar};
///
/// let bar = LiveBar::start(Some(3), &Config::new().title("copy"));
/// let handle = bar.handle();
/// for _ in 0..3 {
///     handle.inc();
/// }
/// let receipt = bar.finish();
/// assert!(receipt.success);
/// ```
pub struct LiveBar {
    shared: Arc<Shared>,
}

impl LiveBar {
    /// Start a bar. Never fails: invalid options fall back to their defaults
    /// and setup problems are logged.
    pub fn start(total: Option<u64>, config: &Config) -> Self {
        let settings = config.resolve_lenient();
        let terminal = terminal::select(&settings.output, settings.enabled, settings.force_tty);
        Self::launch(total, settings, terminal, false).unwrap_or_else(|(bar, _)| bar)
    }

    /// Start a bar, surfacing invalid options and setup failures.
    pub fn try_start(total: Option<u64>, config: &Config) -> Result<Self> {
        let settings = config.resolve()?;
        let terminal = terminal::select(&settings.output, settings.enabled, settings.force_tty);
        Self::launch(total, settings, terminal, true).map_err(|(bar, e)| {
            bar.abandon();
            e
        })
    }

    /// Start a bar drawing through a caller-provided writer.
    pub fn with_terminal(total: Option<u64>, config: &Config, terminal: Box<dyn Terminal>) -> Self {
        let settings = config.resolve_lenient();
        Self::launch(total, settings, terminal, false).unwrap_or_else(|(bar, _)| bar)
    }

    /// Bring a bar up. In strict mode the first setup failure is returned
    /// together with the half-started bar, which the caller discards.
    fn launch(
        total: Option<u64>,
        settings: Settings,
        terminal: Box<dyn Terminal>,
        strict: bool,
    ) -> std::result::Result<Self, (Self, Error)> {
        let now = Instant::now();
        let bridge = settings
            .bridge
            .clone()
            .unwrap_or_else(|| PrintBridge::with_fallback(Output::Stderr));
        let state = BarState::new(total, &settings, terminal, now);
        let bar = Self {
            shared: Arc::new(Shared {
                state: Mutex::new(state),
                ticker: Mutex::new(None),
                bridge,
                settings,
            }),
        };
        let shared = &bar.shared;
        let settings = &shared.settings;
        tracing::debug!(?total, manual = settings.manual, "bar started");

        if settings.ctrl_c {
            if let Err(e) = interrupt::register(shared) {
                if strict {
                    return Err((bar, e));
                }
                tracing::warn!(error = %e, "interrupt handler not installed");
            }
        }

        let first = {
            let mut state = shared.lock();
            let drawn = state.hide_cursor().and_then(|()| state.draw(now));
            if let Err(e) = drawn {
                state.render_enabled = false;
                drop(state);
                if strict {
                    return Err((bar, e.into()));
                }
                tracing::warn!(error = %e, "terminal write failed, live frame disabled");
                None
            } else if state.render_enabled {
                Some(settings.refresh.interval(state.progress.rate()))
            } else {
                None
            }
        };

        if let Some(first) = first {
            let weak = Arc::downgrade(shared);
            let spawned = Ticker::spawn(first, move || match weak.upgrade() {
                Some(shared) => shared.tick(),
                None => ControlFlow::Break(()),
            });
            match spawned {
                Ok(ticker) => {
                    *shared.ticker.lock().unwrap_or_else(PoisonError::into_inner) = Some(ticker);
                }
                Err(e) if strict => return Err((bar, Error::Spawn(e))),
                Err(e) => tracing::warn!(error = %e, "redraw thread not started"),
            }
        }

        if settings.enabled {
            let weak: Weak<Shared> = Arc::downgrade(shared);
            let sink: Sink = Arc::new(move |text: &str| {
                if let Some(shared) = weak.upgrade() {
                    shared.print_line(text);
                }
            });
            shared
                .bridge
                .install(sink, settings.enrich_print, settings.enrich_offset);
        }
        Ok(bar)
    }

    /// Tear down a bar that failed to start, without a summary line.
    fn abandon(self) {
        {
            let mut state = self.shared.lock();
            let receipt = state.progress.receipt(Instant::now());
            state.running = false;
            state.receipt = Some(receipt);
            let _ = state.clear();
        }
        interrupt::deregister(&self.shared);
    }

    /// A handle for reporting progress.
    pub fn handle(&self) -> BarHandle {
        BarHandle {
            shared: Arc::clone(&self.shared),
        }
    }

    /// Finish the bar and return its receipt.
    pub fn finish(self) -> Receipt {
        self.shared.finish()
    }
}

impl Drop for LiveBar {
    fn drop(&mut self) {
        self.shared.finish();
    }
}

impl std::fmt::Debug for LiveBar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LiveBar").finish_non_exhaustive()
    }
}

/// Reports progress to a [`LiveBar`]. Cheap to clone.
///
/// Every mutation after the bar finished is ignored.
#[derive(Clone)]
pub struct BarHandle {
    shared: Arc<Shared>,
}

impl BarHandle {
    fn mutate(&self, f: impl FnOnce(&mut BarState)) {
        let mut state = self.shared.lock();
        if state.running {
            f(&mut state);
            self.shared.count_changed(&state);
        }
    }

    /// Count one item.
    pub fn inc(&self) {
        self.inc_by(1);
    }

    /// Count `n` items.
    pub fn inc_by(&self, n: u64) {
        self.mutate(|state| state.progress.add(n, false));
    }

    /// Count `n` items that were bypassed rather than processed.
    pub fn skip(&self, n: u64) {
        self.mutate(|state| state.progress.add(n, true));
    }

    /// Report progress: a delta, or in manual mode a completion fraction.
    /// Skipped deltas do not count toward the effective count.
    pub fn update(&self, value: f64, skipped: bool) {
        self.mutate(|state| state.progress.update(value, skipped));
    }

    /// Set the completion fraction directly.
    pub fn set_fraction(&self, fraction: f64) {
        self.mutate(|state| state.progress.set_fraction(fraction));
    }

    /// The effective count.
    pub fn current(&self) -> u64 {
        self.shared.lock().progress.effective()
    }

    /// The situational text.
    pub fn text(&self) -> Option<String> {
        self.shared.lock().progress.text.clone()
    }

    /// Replace the situational text.
    pub fn set_text(&self, text: impl Into<String>) {
        let text = text.into();
        self.mutate(|state| state.progress.text = Some(text));
    }

    /// The title.
    pub fn title(&self) -> Option<String> {
        self.shared.lock().progress.title.clone()
    }

    /// Replace the title.
    pub fn set_title(&self, title: impl Into<String>) {
        let title = title.into();
        self.mutate(|state| state.progress.title = Some(title));
    }

    /// Running time, pauses excluded. Frozen once finished.
    pub fn elapsed(&self) -> Duration {
        let state = self.shared.lock();
        state
            .receipt
            .as_ref()
            .map_or_else(|| state.progress.elapsed(Instant::now()), |r| r.elapsed)
    }

    /// Formatted position, as the monitor widget shows it.
    pub fn monitor(&self) -> String {
        let setting = match &self.shared.settings.monitor {
            WidgetSetting::Off => WidgetSetting::On,
            setting => setting.clone(),
        };
        let monitor = Monitor::new(setting, self.shared.settings.numbers.clone());
        let state = self.shared.lock();
        monitor
            .render(&state.progress.snapshot(Instant::now()))
            .unwrap_or_default()
    }

    /// Formatted throughput.
    pub fn rate(&self) -> String {
        let state = self.shared.lock();
        let rate = state
            .receipt
            .as_ref()
            .map_or_else(|| state.progress.rate(), |r| r.rate);
        self.shared.settings.numbers.rate(rate)
    }

    /// Formatted time remaining, sampling the estimator first.
    pub fn eta(&self) -> String {
        let mut state = self.shared.lock();
        let eta = if state.running {
            state.progress.refresh_eta(Instant::now())
        } else {
            0.0
        };
        format_duration(eta, DurationFormat::Compact)
    }

    /// The receipt, once finished.
    pub fn receipt(&self) -> Option<Receipt> {
        self.shared.lock().receipt.clone()
    }

    /// Whether the bar is still running.
    pub fn is_running(&self) -> bool {
        self.shared.lock().running
    }

    /// The print bridge this bar routes captured text through.
    pub fn bridge(&self) -> PrintBridge {
        self.shared.bridge.clone()
    }

    /// Print a line above the bar without disturbing it.
    pub fn println(&self, text: impl AsRef<str>) {
        self.shared.print_line(text.as_ref());
    }

    /// Stop the clock and the redraws and clear the frame, e.g. to prompt
    /// the user. The bar resumes when the returned guard is resumed or
    /// dropped. Pausing a paused or finished bar returns a guard that does
    /// nothing.
    #[must_use = "the bar resumes when the guard is dropped"]
    pub fn pause(&self) -> Resume {
        let result = {
            let mut state = self.shared.lock();
            if !state.running || state.paused {
                return Resume { shared: None };
            }
            state.paused = true;
            state.progress.timer.pause_at(Instant::now());
            state.clear()
        };
        if let Err(e) = result {
            tracing::debug!(error = %e, "could not clear the frame");
        }
        tracing::debug!("bar paused");
        Resume {
            shared: Some(Arc::clone(&self.shared)),
        }
    }
}

impl std::fmt::Debug for BarHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BarHandle").finish_non_exhaustive()
    }
}

/// Resumes a paused bar when resumed or dropped.
#[derive(Default)]
pub struct Resume {
    shared: Option<Arc<Shared>>,
}

impl Resume {
    /// Resume now.
    pub fn resume(self) {
        drop(self);
    }
}

impl Drop for Resume {
    fn drop(&mut self) {
        let Some(shared) = self.shared.take() else {
            return;
        };
        let mut state = shared.lock();
        if !state.running || !state.paused {
            return;
        }
        let now = Instant::now();
        state.paused = false;
        state.progress.timer.resume_at(now);
        let result = state.hide_cursor().and_then(|()| state.draw(now));
        drop(state);
        if let Err(e) = result {
            tracing::debug!(error = %e, "could not redraw after resume");
        }
        tracing::debug!("bar resumed");
    }
}

impl std::fmt::Debug for Resume {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Resume")
            .field("active", &self.shared.is_some())
            .finish()
    }
}
