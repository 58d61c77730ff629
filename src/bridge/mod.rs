//! Print arbitration.
//!
//! A [`PrintBridge`] sits between application output and the live bar.
//! While a bar has it installed, text handed to [`PrintBridge::print`] goes
//! to the bar, which clears its frame, writes the text as a permanent line
//! and redraws. Text printed by a thread that paused the bridge (the bar's
//! own render path) or printed while nothing is installed goes straight to
//! the fallback stream. Other threads keep going through the bar and wait
//! for the redraw in progress.
//!
//! With the `subscriber` feature the bridge is also a
//! `tracing_subscriber::fmt::MakeWriter`, so a host can route its log
//! events through it.

#[cfg(feature = "subscriber")]
mod subscriber;

#[cfg(feature = "subscriber")]
pub use subscriber::EventWriter;

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::thread::{self, ThreadId};

use crate::terminal::Output;

/// Receives captured text.
pub type Sink = Arc<dyn Fn(&str) + Send + Sync>;

struct BridgeState {
    sink: Option<Sink>,
    /// One entry per outstanding pause.
    pauses: Vec<ThreadId>,
    enrich: bool,
    offset: i64,
    position: u64,
    fallback: Output,
}

impl BridgeState {
    fn paused_here(&self) -> bool {
        let id = thread::current().id();
        self.pauses.contains(&id)
    }
}

/// Routes application text around a live bar. Clones share state.
#[derive(Clone)]
pub struct PrintBridge {
    state: Arc<Mutex<BridgeState>>,
}

impl Default for PrintBridge {
    fn default() -> Self {
        Self::new()
    }
}

impl PrintBridge {
    /// A bridge that falls back to stderr.
    pub fn new() -> Self {
        Self::with_fallback(Output::Stderr)
    }

    /// A bridge that falls back to `fallback`.
    pub fn with_fallback(fallback: Output) -> Self {
        Self {
            state: Arc::new(Mutex::new(BridgeState {
                sink: None,
                pauses: Vec::new(),
                enrich: false,
                offset: 0,
                position: 0,
                fallback,
            })),
        }
    }

    fn lock(&self) -> MutexGuard<'_, BridgeState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Start redirecting text into `sink`.
    ///
    /// With `enrich`, each message is prefixed with `on {position + offset}: `.
    pub fn install(&self, sink: Sink, enrich: bool, offset: i64) {
        let mut state = self.lock();
        state.sink = Some(sink);
        state.pauses.clear();
        state.enrich = enrich;
        state.offset = offset;
        state.position = 0;
    }

    /// Stop redirecting.
    pub fn uninstall(&self) {
        let mut state = self.lock();
        state.sink = None;
        state.pauses.clear();
    }

    /// Bypass the sink for text printed on this thread until the matching
    /// [`resume`](Self::resume).
    pub fn pause(&self) {
        self.lock().pauses.push(thread::current().id());
    }

    /// Undo one [`pause`](Self::pause) made on this thread.
    pub fn resume(&self) {
        let id = thread::current().id();
        let mut state = self.lock();
        if let Some(at) = state.pauses.iter().rposition(|paused| *paused == id) {
            state.pauses.swap_remove(at);
        }
    }

    /// Set the position shown by enrichment.
    pub fn update_position(&self, position: u64) {
        self.lock().position = position;
    }

    /// Whether a sink is installed.
    pub fn is_installed(&self) -> bool {
        self.lock().sink.is_some()
    }

    /// Whether text printed on this thread currently reaches the sink.
    pub fn is_active(&self) -> bool {
        let state = self.lock();
        state.sink.is_some() && !state.paused_here()
    }

    /// Print one message.
    pub fn print(&self, text: &str) {
        let (route, fallback) = {
            let state = self.lock();
            match &state.sink {
                Some(sink) if !state.paused_here() => {
                    let prefix = state.enrich.then(|| {
                        let position = i64::try_from(state.position).unwrap_or(i64::MAX);
                        format!("on {}: ", position.saturating_add(state.offset))
                    });
                    (Some((Arc::clone(sink), prefix)), None)
                }
                _ => (None, Some(state.fallback.clone())),
            }
        };

        if let Some((sink, prefix)) = route {
            match prefix {
                Some(prefix) => sink(&enrich(text, &prefix)),
                None => sink(text),
            }
        } else if let Some(fallback) = fallback {
            let mut line = String::with_capacity(text.len() + 1);
            line.push_str(text);
            line.push('\n');
            // Nowhere left to report a failed fallback write.
            let _ = fallback.write_all(line.as_bytes());
        }
    }
}

impl std::fmt::Debug for PrintBridge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.lock();
        f.debug_struct("PrintBridge")
            .field("installed", &state.sink.is_some())
            .field("pauses", &state.pauses.len())
            .field("enrich", &state.enrich)
            .field("position", &state.position)
            .finish_non_exhaustive()
    }
}

/// Prefix the first line and indent the rest to line up under it.
fn enrich(text: &str, prefix: &str) -> String {
    let indent = " ".repeat(prefix.len());
    let mut out = String::with_capacity(text.len() + prefix.len());
    for (i, line) in text.split('\n').enumerate() {
        if i == 0 {
            out.push_str(prefix);
        } else {
            out.push('\n');
            out.push_str(&indent);
        }
        out.push_str(line);
    }
    out
}
