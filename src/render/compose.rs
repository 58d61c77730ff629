//! Frame composition: title, bar, spinner, widgets and text fitted to one line.

use super::{Outcome, Snapshot};
use crate::cells::ellipsize;
use crate::config::Settings;
use crate::style::{BarFlag, BarRenderer, FrameProducer};
use crate::widget::{Elapsed, Monitor, Stats, Widget};

/// One composed frame: the status line and, in dual-line mode, the text
/// line below it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Frame {
    /// The status line.
    pub line: String,
    /// The situational text line, in dual-line mode.
    pub continuation: Option<String>,
}

impl Frame {
    /// Number of terminal lines this frame occupies.
    pub const fn height(&self) -> usize {
        if self.continuation.is_some() {
            2
        } else {
            1
        }
    }

    /// The frame as newline-separated text.
    pub fn to_text(&self) -> String {
        match &self.continuation {
            Some(continuation) => format!("{}\n{continuation}", self.line),
            None => self.line.clone(),
        }
    }
}

/// Builds frames from snapshots.
pub struct Composer {
    bar: Box<dyn BarRenderer>,
    spinner: Box<dyn FrameProducer>,
    unknown: Box<dyn FrameProducer>,
    monitor: Monitor,
    elapsed: Elapsed,
    stats: Stats,
    dual_line: bool,
    receipt_text: bool,
}

impl Composer {
    /// Build the animations and widgets described by `settings`.
    pub fn new(settings: &Settings) -> Self {
        let bar = settings.bar.factory().build(settings.length);
        let spinner = settings.spinner.factory();
        let spinner = spinner.build(spinner.natural_length());
        let unknown = settings.unknown.factory().build(bar.width());
        Self {
            bar,
            spinner,
            unknown,
            monitor: Monitor::new(settings.monitor.clone(), settings.numbers.clone()),
            elapsed: Elapsed::new(settings.elapsed.clone()),
            stats: Stats::new(settings.stats.clone(), settings.numbers.clone()),
            dual_line: settings.dual_line,
            receipt_text: settings.receipt_text,
        }
    }

    /// Compose a running frame no wider than `width` columns.
    pub fn compose(&mut self, snapshot: &Snapshot<'_>, width: usize) -> Frame {
        let mut parts = Vec::with_capacity(7);
        if let Some(title) = non_empty(snapshot.title) {
            parts.push(single_line(title));
        }

        match snapshot.fraction {
            Some(fraction) => {
                let overflowed = fraction > 1.0;
                let flag = overflowed.then_some(BarFlag::Overflow);
                parts.push(self.bar.render(fraction, flag));
                if fraction < 1.0 {
                    parts.push(self.spinner.next_frame());
                }
            }
            None => parts.push(self.unknown.next_frame()),
        }

        self.push_widgets(snapshot, &mut parts);

        let text = non_empty(snapshot.text).map(single_line);
        let continuation = match text {
            Some(text) if self.dual_line => Some(ellipsize(&text, width)),
            Some(text) => {
                parts.push(text);
                None
            }
            None => None,
        };

        Frame {
            line: ellipsize(&parts.join(" "), width),
            continuation,
        }
    }

    /// Compose the summary line of a finished bar.
    ///
    /// The bar is pinned full, showing the overflow marker on overflow;
    /// underflow shows the actual completion with the underflow marker.
    pub fn compose_receipt(&self, snapshot: &Snapshot<'_>, width: usize) -> String {
        let outcome = snapshot.outcome.unwrap_or(Outcome::Success);
        let mut parts = Vec::with_capacity(8);
        if let Some(title) = non_empty(snapshot.title) {
            parts.push(single_line(title));
        }

        parts.push(match (outcome, snapshot.fraction) {
            (Outcome::Overflow, _) => self.bar.render(1.0, Some(BarFlag::Overflow)),
            (Outcome::Underflow, Some(fraction)) => {
                self.bar.render(fraction, Some(BarFlag::Underflow))
            }
            (Outcome::Underflow, None) => self.bar.render(0.0, Some(BarFlag::Underflow)),
            (Outcome::Success, _) => self.bar.render(1.0, None),
        });

        self.push_widgets(snapshot, &mut parts);
        parts.push(outcome.glyph().to_owned());

        if self.receipt_text {
            if let Some(text) = non_empty(snapshot.text) {
                parts.push(single_line(text));
            }
        }
        ellipsize(&parts.join(" "), width)
    }

    fn push_widgets(&self, snapshot: &Snapshot<'_>, parts: &mut Vec<String>) {
        let widgets: [&dyn Widget; 3] = [&self.monitor, &self.elapsed, &self.stats];
        parts.extend(widgets.iter().filter_map(|w| w.render(snapshot)));
    }
}

fn non_empty(text: Option<&str>) -> Option<&str> {
    text.filter(|t| !t.is_empty())
}

fn single_line(text: &str) -> String {
    text.replace(['\r', '\n'], " ")
}
