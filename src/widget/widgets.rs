//! Monitor, elapsed-time and throughput widgets.

use super::format::{format_duration, DurationFormat, NumberFormat, PLACEHOLDER};
use super::traits::{Widget, WidgetSetting};
use crate::render::Snapshot;

fn percent_text(fraction: Option<f64>) -> String {
    fraction
        .map(|f| (f * 100.0 + 1e-9).floor())
        .filter(|p| p.is_finite() && *p >= 0.0)
        .map_or_else(|| PLACEHOLDER.to_owned(), |p| format!("{p:.0}"))
}

/// Position against the total: `45/100 [45%]`.
///
/// Template placeholders: `{count}`, `{total}`, `{percent}`.
#[derive(Debug, Clone)]
pub struct Monitor {
    setting: WidgetSetting,
    numbers: NumberFormat,
}

impl Monitor {
    /// Create a monitor widget.
    pub const fn new(setting: WidgetSetting, numbers: NumberFormat) -> Self {
        Self { setting, numbers }
    }
}

impl Widget for Monitor {
    fn render(&self, snapshot: &Snapshot<'_>) -> Option<String> {
        if !self.setting.is_enabled() {
            return None;
        }
        let count = self.numbers.count(snapshot.count as f64);
        let total = snapshot
            .total
            .map_or_else(|| PLACEHOLDER.to_owned(), |t| self.numbers.count(t as f64));
        let percent = percent_text(snapshot.fraction);

        if let Some(template) = self.setting.template() {
            return Some(
                template
                    .replace("{count}", &count)
                    .replace("{total}", &total)
                    .replace("{percent}", &percent),
            );
        }
        Some(match (snapshot.total, snapshot.fraction) {
            (Some(_), _) => format!("{count}/{total} [{percent}%]"),
            (None, Some(_)) => format!("{percent}%"),
            (None, None) => count,
        })
    }
}

/// Time spent so far: `in 12s`.
///
/// Template placeholder: `{elapsed}`.
#[derive(Debug, Clone)]
pub struct Elapsed {
    setting: WidgetSetting,
}

impl Elapsed {
    /// Create an elapsed-time widget.
    pub const fn new(setting: WidgetSetting) -> Self {
        Self { setting }
    }
}

impl Widget for Elapsed {
    fn render(&self, snapshot: &Snapshot<'_>) -> Option<String> {
        if !self.setting.is_enabled() {
            return None;
        }
        let format = if snapshot.is_finished() {
            DurationFormat::Precise
        } else {
            DurationFormat::Compact
        };
        let elapsed = format_duration(snapshot.elapsed.as_secs_f64(), format);
        Some(match self.setting.template() {
            Some(template) => template.replace("{elapsed}", &elapsed),
            None => format!("in {elapsed}"),
        })
    }
}

/// Throughput and time remaining: `(1.5k/s, eta: 40s)`.
///
/// Shown while running only when the total is known; the final line always
/// shows the rate. Template placeholders: `{rate}`, `{eta}` (`0s` on the
/// final line).
#[derive(Debug, Clone)]
pub struct Stats {
    setting: WidgetSetting,
    numbers: NumberFormat,
}

impl Stats {
    /// Create a stats widget.
    pub const fn new(setting: WidgetSetting, numbers: NumberFormat) -> Self {
        Self { setting, numbers }
    }
}

impl Widget for Stats {
    fn render(&self, snapshot: &Snapshot<'_>) -> Option<String> {
        if !self.setting.is_enabled() {
            return None;
        }
        let rate = self.numbers.rate(snapshot.rate);
        let finished = snapshot.is_finished();
        if !finished && snapshot.total.is_none() {
            return None;
        }

        let eta = if finished {
            format_duration(0.0, DurationFormat::Compact)
        } else {
            format_duration(snapshot.eta, DurationFormat::Compact)
        };
        Some(match self.setting.template() {
            Some(template) => template.replace("{rate}", &rate).replace("{eta}", &eta),
            None if finished => format!("({rate})"),
            None => format!("({rate}, eta: {eta})"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::Outcome;
    use std::time::Duration;

    fn snapshot(total: Option<u64>, count: u64) -> Snapshot<'static> {
        Snapshot {
            total,
            count,
            fraction: total.map(|t| count as f64 / t as f64),
            elapsed: Duration::from_secs(12),
            rate: 1500.0,
            eta: 40.0,
            ..Snapshot::default()
        }
    }

    #[test]
    fn test_monitor_known_total() {
        let monitor = Monitor::new(WidgetSetting::On, NumberFormat::default());
        assert_eq!(monitor.render(&snapshot(Some(100), 45)).as_deref(), Some("45/100 [45%]"));
        assert_eq!(monitor.render(&snapshot(Some(100), 29)).as_deref(), Some("29/100 [29%]"));
    }

    #[test]
    fn test_monitor_unknown_total() {
        let monitor = Monitor::new(WidgetSetting::On, NumberFormat::default());
        assert_eq!(monitor.render(&snapshot(None, 7)).as_deref(), Some("7"));
    }

    #[test]
    fn test_monitor_overflow_percent_is_uncapped() {
        let monitor = Monitor::new(WidgetSetting::On, NumberFormat::default());
        assert_eq!(monitor.render(&snapshot(Some(10), 15)).as_deref(), Some("15/10 [150%]"));
    }

    #[test]
    fn test_monitor_template() {
        let monitor = Monitor::new("{percent}% of {total}: {count}".into(), NumberFormat::default());
        assert_eq!(monitor.render(&snapshot(Some(200), 50)).as_deref(), Some("25% of 200: 50"));
        assert_eq!(monitor.render(&snapshot(None, 50)).as_deref(), Some("?% of ?: 50"));
    }

    #[test]
    fn test_disabled_widgets_render_nothing() {
        let snap = snapshot(Some(10), 1);
        assert!(Monitor::new(false.into(), NumberFormat::default()).render(&snap).is_none());
        assert!(Elapsed::new(false.into()).render(&snap).is_none());
        assert!(Stats::new(false.into(), NumberFormat::default()).render(&snap).is_none());
    }

    #[test]
    fn test_elapsed() {
        let elapsed = Elapsed::new(WidgetSetting::On);
        assert_eq!(elapsed.render(&snapshot(None, 0)).as_deref(), Some("in 12s"));
        let custom = Elapsed::new("[{elapsed}]".into());
        assert_eq!(custom.render(&snapshot(None, 0)).as_deref(), Some("[12s]"));

        let mut done = snapshot(None, 0);
        done.outcome = Some(Outcome::Success);
        done.elapsed = Duration::from_millis(12_340);
        assert_eq!(elapsed.render(&done).as_deref(), Some("in 12.3s"));
    }

    #[test]
    fn test_stats_only_with_total() {
        let stats = Stats::new(WidgetSetting::On, NumberFormat::default());
        assert_eq!(stats.render(&snapshot(Some(10), 1)).as_deref(), Some("(1.5k/s, eta: 40s)"));
        assert!(stats.render(&snapshot(None, 1)).is_none());
    }

    #[test]
    fn test_stats_unknown_eta() {
        let stats = Stats::new("{rate}|{eta}".into(), NumberFormat::default());
        let mut snap = snapshot(Some(10), 0);
        snap.eta = f64::INFINITY;
        assert_eq!(stats.render(&snap).as_deref(), Some("1.5k/s|?"));
    }

    #[test]
    fn test_stats_on_final_line() {
        let stats = Stats::new(WidgetSetting::On, NumberFormat::default());
        let mut snap = snapshot(None, 3);
        snap.outcome = Some(Outcome::Success);
        assert_eq!(stats.render(&snap).as_deref(), Some("(1.5k/s)"));
    }

    #[test]
    fn test_stats_template_on_final_line() {
        let stats = Stats::new("{rate}|{eta}".into(), NumberFormat::default());
        let mut snap = snapshot(None, 3);
        snap.outcome = Some(Outcome::Success);
        assert_eq!(stats.render(&snap).as_deref(), Some("1.5k/s|0s"));
    }
}
