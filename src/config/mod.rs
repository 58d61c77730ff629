//! Configuration: the option bag, its resolved form, and shared defaults.
//!
//! A [`Config`] holds only the options a caller set. Bags stack with
//! [`Config::merged_over`]; [`Defaults`] keeps a shared overlay that every
//! bar started through it sits on top of. [`Config::resolve`] fills the
//! gaps with built-in defaults and validates the result into [`Settings`].

mod defaults;

pub use defaults::Defaults;

use crate::bridge::PrintBridge;
use crate::error::{Error, Result};
use crate::style::{theme, BarChoice, SpinnerChoice, DEFAULT_THEME};
use crate::terminal::Output;
use crate::timing::{Refresh, DEFAULT_ALPHA, DEFAULT_CALIBRATION};
use crate::widget::{NumberFormat, Scale, WidgetSetting};

/// Default inner bar length in columns.
pub const DEFAULT_LENGTH: usize = 40;

/// Options for a bar. Unset options fall through to the layer below.
#[derive(Debug, Clone, Default)]
pub struct Config {
    length: Option<usize>,
    spinner: Option<SpinnerChoice>,
    bar: Option<BarChoice>,
    unknown: Option<SpinnerChoice>,
    theme: Option<String>,
    title: Option<String>,
    output: Option<Output>,
    force_tty: Option<bool>,
    disable: Option<bool>,
    monitor: Option<WidgetSetting>,
    elapsed: Option<WidgetSetting>,
    stats: Option<WidgetSetting>,
    receipt: Option<bool>,
    receipt_text: Option<bool>,
    manual: Option<bool>,
    ctrl_c: Option<bool>,
    dual_line: Option<bool>,
    refresh_secs: Option<f64>,
    calibrate: Option<f64>,
    eta_alpha: Option<f64>,
    unit: Option<String>,
    scale: Option<Option<Scale>>,
    precision: Option<usize>,
    enrich_print: Option<bool>,
    enrich_offset: Option<i64>,
    bridge: Option<PrintBridge>,
}

impl Config {
    /// An empty bag.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inner bar length in columns.
    #[must_use]
    pub const fn length(mut self, length: usize) -> Self {
        self.length = Some(length);
        self
    }

    /// Spinner shown beside the bar.
    #[must_use]
    pub fn spinner(mut self, spinner: impl Into<SpinnerChoice>) -> Self {
        self.spinner = Some(spinner.into());
        self
    }

    /// Bar style.
    #[must_use]
    pub fn bar(mut self, bar: impl Into<BarChoice>) -> Self {
        self.bar = Some(bar.into());
        self
    }

    /// Spinner shown when the total is unknown.
    #[must_use]
    pub fn unknown(mut self, spinner: impl Into<SpinnerChoice>) -> Self {
        self.unknown = Some(spinner.into());
        self
    }

    /// Theme supplying any style not set explicitly.
    #[must_use]
    pub fn theme(mut self, name: impl Into<String>) -> Self {
        self.theme = Some(name.into());
        self
    }

    /// Initial title.
    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Output stream.
    #[must_use]
    pub fn output(mut self, output: Output) -> Self {
        self.output = Some(output);
        self
    }

    /// Treat the output as interactive (`true`) or not (`false`) instead of
    /// detecting it.
    #[must_use]
    pub const fn force_tty(mut self, tty: bool) -> Self {
        self.force_tty = Some(tty);
        self
    }

    /// Suppress all output. Receipts are still produced.
    #[must_use]
    pub const fn disable(mut self, disable: bool) -> Self {
        self.disable = Some(disable);
        self
    }

    /// Monitor widget (`{count}`, `{total}`, `{percent}`).
    #[must_use]
    pub fn monitor(mut self, setting: impl Into<WidgetSetting>) -> Self {
        self.monitor = Some(setting.into());
        self
    }

    /// Elapsed widget (`{elapsed}`).
    #[must_use]
    pub fn elapsed(mut self, setting: impl Into<WidgetSetting>) -> Self {
        self.elapsed = Some(setting.into());
        self
    }

    /// Stats widget (`{rate}`, `{eta}`).
    #[must_use]
    pub fn stats(mut self, setting: impl Into<WidgetSetting>) -> Self {
        self.stats = Some(setting.into());
        self
    }

    /// Print a summary line when the bar finishes.
    #[must_use]
    pub const fn receipt(mut self, receipt: bool) -> Self {
        self.receipt = Some(receipt);
        self
    }

    /// Include the last situational text in the summary line.
    #[must_use]
    pub const fn receipt_text(mut self, include: bool) -> Self {
        self.receipt_text = Some(include);
        self
    }

    /// Interpret updates as completion fractions instead of deltas.
    #[must_use]
    pub const fn manual(mut self, manual: bool) -> Self {
        self.manual = Some(manual);
        self
    }

    /// Finish the bar and exit with status 130 on Ctrl+C.
    #[must_use]
    pub const fn ctrl_c(mut self, handle: bool) -> Self {
        self.ctrl_c = Some(handle);
        self
    }

    /// Show the situational text on a second line.
    #[must_use]
    pub const fn dual_line(mut self, dual: bool) -> Self {
        self.dual_line = Some(dual);
        self
    }

    /// Fixed redraw period in seconds; zero selects auto calibration.
    #[must_use]
    pub const fn refresh_secs(mut self, secs: f64) -> Self {
        self.refresh_secs = Some(secs);
        self
    }

    /// Throughput (items/s) that redraws at the maximum frame rate.
    #[must_use]
    pub const fn calibrate(mut self, throughput: f64) -> Self {
        self.calibrate = Some(throughput);
        self
    }

    /// ETA smoothing factor in `(0, 1]`.
    #[must_use]
    pub const fn eta_alpha(mut self, alpha: f64) -> Self {
        self.eta_alpha = Some(alpha);
        self
    }

    /// Unit label for counts and rates.
    #[must_use]
    pub fn unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = Some(unit.into());
        self
    }

    /// Prefix scaling for counts; `None` shows raw numbers.
    #[must_use]
    pub fn scale(mut self, scale: impl Into<Option<Scale>>) -> Self {
        self.scale = Some(scale.into());
        self
    }

    /// Decimal places for non-integral numbers.
    #[must_use]
    pub const fn precision(mut self, precision: usize) -> Self {
        self.precision = Some(precision);
        self
    }

    /// Prefix text captured by the print bridge with the current position.
    #[must_use]
    pub const fn enrich_print(mut self, enrich: bool) -> Self {
        self.enrich_print = Some(enrich);
        self
    }

    /// Offset added to the position shown by enrichment.
    #[must_use]
    pub const fn enrich_offset(mut self, offset: i64) -> Self {
        self.enrich_offset = Some(offset);
        self
    }

    /// Use a caller-owned print bridge instead of a private one.
    #[must_use]
    pub fn bridge(mut self, bridge: PrintBridge) -> Self {
        self.bridge = Some(bridge);
        self
    }

    /// Overlay `self` on `base`: options set here win.
    #[must_use]
    pub fn merged_over(&self, base: &Self) -> Self {
        Self {
            length: self.length.or(base.length),
            spinner: self.spinner.clone().or_else(|| base.spinner.clone()),
            bar: self.bar.clone().or_else(|| base.bar.clone()),
            unknown: self.unknown.clone().or_else(|| base.unknown.clone()),
            theme: self.theme.clone().or_else(|| base.theme.clone()),
            title: self.title.clone().or_else(|| base.title.clone()),
            output: self.output.clone().or_else(|| base.output.clone()),
            force_tty: self.force_tty.or(base.force_tty),
            disable: self.disable.or(base.disable),
            monitor: self.monitor.clone().or_else(|| base.monitor.clone()),
            elapsed: self.elapsed.clone().or_else(|| base.elapsed.clone()),
            stats: self.stats.clone().or_else(|| base.stats.clone()),
            receipt: self.receipt.or(base.receipt),
            receipt_text: self.receipt_text.or(base.receipt_text),
            manual: self.manual.or(base.manual),
            ctrl_c: self.ctrl_c.or(base.ctrl_c),
            dual_line: self.dual_line.or(base.dual_line),
            refresh_secs: self.refresh_secs.or(base.refresh_secs),
            calibrate: self.calibrate.or(base.calibrate),
            eta_alpha: self.eta_alpha.or(base.eta_alpha),
            unit: self.unit.clone().or_else(|| base.unit.clone()),
            scale: self.scale.or(base.scale),
            precision: self.precision.or(base.precision),
            enrich_print: self.enrich_print.or(base.enrich_print),
            enrich_offset: self.enrich_offset.or(base.enrich_offset),
            bridge: self.bridge.clone().or_else(|| base.bridge.clone()),
        }
    }

    /// Check every set option is in range.
    pub fn validate(&self) -> Result<()> {
        if self.length == Some(0) {
            return Err(invalid("length", "must be at least 1"));
        }
        if let Some(alpha) = self.eta_alpha {
            if !(alpha > 0.0 && alpha <= 1.0) {
                return Err(invalid("eta_alpha", format!("{alpha} is outside (0, 1]")));
            }
        }
        if let Some(calibration) = self.calibrate {
            if !(calibration > 0.0 && calibration.is_finite()) {
                return Err(invalid("calibrate", format!("{calibration} is not a positive throughput")));
            }
        }
        if let Some(secs) = self.refresh_secs {
            if !secs.is_finite() {
                return Err(invalid("refresh_secs", format!("{secs} is not finite")));
            }
        }
        Ok(())
    }

    /// Validate and fill in defaults.
    pub fn resolve(&self) -> Result<Settings> {
        self.validate()?;
        Ok(self.settings())
    }

    /// Fill in defaults, replacing out-of-range options with their defaults.
    pub fn resolve_lenient(&self) -> Settings {
        if let Err(e) = self.validate() {
            tracing::warn!(error = %e, "falling back to defaults for invalid options");
        }
        self.settings()
    }

    fn settings(&self) -> Settings {
        let theme = theme(self.theme.as_deref().unwrap_or(DEFAULT_THEME));
        let alpha = self
            .eta_alpha
            .filter(|a| *a > 0.0 && *a <= 1.0)
            .unwrap_or(DEFAULT_ALPHA);
        let calibration = self
            .calibrate
            .filter(|c| *c > 0.0 && c.is_finite())
            .unwrap_or(DEFAULT_CALIBRATION);

        Settings {
            length: self.length.filter(|l| *l > 0).unwrap_or(DEFAULT_LENGTH),
            spinner: self.spinner.clone().unwrap_or_else(|| theme.spinner.into()),
            bar: self.bar.clone().unwrap_or_else(|| theme.bar.into()),
            unknown: self.unknown.clone().unwrap_or_else(|| theme.unknown.into()),
            title: self.title.clone(),
            output: self.output.clone().unwrap_or_default(),
            force_tty: self.force_tty,
            enabled: !self.disable.unwrap_or(false),
            monitor: self.monitor.clone().unwrap_or_default(),
            elapsed: self.elapsed.clone().unwrap_or_default(),
            stats: self.stats.clone().unwrap_or_default(),
            receipt: self.receipt.unwrap_or(true),
            receipt_text: self.receipt_text.unwrap_or(true),
            manual: self.manual.unwrap_or(false),
            ctrl_c: self.ctrl_c.unwrap_or(true),
            dual_line: self.dual_line.unwrap_or(false),
            refresh: Refresh::from_secs(self.refresh_secs.unwrap_or(0.0), calibration),
            eta_alpha: alpha,
            numbers: NumberFormat {
                unit: self.unit.clone().unwrap_or_default(),
                scale: self.scale.flatten(),
                precision: self.precision.unwrap_or(1),
            },
            enrich_print: self.enrich_print.unwrap_or(true),
            enrich_offset: self.enrich_offset.unwrap_or(0),
            bridge: self.bridge.clone(),
        }
    }
}

fn invalid(name: &'static str, reason: impl Into<String>) -> Error {
    Error::InvalidSetting {
        name,
        reason: reason.into(),
    }
}

/// Fully resolved options for one bar.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Inner bar length in columns.
    pub length: usize,
    /// Spinner shown beside the bar.
    pub spinner: SpinnerChoice,
    /// Bar style.
    pub bar: BarChoice,
    /// Spinner shown when the total is unknown.
    pub unknown: SpinnerChoice,
    /// Initial title.
    pub title: Option<String>,
    /// Output stream.
    pub output: Output,
    /// Interactive override; `None` detects.
    pub force_tty: Option<bool>,
    /// Whether anything is written at all.
    pub enabled: bool,
    /// Monitor widget.
    pub monitor: WidgetSetting,
    /// Elapsed widget.
    pub elapsed: WidgetSetting,
    /// Stats widget.
    pub stats: WidgetSetting,
    /// Print a summary line at the end.
    pub receipt: bool,
    /// Include the last text in the summary line.
    pub receipt_text: bool,
    /// Updates are completion fractions.
    pub manual: bool,
    /// Handle Ctrl+C.
    pub ctrl_c: bool,
    /// Situational text on its own line.
    pub dual_line: bool,
    /// Redraw pacing.
    pub refresh: Refresh,
    /// ETA smoothing factor.
    pub eta_alpha: f64,
    /// Count and rate display.
    pub numbers: NumberFormat,
    /// Prefix captured prints with the position.
    pub enrich_print: bool,
    /// Offset for the enrichment position.
    pub enrich_offset: i64,
    /// Caller-owned print bridge.
    pub bridge: Option<PrintBridge>,
}

impl Default for Settings {
    fn default() -> Self {
        Config::default().settings()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let s = Settings::default();
        assert_eq!(s.length, DEFAULT_LENGTH);
        assert!(s.enabled && s.receipt && s.receipt_text && s.ctrl_c && s.enrich_print);
        assert!(!s.manual && !s.dual_line);
        assert_eq!(s.refresh, Refresh::Auto { calibration: DEFAULT_CALIBRATION });
        assert_eq!(s.eta_alpha, DEFAULT_ALPHA);
        assert_eq!(s.numbers, NumberFormat::default());
        assert_eq!(s.monitor, WidgetSetting::On);
    }

    #[test]
    fn test_merge_prefers_receiver() {
        let base = Config::new().length(10).title("base").manual(true);
        let call = Config::new().length(20);
        let merged = call.merged_over(&base).resolve().unwrap();
        assert_eq!(merged.length, 20);
        assert_eq!(merged.title.as_deref(), Some("base"));
        assert!(merged.manual);
    }

    #[test]
    fn test_explicit_no_scale_overrides_base() {
        let base = Config::new().scale(Scale::Si);
        let merged = Config::new().scale(None).merged_over(&base).resolve().unwrap();
        assert_eq!(merged.numbers.scale, None);
    }

    #[test]
    fn test_theme_fills_unset_styles() {
        let s = Config::new().theme("classic").bar("blocks").resolve().unwrap();
        assert!(matches!(s.bar, BarChoice::Named(ref n) if n == "blocks"));
        assert!(matches!(s.spinner, SpinnerChoice::Named(ref n) if n == "classic"));
        assert!(matches!(s.unknown, SpinnerChoice::Named(ref n) if n == "slide"));
    }

    #[test]
    fn test_refresh_override() {
        let s = Config::new().refresh_secs(0.5).resolve().unwrap();
        assert_eq!(s.refresh, Refresh::Fixed(std::time::Duration::from_millis(500)));
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        assert!(matches!(
            Config::new().eta_alpha(0.0).resolve(),
            Err(Error::InvalidSetting { name: "eta_alpha", .. })
        ));
        assert!(Config::new().length(0).resolve().is_err());
        assert!(Config::new().calibrate(-1.0).resolve().is_err());
        assert!(Config::new().refresh_secs(f64::NAN).resolve().is_err());
    }

    #[test]
    fn test_lenient_resolution_falls_back() {
        let s = Config::new().eta_alpha(3.0).length(0).resolve_lenient();
        assert_eq!(s.eta_alpha, DEFAULT_ALPHA);
        assert_eq!(s.length, DEFAULT_LENGTH);
    }
}
