//! Built-in spinners, bars and themes.

use super::{BarFactory, BarSpec, FrameSpinner, ScrollSpinner, SpinnerFactory};
use std::sync::Arc;

/// Spinner used when a name is not found.
pub const DEFAULT_SPINNER: &str = "waves";
/// Bar used when a name is not found.
pub const DEFAULT_BAR: &str = "smooth";
/// Indeterminate-mode spinner used when a name is not found.
pub const DEFAULT_UNKNOWN: &str = "bounce";
/// Theme used when a name is not found.
pub const DEFAULT_THEME: &str = "smooth";

/// Known spinner names.
pub const SPINNER_NAMES: &[&str] = &["waves", "dots", "classic", "arrows", "bounce", "slide"];
/// Known bar names.
pub const BAR_NAMES: &[&str] = &["smooth", "classic", "blocks", "ascii"];
/// Known theme names.
pub const THEME_NAMES: &[&str] = &["smooth", "classic", "ascii"];

/// A coordinated set of style names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    /// Spinner shown beside a bar.
    pub spinner: &'static str,
    /// The bar.
    pub bar: &'static str,
    /// Spinner shown when the total is unknown.
    pub unknown: &'static str,
}

/// Look up a theme by name.
pub fn theme(name: &str) -> Theme {
    match name {
        "classic" => Theme {
            spinner: "classic",
            bar: "classic",
            unknown: "slide",
        },
        "ascii" => Theme {
            spinner: "classic",
            bar: "ascii",
            unknown: "slide",
        },
        other => {
            if other != DEFAULT_THEME {
                tracing::debug!(name = other, "unknown theme, using default");
            }
            Theme {
                spinner: DEFAULT_SPINNER,
                bar: DEFAULT_BAR,
                unknown: DEFAULT_UNKNOWN,
            }
        }
    }
}

/// Look up a spinner by name.
pub fn spinner_factory(name: &str) -> Arc<dyn SpinnerFactory> {
    match name {
        "dots" => Arc::new(FrameSpinner::new(["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"])),
        "classic" => Arc::new(FrameSpinner::new(["|", "/", "-", "\\"])),
        "arrows" => Arc::new(FrameSpinner::new(["←", "↖", "↑", "↗", "→", "↘", "↓", "↙"])),
        "bounce" => Arc::new(ScrollSpinner::new("●", ' ', true)),
        "slide" => Arc::new(ScrollSpinner::new("<=>", ' ', true)),
        other => {
            if other != DEFAULT_SPINNER {
                tracing::debug!(name = other, "unknown spinner, using default");
            }
            Arc::new(FrameSpinner::window("▁▂▃▄▅▆▇█▇▆▅▄▃▂", 3))
        }
    }
}

/// Look up a bar by name.
pub fn bar_factory(name: &str) -> Arc<dyn BarFactory> {
    match name {
        "classic" => Arc::new(
            BarSpec::new('=', ' ')
                .tip('>')
                .borders("[", "]")
                .errors("!", "x"),
        ),
        "blocks" => Arc::new(BarSpec::new('▓', '░')),
        "ascii" => Arc::new(
            BarSpec::new('#', '.')
                .borders("[", "]")
                .errors("!", "x"),
        ),
        other => {
            if other != DEFAULT_BAR {
                tracing::debug!(name = other, "unknown bar, using default");
            }
            Arc::new(BarSpec::new('█', ' ').gradient("▏▎▍▌▋▊▉█"))
        }
    }
}
