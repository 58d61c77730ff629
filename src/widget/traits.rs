//! Widget trait and per-widget settings.

use crate::render::Snapshot;

/// A block of text rendered from the current bar state.
pub trait Widget {
    /// Render this widget, or `None` when it has nothing to show.
    fn render(&self, snapshot: &Snapshot<'_>) -> Option<String>;
}

/// Whether a widget is shown, and how.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum WidgetSetting {
    /// Hidden.
    Off,
    /// Shown with its default layout.
    #[default]
    On,
    /// Shown with a custom template; placeholders are widget specific.
    Template(String),
}

impl WidgetSetting {
    /// Whether the widget is shown at all.
    pub const fn is_enabled(&self) -> bool {
        !matches!(self, Self::Off)
    }

    /// The custom template, if any.
    pub fn template(&self) -> Option<&str> {
        match self {
            Self::Template(t) => Some(t),
            _ => None,
        }
    }
}

impl From<bool> for WidgetSetting {
    fn from(enabled: bool) -> Self {
        if enabled {
            Self::On
        } else {
            Self::Off
        }
    }
}

impl From<&str> for WidgetSetting {
    fn from(template: &str) -> Self {
        Self::Template(template.to_owned())
    }
}

impl From<String> for WidgetSetting {
    fn from(template: String) -> Self {
        Self::Template(template)
    }
}
