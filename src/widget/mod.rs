//! Widgets: the text blocks shown after the bar.
//!
//! Each widget renders from a [`Snapshot`] of the bar and can be switched
//! off or given a template through [`WidgetSetting`].

mod format;
mod traits;
mod widgets;

pub use format::{
    format_duration, format_number, format_rate, DurationFormat, NumberFormat, Scale, PLACEHOLDER,
};
pub use traits::{Widget, WidgetSetting};
pub use widgets::{Elapsed, Monitor, Stats};
