//! Style: the animation interfaces the renderer consumes, plus a small
//! built-in catalog.
//!
//! Spinners and bars are produced by factories that take a length and
//! return fixed-width frame producers. Custom styles implement
//! [`SpinnerFactory`] or [`BarFactory`] and are passed in directly;
//! built-in ones are looked up by name, and unknown names fall back to the
//! catalog default instead of failing.

mod bar;
mod catalog;
mod spinner;

use std::sync::Arc;

pub use bar::{BarSpec, FixedBar};
pub use catalog::{
    bar_factory, spinner_factory, theme, Theme, BAR_NAMES, DEFAULT_BAR, DEFAULT_SPINNER,
    DEFAULT_THEME, DEFAULT_UNKNOWN, SPINNER_NAMES, THEME_NAMES,
};
pub use spinner::{FrameSpinner, Frames, ScrollSpinner};

/// Which error marker a bar shows in place of its closing border.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BarFlag {
    /// More work was done than announced.
    Overflow,
    /// Less work was done than announced.
    Underflow,
}

/// Yields successive animation frames of constant display width.
pub trait FrameProducer: Send {
    /// The next frame.
    fn next_frame(&mut self) -> String;
}

/// Builds spinner animations.
pub trait SpinnerFactory: Send + Sync {
    /// The width this spinner looks best at when shown beside a bar.
    fn natural_length(&self) -> usize;

    /// Build a producer whose frames are exactly `length` columns wide.
    fn build(&self, length: usize) -> Box<dyn FrameProducer>;
}

/// Renders a bar at a given completion.
pub trait BarRenderer: Send {
    /// Render at `percent` (a fraction, clamped to `0.0..=1.0`).
    fn render(&self, percent: f64, flag: Option<BarFlag>) -> String;

    /// Display width of every rendered frame, borders included.
    fn width(&self) -> usize;
}

/// Builds bars.
pub trait BarFactory: Send + Sync {
    /// Build a renderer with an inner fill area `length` columns wide.
    fn build(&self, length: usize) -> Box<dyn BarRenderer>;
}

/// A spinner picked by catalog name or supplied directly.
#[derive(Clone)]
pub enum SpinnerChoice {
    /// Catalog lookup.
    Named(String),
    /// A caller-provided factory.
    Factory(Arc<dyn SpinnerFactory>),
}

impl SpinnerChoice {
    /// Resolve to a factory.
    pub fn factory(&self) -> Arc<dyn SpinnerFactory> {
        match self {
            Self::Named(name) => spinner_factory(name),
            Self::Factory(factory) => Arc::clone(factory),
        }
    }
}

impl std::fmt::Debug for SpinnerChoice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Named(name) => f.debug_tuple("Named").field(name).finish(),
            Self::Factory(_) => f.write_str("Factory(..)"),
        }
    }
}

impl From<&str> for SpinnerChoice {
    fn from(name: &str) -> Self {
        Self::Named(name.to_owned())
    }
}

/// A bar picked by catalog name or supplied directly.
#[derive(Clone)]
pub enum BarChoice {
    /// Catalog lookup.
    Named(String),
    /// A caller-provided factory.
    Factory(Arc<dyn BarFactory>),
}

impl BarChoice {
    /// Resolve to a factory.
    pub fn factory(&self) -> Arc<dyn BarFactory> {
        match self {
            Self::Named(name) => bar_factory(name),
            Self::Factory(factory) => Arc::clone(factory),
        }
    }
}

impl std::fmt::Debug for BarChoice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Named(name) => f.debug_tuple("Named").field(name).finish(),
            Self::Factory(_) => f.write_str("Factory(..)"),
        }
    }
}

impl From<&str> for BarChoice {
    fn from(name: &str) -> Self {
        Self::Named(name.to_owned())
    }
}
