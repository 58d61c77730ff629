//! Shared default overlay beneath per-call options.

use std::sync::{Arc, PoisonError, RwLock};

use super::Config;
use crate::engine::LiveBar;
use crate::track::Tracked;

/// A shared overlay of options that bars started through it inherit.
///
/// Clones share the same overlay. Per-call options always win over it.
#[derive(Debug, Clone, Default)]
pub struct Defaults {
    overlay: Arc<RwLock<Config>>,
}

impl Defaults {
    /// An empty overlay.
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge `patch` into the overlay; options it sets replace earlier ones.
    pub fn set(&self, patch: Config) {
        let mut overlay = self.overlay.write().unwrap_or_else(PoisonError::into_inner);
        *overlay = patch.merged_over(&overlay);
    }

    /// A copy of the current overlay.
    pub fn get(&self) -> Config {
        self.overlay
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Drop every option from the overlay.
    pub fn reset(&self) {
        *self.overlay.write().unwrap_or_else(PoisonError::into_inner) = Config::default();
    }

    /// `per_call` layered over the overlay.
    pub fn config(&self, per_call: &Config) -> Config {
        per_call.merged_over(&self.get())
    }

    /// Start a bar with the overlay applied.
    pub fn start(&self, total: Option<u64>, per_call: &Config) -> LiveBar {
        LiveBar::start(total, &self.config(per_call))
    }

    /// Track an iterator with the overlay applied.
    pub fn track<I: IntoIterator>(&self, iter: I, per_call: &Config) -> Tracked<I::IntoIter> {
        crate::track::track(iter, &self.config(per_call))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_merges_and_reset_clears() {
        let defaults = Defaults::new();
        defaults.set(Config::new().length(20).title("a"));
        defaults.set(Config::new().title("b"));

        let s = defaults.config(&Config::new()).resolve().unwrap();
        assert_eq!(s.length, 20);
        assert_eq!(s.title.as_deref(), Some("b"));

        let s = defaults.config(&Config::new().length(5)).resolve().unwrap();
        assert_eq!(s.length, 5);

        defaults.reset();
        let s = defaults.config(&Config::new()).resolve().unwrap();
        assert_eq!(s.length, crate::config::DEFAULT_LENGTH);
        assert!(s.title.is_none());
    }

    #[test]
    fn test_clones_share_overlay() {
        let a = Defaults::new();
        let b = a.clone();
        a.set(Config::new().manual(true));
        assert!(b.config(&Config::new()).resolve().unwrap().manual);
    }
}
