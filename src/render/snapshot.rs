//! Read-only view of a bar for one frame, and the final outcome.

use std::time::Duration;

/// How a finished bar ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Finished exactly on the total, or with no total.
    Success,
    /// More work was counted than the total.
    Overflow,
    /// Less work was counted than the total.
    Underflow,
}

impl Outcome {
    /// Classify an effective count against an optional total.
    pub const fn classify(count: u64, total: Option<u64>) -> Self {
        match total {
            Some(total) if count > total => Self::Overflow,
            Some(total) if count < total => Self::Underflow,
            _ => Self::Success,
        }
    }

    /// The glyph shown at the end of the summary line.
    pub const fn glyph(self) -> &'static str {
        match self {
            Self::Success => "✓",
            Self::Overflow => "⚠",
            Self::Underflow => "✗",
        }
    }
}

/// Read-only view of the bar state for one frame.
#[derive(Debug, Clone, Default)]
pub struct Snapshot<'a> {
    /// Title shown first.
    pub title: Option<&'a str>,
    /// Situational text shown last.
    pub text: Option<&'a str>,
    /// Target count; `None` in indeterminate mode.
    pub total: Option<u64>,
    /// Effective count.
    pub count: u64,
    /// Completion, uncapped. `None` when it cannot be known.
    pub fraction: Option<f64>,
    /// Time spent, pauses excluded.
    pub elapsed: Duration,
    /// Items per second.
    pub rate: f64,
    /// Seconds remaining; infinite when unknown.
    pub eta: f64,
    /// Set once the bar is finished.
    pub outcome: Option<Outcome>,
}

impl Snapshot<'_> {
    /// Whether this describes the final frame.
    pub const fn is_finished(&self) -> bool {
        self.outcome.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify() {
        assert_eq!(Outcome::classify(10, Some(10)), Outcome::Success);
        assert_eq!(Outcome::classify(15, Some(10)), Outcome::Overflow);
        assert_eq!(Outcome::classify(3, Some(10)), Outcome::Underflow);
        assert_eq!(Outcome::classify(3, None), Outcome::Success);
    }
}
