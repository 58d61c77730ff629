//! Error type for fallible bar construction.

/// Errors surfaced by [`LiveBar::try_start`](crate::LiveBar::try_start).
///
/// Everything past construction degrades silently instead.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Writing to the terminal failed.
    #[error("terminal I/O failed: {0}")]
    Io(#[from] std::io::Error),
    /// The SIGINT handler could not be installed.
    #[error("could not install the interrupt handler: {0}")]
    Interrupt(#[from] ctrlc::Error),
    /// A configuration value is out of range.
    #[error("invalid setting `{name}`: {reason}")]
    InvalidSetting {
        /// The offending option.
        name: &'static str,
        /// What is wrong with it.
        reason: String,
    },
    /// The redraw thread could not be started.
    #[error("could not spawn the redraw thread: {0}")]
    Spawn(std::io::Error),
}

/// Result alias for this crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;
