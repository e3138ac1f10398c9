//! Error types for configuration, sessions and racer decisions.

use derive_more::{Display, Error};
use std::time::Duration;

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}

/// Terminal or display resources could not be set up.
#[derive(Debug, Clone, Display, Error)]
#[display("Session error: {} at {}:{}", message, file, line)]
pub struct SessionError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl SessionError {
    /// Creates a new session error with caller location tracking.
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}

impl From<std::io::Error> for SessionError {
    #[track_caller]
    fn from(err: std::io::Error) -> Self {
        Self::new(format!("I/O error: {}", err))
    }
}

/// Why a racer produced no usable answer.
#[derive(Debug, Display, Error)]
pub enum DecisionError {
    /// No answer before the deadline.
    #[display("racer did not answer within {after:?}")]
    Timeout {
        /// The deadline that expired.
        after: Duration,
    },
    /// The racer thread ended without answering (it panicked).
    #[display("racer stopped without answering")]
    Abandoned,
    /// The racer thread could not be started.
    #[display("could not start racer thread: {source}")]
    Spawn {
        /// Underlying OS error.
        source: std::io::Error,
    },
}
