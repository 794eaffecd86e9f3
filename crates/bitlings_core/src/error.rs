//! Error types for the simulation core.

use thiserror::Error;

/// Main error type for simulation operations.
#[derive(Error, Debug, PartialEq)]
pub enum SimError {
    /// A network was assembled from parts of the wrong size
    #[error("Invalid network shape: {what} has {actual} values, expected {expected}")]
    NetworkShape {
        what: &'static str,
        expected: usize,
        actual: usize,
    },

    /// A world command could not be applied
    #[error("Invalid command: {0}")]
    InvalidCommand(String),

    /// The consuming side of the command queue is gone
    #[error("Command queue closed")]
    QueueClosed,
}

/// Result type alias for simulation operations.
pub type Result<T> = std::result::Result<T, SimError>;

impl SimError {
    /// Creates a new invalid command error.
    #[must_use]
    pub fn invalid_command<S: Into<String>>(msg: S) -> Self {
        Self::InvalidCommand(msg.into())
    }

    pub(crate) fn check_len(what: &'static str, expected: usize, actual: usize) -> Result<()> {
        if expected == actual {
            Ok(())
        } else {
            Err(Self::NetworkShape {
                what,
                expected,
                actual,
            })
        }
    }
}
