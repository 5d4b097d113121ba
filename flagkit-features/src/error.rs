//! Error types for the listener binding.

use thiserror::Error;

/// Result type for listener operations.
pub type Result<T> = std::result::Result<T, ListenerError>;

/// Errors raised by command namespaces.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ListenerError {
    /// No command is installed under the name.
    #[error("Command not found: {0}")]
    CommandNotFound(String),
}
