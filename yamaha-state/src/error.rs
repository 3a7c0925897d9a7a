//! Error types for yamaha-state

use std::fmt;

/// Result type for yamaha-state operations
pub type Result<T> = std::result::Result<T, StateError>;

/// Errors raised while building the state model
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StateError {
    /// Two entries share a human-facing source name
    DuplicateSourceName(String),

    /// Two entries share a device token, so reverse lookup would be ambiguous
    DuplicateSourceToken(String),

    /// A source name or token is empty
    EmptySourceEntry,
}

impl fmt::Display for StateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StateError::DuplicateSourceName(name) => write!(f, "Duplicate source name: {}", name),
            StateError::DuplicateSourceToken(token) => write!(f, "Duplicate source token: {}", token),
            StateError::EmptySourceEntry => write!(f, "Source names and tokens must not be empty"),
        }
    }
}

impl std::error::Error for StateError {}
