//! Error types for control operations.

use thiserror::Error;

/// Result type for control operations.
pub type ControlResult<T> = Result<T, ControlError>;

/// Errors that can occur while building control components.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ControlError {
    /// Invalid argument provided to a control function.
    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    /// Configuration rejected during validation.
    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl From<mc_core::CoreError> for ControlError {
    fn from(e: mc_core::CoreError) -> Self {
        ControlError::Config {
            message: e.to_string(),
        }
    }
}
