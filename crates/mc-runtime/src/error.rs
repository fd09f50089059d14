//! Error types for runtime operations.

use thiserror::Error;

/// Errors encountered while loading configuration or running the rig.
#[derive(Error, Debug)]
pub enum RuntimeError {
    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Config I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config parse error: {0}")]
    Parse(#[from] serde_yaml::Error),
}

pub type RuntimeResult<T> = Result<T, RuntimeError>;

impl From<mc_plant::PlantError> for RuntimeError {
    fn from(e: mc_plant::PlantError) -> Self {
        RuntimeError::Config {
            message: e.to_string(),
        }
    }
}

impl From<mc_control::ControlError> for RuntimeError {
    fn from(e: mc_control::ControlError) -> Self {
        RuntimeError::Config {
            message: e.to_string(),
        }
    }
}

impl From<mc_core::CoreError> for RuntimeError {
    fn from(e: mc_core::CoreError) -> Self {
        RuntimeError::Config {
            message: e.to_string(),
        }
    }
}
