//! Error types for plant model and simulation operations.

use thiserror::Error;

/// Errors encountered while building or stepping the plant.
#[derive(Error, Debug)]
pub enum PlantError {
    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    #[error("Configuration error: {message}")]
    Config { message: String },
}

pub type PlantResult<T> = Result<T, PlantError>;

impl From<mc_core::CoreError> for PlantError {
    fn from(e: mc_core::CoreError) -> Self {
        PlantError::Config {
            message: e.to_string(),
        }
    }
}
