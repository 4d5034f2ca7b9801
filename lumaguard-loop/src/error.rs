//! Loop-level errors
//!
//! Core errors are small `Copy` enums; this layer adds the `std` failures
//! (file I/O, JSON) that only exist once a configuration is loaded from disk.

use std::path::PathBuf;

use lumaguard_core::{ConfigError, DecisionError, SensorError};
use thiserror::Error;

/// Result alias for the driver
pub type LoopResult<T> = Result<T, LoopError>;

/// Everything that can end a run early
#[derive(Debug, Error)]
pub enum LoopError {
    #[error("Decision engine error: {0}")]
    Decision(#[from] DecisionError),

    #[error("Sensor error: {0}")]
    Sensor(#[from] SensorError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid configuration document: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Control loop already ran and released its sensor")]
    AlreadyRun,
}
