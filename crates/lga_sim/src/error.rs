//! # Runner Error Types
//!
//! Everything that can stop `lga_sim` before or during a run.

use std::path::PathBuf;

use lga_core::LgaError;
use thiserror::Error;

/// Errors from config loading, argument parsing and the engine.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("failed to read config {}: {source}", path.display())]
    Io {
        /// File that was requested.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The config file is not valid TOML for [`crate::SimulationConfig`].
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// A value or command-line flag is out of range or malformed.
    #[error("invalid configuration: {0}")]
    Invalid(String),

    /// The engine rejected the configuration or failed during the run.
    #[error(transparent)]
    Core(#[from] LgaError),
}

/// Result type for runner operations.
pub type ConfigResult<T> = Result<T, ConfigError>;
