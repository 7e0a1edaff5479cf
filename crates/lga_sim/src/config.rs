//! # Simulation Config
//!
//! One TOML file describes a whole run:
//!
//! ```toml
//! [grid]
//! size = 256
//!
//! [engine]
//! threads = 8
//! iterations = 1000
//! partition = "remainder_to_last"
//!
//! [layout]
//! seed = 42
//! density = 0.2
//! border_walls = true
//! divider = true
//! fill = "left_half"
//! ```
//!
//! Every table and every key is optional; missing values take the defaults
//! below. Unknown keys are rejected so typos do not silently fall back.

use std::fs;
use std::path::Path;

use lga_core::{LayoutConfig, PartitionPolicy, Partitioner};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{ConfigError, ConfigResult};

/// `[grid]` table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GridConfig {
    /// Side length of the square grid.
    pub size: usize,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self { size: 256 }
    }
}

/// `[engine]` table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// Worker count.
    pub threads: usize,
    /// Half-steps to run. Must be even.
    pub iterations: usize,
    /// Handling of rows left over when `size % threads != 0`.
    pub partition: PartitionPolicy,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            threads: 4,
            iterations: 1000,
            partition: PartitionPolicy::default(),
        }
    }
}

/// A complete run description.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimulationConfig {
    /// Grid dimensions.
    pub grid: GridConfig,
    /// Worker pool and schedule.
    pub engine: EngineConfig,
    /// Initial conditions.
    pub layout: LayoutConfig,
}

impl SimulationConfig {
    /// Parses a TOML document. Does not validate.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] on malformed TOML or unknown keys.
    pub fn from_toml_str(text: &str) -> ConfigResult<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Reads and parses a TOML file. Does not validate.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read and
    /// [`ConfigError::Parse`] if it is not a valid config.
    pub fn from_file(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&text)?;
        debug!(path = %path.display(), "loaded simulation config");
        Ok(config)
    }

    /// Checks everything the engine would reject, before any allocation.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::Invalid`] for odd iteration counts
    /// - [`ConfigError::Core`] for a zero size or thread count, an uneven
    ///   grid under the strict policy, or a density outside `[0, 1]`
    pub fn validate(&self) -> ConfigResult<()> {
        if self.engine.iterations % 2 != 0 {
            return Err(ConfigError::Invalid(format!(
                "engine.iterations must be even (got {})",
                self.engine.iterations
            )));
        }
        Partitioner::new(self.grid.size, self.engine.threads, self.engine.partition)?;
        self.layout.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lga_core::{FillRegion, LgaError};

    #[test]
    fn test_empty_document_uses_defaults() {
        let config = SimulationConfig::from_toml_str("").unwrap();
        assert_eq!(config, SimulationConfig::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_tables() {
        let config = SimulationConfig::from_toml_str(
            r#"
            [engine]
            threads = 3
            partition = "truncate"

            [layout]
            fill = "left_half"
            "#,
        )
        .unwrap();
        assert_eq!(config.engine.threads, 3);
        assert_eq!(config.engine.iterations, 1000);
        assert_eq!(config.engine.partition, PartitionPolicy::Truncate);
        assert_eq!(config.layout.fill, FillRegion::LeftHalf);
        assert_eq!(config.layout.seed, LayoutConfig::default().seed);
        assert_eq!(config.grid.size, 256);
    }

    #[test]
    fn test_unknown_key_rejected() {
        let err = SimulationConfig::from_toml_str("[grid]\nsise = 10\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_misspelled_layout_key_rejected() {
        let err = SimulationConfig::from_toml_str("[layout]\ndensty = 0.9\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_bad_partition_name_rejected() {
        let err = SimulationConfig::from_toml_str("[engine]\npartition = \"evenly\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_validate() {
        let mut config = SimulationConfig::default();
        config.engine.iterations = 11;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        let mut config = SimulationConfig::default();
        config.engine.threads = 0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Core(LgaError::InvalidThreadCount(0)))
        ));

        let mut config = SimulationConfig::default();
        config.grid.size = 10;
        config.engine.partition = PartitionPolicy::Strict;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Core(LgaError::UnevenPartition { .. }))
        ));

        let mut config = SimulationConfig::default();
        config.layout.density = -0.1;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Core(LgaError::InvalidDensity(_)))
        ));
    }

    #[test]
    fn test_missing_file() {
        let err = SimulationConfig::from_file("/nonexistent/lga.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
