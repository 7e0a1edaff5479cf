//! # Command Line
//!
//! Flags override whatever the config file (or the defaults) say:
//!
//! ```text
//!   defaults  <-  --config file  <-  --size / --threads / ... flags
//! ```

use std::path::PathBuf;
use std::str::FromStr;

use lga_core::PartitionPolicy;

use crate::config::SimulationConfig;
use crate::error::{ConfigError, ConfigResult};

/// Help text for `--help` and usage errors.
pub const USAGE: &str = "\
Usage: lga_sim [OPTIONS]

Options:
  --config <path>       Load a TOML simulation config
  --size <N>            Grid side length
  --threads <N>         Worker thread count
  --iterations <N>      Half-steps to run (must be even)
  --partition <policy>  truncate | remainder_to_last | strict
  --seed <N>            Layout RNG seed
  --density <F>         Per-direction fill probability in [0, 1]
  --verify              Re-run serially and compare the final grids
  --print               Print the final grid
  --help                Show this message";

/// Parsed command line.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CliArgs {
    /// `--config`
    pub config: Option<PathBuf>,
    /// `--size`
    pub size: Option<usize>,
    /// `--threads`
    pub threads: Option<usize>,
    /// `--iterations`
    pub iterations: Option<usize>,
    /// `--partition`
    pub partition: Option<PartitionPolicy>,
    /// `--seed`
    pub seed: Option<u64>,
    /// `--density`
    pub density: Option<f64>,
    /// `--verify`
    pub verify: bool,
    /// `--print`
    pub print: bool,
    /// `--help`
    pub help: bool,
}

fn parse_partition(value: &str) -> ConfigResult<PartitionPolicy> {
    match value {
        "truncate" => Ok(PartitionPolicy::Truncate),
        "remainder_to_last" => Ok(PartitionPolicy::RemainderToLast),
        "strict" => Ok(PartitionPolicy::Strict),
        other => Err(ConfigError::Invalid(format!(
            "unknown partition policy '{other}' (expected truncate, remainder_to_last or strict)"
        ))),
    }
}

fn parse_number<T: FromStr>(flag: &str, value: &str) -> ConfigResult<T> {
    value
        .parse()
        .map_err(|_| ConfigError::Invalid(format!("{flag}: cannot parse '{value}'")))
}

impl CliArgs {
    /// Parses arguments, not including the program name.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] for unknown flags, missing values or
    /// values that do not parse.
    pub fn parse<I>(args: I) -> ConfigResult<Self>
    where
        I: IntoIterator<Item = String>,
    {
        let mut parsed = Self::default();
        let mut args = args.into_iter();

        while let Some(flag) = args.next() {
            match flag.as_str() {
                "--verify" => parsed.verify = true,
                "--print" => parsed.print = true,
                "--help" | "-h" => parsed.help = true,
                "--config" | "--size" | "--threads" | "--iterations" | "--partition"
                | "--seed" | "--density" => {
                    let value = args
                        .next()
                        .ok_or_else(|| ConfigError::Invalid(format!("{flag} needs a value")))?;
                    match flag.as_str() {
                        "--config" => parsed.config = Some(PathBuf::from(value)),
                        "--size" => parsed.size = Some(parse_number(&flag, &value)?),
                        "--threads" => parsed.threads = Some(parse_number(&flag, &value)?),
                        "--iterations" => parsed.iterations = Some(parse_number(&flag, &value)?),
                        "--partition" => parsed.partition = Some(parse_partition(&value)?),
                        "--seed" => parsed.seed = Some(parse_number(&flag, &value)?),
                        _ => parsed.density = Some(parse_number(&flag, &value)?),
                    }
                }
                other => return Err(ConfigError::Invalid(format!("unknown argument '{other}'"))),
            }
        }

        Ok(parsed)
    }

    /// Writes every flag that was given into `config`.
    pub fn apply(&self, config: &mut SimulationConfig) {
        if let Some(size) = self.size {
            config.grid.size = size;
        }
        if let Some(threads) = self.threads {
            config.engine.threads = threads;
        }
        if let Some(iterations) = self.iterations {
            config.engine.iterations = iterations;
        }
        if let Some(partition) = self.partition {
            config.engine.partition = partition;
        }
        if let Some(seed) = self.seed {
            config.layout.seed = seed;
        }
        if let Some(density) = self.density {
            config.layout.density = density;
        }
    }

    /// Loads the config file (if any), applies overrides and validates.
    ///
    /// # Errors
    ///
    /// Any error from [`SimulationConfig::from_file`] or
    /// [`SimulationConfig::validate`].
    pub fn resolve_config(&self) -> ConfigResult<SimulationConfig> {
        let mut config = match &self.config {
            Some(path) => SimulationConfig::from_file(path)?,
            None => SimulationConfig::default(),
        };
        self.apply(&mut config);
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn test_parse_all_flags() {
        let cli = CliArgs::parse(args(&[
            "--size", "64", "--threads", "8", "--iterations", "100", "--partition", "strict",
            "--seed", "7", "--density", "0.5", "--verify", "--print",
        ]))
        .unwrap();

        assert_eq!(cli.size, Some(64));
        assert_eq!(cli.threads, Some(8));
        assert_eq!(cli.iterations, Some(100));
        assert_eq!(cli.partition, Some(PartitionPolicy::Strict));
        assert_eq!(cli.seed, Some(7));
        assert_eq!(cli.density, Some(0.5));
        assert!(cli.verify && cli.print && !cli.help);
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(CliArgs::parse(args(&["--bogus"])), Err(ConfigError::Invalid(_))));
        assert!(matches!(CliArgs::parse(args(&["--size"])), Err(ConfigError::Invalid(_))));
        assert!(matches!(
            CliArgs::parse(args(&["--threads", "many"])),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            CliArgs::parse(args(&["--partition", "evenly"])),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn test_flags_override_config() {
        let mut config = SimulationConfig::default();
        let cli = CliArgs::parse(args(&["--threads", "2", "--seed", "99"])).unwrap();
        cli.apply(&mut config);

        assert_eq!(config.engine.threads, 2);
        assert_eq!(config.layout.seed, 99);
        assert_eq!(config.grid.size, SimulationConfig::default().grid.size);
    }

    #[test]
    fn test_resolve_validates() {
        let cli = CliArgs::parse(args(&["--iterations", "3"])).unwrap();
        assert!(matches!(cli.resolve_config(), Err(ConfigError::Invalid(_))));
    }
}
