//! # LGA Simulation Runner
//!
//! Turns a TOML file plus command-line flags into one engine run:
//!
//! ```text
//!   lga.toml ──> SimulationConfig ──(flags)──> validate
//!                                                 │
//!                          generate(layout) ──> ParallelEngine::run
//!                                                 │
//!                                   (--verify) SerialEngine::run, compare
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

pub mod cli;
pub mod config;
pub mod error;
pub mod runner;

pub use cli::{CliArgs, USAGE};
pub use config::{EngineConfig, GridConfig, SimulationConfig};
pub use error::{ConfigError, ConfigResult};
pub use runner::{run_simulation, SimulationOutcome};
