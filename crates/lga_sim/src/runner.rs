//! # Run Driver
//!
//! Builds the initial grid from the layout, runs the parallel engine and,
//! on request, replays the same start serially to prove the result.

use lga_core::{generate, Grid, ParallelEngine, RunReport, SerialEngine, Simulator};
use tracing::{info, warn};

use crate::config::SimulationConfig;
use crate::error::ConfigResult;

/// Everything a run produced.
#[derive(Clone, Debug)]
pub struct SimulationOutcome {
    /// Final generation (grid A).
    pub grid: Grid,
    /// Engine report.
    pub report: RunReport,
    /// Particles before the run.
    pub initial_particles: u64,
    /// Particles after the run.
    pub final_particles: u64,
    /// `Some(true)` if the serial replay matched bit for bit.
    pub verified: Option<bool>,
}

/// Runs one simulation described by `config`.
///
/// # Errors
///
/// Returns [`crate::ConfigError::Core`] if the layout or the engine fails.
pub fn run_simulation(config: &SimulationConfig, verify: bool) -> ConfigResult<SimulationOutcome> {
    let initial = generate(config.grid.size, &config.layout)?;
    let initial_particles = initial.particle_count();

    let engine = ParallelEngine::new(config.engine.threads)?.with_policy(config.engine.partition);
    let mut grid_a = initial.clone();
    let mut grid_b = initial.clone();
    let report = engine.run(&mut grid_a, &mut grid_b, config.engine.iterations)?;

    let verified = if verify {
        let mut serial_a = initial.clone();
        let mut serial_b = initial;
        SerialEngine::new().run(&mut serial_a, &mut serial_b, config.engine.iterations)?;
        let matches = serial_a == grid_a;
        if matches {
            info!("parallel result matches serial reference");
        } else {
            warn!("parallel result differs from serial reference");
        }
        Some(matches)
    } else {
        None
    };

    Ok(SimulationOutcome {
        final_particles: grid_a.particle_count(),
        grid: grid_a,
        report,
        initial_particles,
        verified,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use lga_core::PartitionPolicy;

    #[test]
    fn test_small_run_verifies() {
        let mut config = SimulationConfig::default();
        config.grid.size = 24;
        config.engine.threads = 4;
        config.engine.iterations = 16;
        config.layout.divider = true;

        let outcome = run_simulation(&config, true).unwrap();
        assert_eq!(outcome.verified, Some(true));
        // Border walls are on by default, so the box is closed.
        assert_eq!(outcome.initial_particles, outcome.final_particles);
        assert_eq!(outcome.grid.size(), 24);
    }

    #[test]
    fn test_truncate_with_serial_check_differs() {
        // Serial updates every row; truncation leaves the tail frozen.
        let mut config = SimulationConfig::default();
        config.grid.size = 10;
        config.engine.threads = 4;
        config.engine.iterations = 10;
        config.engine.partition = PartitionPolicy::Truncate;
        config.layout.border_walls = false;
        config.layout.density = 0.5;

        let outcome = run_simulation(&config, true).unwrap();
        assert_eq!(outcome.verified, Some(false));
        assert!(outcome.report.uncovered_rows.is_some());
    }
}
