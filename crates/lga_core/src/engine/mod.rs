//! # Update Engines
//!
//! Two engines share one half-step kernel:
//!
//! - [`ParallelEngine`]: fixed worker pool, one row band per worker, barrier
//!   between half-steps.
//! - [`SerialEngine`]: the same schedule on the calling thread. Used as the
//!   reference the parallel engine must match bit for bit.
//!
//! ## Schedule
//!
//! ```text
//!   repeat iterations / 2 times:
//!       A -> B      (half-step)
//!       B -> A      (half-step)
//! ```
//!
//! `iterations` counts half-steps and must be even, so the final generation
//! always ends up in grid A.

mod parallel;
mod partition;
mod serial;
mod worker;

pub use parallel::ParallelEngine;
pub use partition::{PartitionPolicy, Partitioner, RowInterval};
pub use serial::SerialEngine;
pub use worker::{WorkerState, WorkerStats};

use std::time::Duration;

use crate::error::{LgaError, LgaResult};
use crate::lattice::{Cell, Grid, GridView};
use crate::rules::{CollisionRule, LatticeRules, WallRule};

/// Anything that can advance a pair of ping-pong grids.
pub trait Simulator {
    /// Runs `iterations` half-steps. On success grid A holds the final
    /// generation.
    ///
    /// # Errors
    ///
    /// Returns an error if the grids differ in size, `iterations` is odd, or
    /// the engine cannot acquire its resources.
    fn run(&self, grid_a: &mut Grid, grid_b: &mut Grid, iterations: usize) -> LgaResult<RunReport>;
}

/// Writes the next generation of every row in `interval`.
///
/// `dst` holds exactly the rows of `interval` (`interval.len() * size`
/// cells), so nothing outside the interval can be touched.
///
/// # Panics
///
/// Panics if `dst` does not match the interval's size.
pub fn update_half_step<W, C>(
    rules: &LatticeRules<W, C>,
    src: GridView<'_>,
    dst: &mut [Cell],
    interval: RowInterval,
) where
    W: WallRule,
    C: CollisionRule,
{
    let size = src.size();
    assert_eq!(dst.len(), interval.len() * size, "destination must cover the interval");

    for (row, out) in interval.rows().zip(dst.chunks_exact_mut(size)) {
        for (col, cell) in out.iter_mut().enumerate() {
            *cell = rules.next_cell(src, row, col);
        }
    }
}

/// Checks run preconditions and returns the grid size.
fn validate_run(grid_a: &Grid, grid_b: &Grid, iterations: usize) -> LgaResult<usize> {
    if grid_a.size() != grid_b.size() {
        return Err(LgaError::GridSizeMismatch {
            a: grid_a.size(),
            b: grid_b.size(),
        });
    }
    if iterations % 2 != 0 {
        return Err(LgaError::OddIterations(iterations));
    }
    Ok(grid_a.size())
}

/// Summary of a completed run.
#[derive(Clone, Debug)]
pub struct RunReport {
    /// Grid side length.
    pub grid_size: usize,
    /// Worker count (1 for the serial engine).
    pub num_threads: usize,
    /// Half-steps executed.
    pub iterations: usize,
    /// Row band of each worker.
    pub intervals: Vec<RowInterval>,
    /// Rows that were never updated (legacy truncating partition only).
    pub uncovered_rows: Option<RowInterval>,
    /// Per-worker statistics, in worker order.
    pub workers: Vec<WorkerStats>,
    /// Wall-clock time of the run.
    pub elapsed: Duration,
}

impl RunReport {
    /// Cell updates performed per second.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn cell_updates_per_sec(&self) -> f64 {
        let secs = self.elapsed.as_secs_f64();
        if secs == 0.0 {
            return 0.0;
        }
        let covered: usize = self.intervals.iter().map(RowInterval::len).sum();
        (covered * self.grid_size * self.iterations) as f64 / secs
    }

    /// Longest total time any worker spent waiting at the barrier.
    #[must_use]
    pub fn max_barrier_wait(&self) -> Duration {
        self.workers
            .iter()
            .map(|w| w.barrier_wait)
            .max()
            .unwrap_or_default()
    }

    /// Returns true if every worker ran to completion.
    #[must_use]
    pub fn all_done(&self) -> bool {
        self.workers.iter().all(|w| w.state == WorkerState::Done)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lattice::Direction;

    #[test]
    fn test_half_step_writes_only_interval() {
        let mut src = Grid::new(4).unwrap();
        src.set(0, 0, Cell::EMPTY.with(Direction::E));
        src.set(2, 0, Cell::EMPTY.with(Direction::E));

        let mut dst = Grid::new(4).unwrap();
        dst.cells_mut().fill(Cell::WALL);

        let interval = RowInterval::new(2, 4);
        let rules = LatticeRules::fhp();
        {
            let rows = &mut dst.cells_mut()[2 * 4..4 * 4];
            update_half_step(&rules, src.view(), rows, interval);
        }

        // Rows outside the interval are untouched.
        assert!(dst.row(0).iter().all(|c| c.is_wall()));
        assert!(dst.row(1).iter().all(|c| c.is_wall()));
        // Rows inside were recomputed.
        assert_eq!(dst.get(2, 1), Some(Cell::EMPTY.with(Direction::E)));
        assert_eq!(dst.get(2, 0), Some(Cell::EMPTY));
        assert_eq!(dst.row(3), &[Cell::EMPTY; 4]);
    }

    #[test]
    fn test_validate_run() {
        let a = Grid::new(4).unwrap();
        let b = Grid::new(5).unwrap();
        assert_eq!(
            validate_run(&a, &b, 2).unwrap_err(),
            LgaError::GridSizeMismatch { a: 4, b: 5 }
        );
        assert_eq!(validate_run(&a, &a.clone(), 3).unwrap_err(), LgaError::OddIterations(3));
        assert_eq!(validate_run(&a, &a.clone(), 0), Ok(4));
    }
}
