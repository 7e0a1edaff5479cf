//! # Serial Engine
//!
//! The whole grid on the calling thread, same ping-pong schedule as the pool.
//! Parallel runs are checked against this one.

use std::time::{Duration, Instant};

use tracing::debug;

use super::{update_half_step, validate_run, RowInterval, RunReport, Simulator, WorkerState, WorkerStats};
use crate::error::LgaResult;
use crate::lattice::Grid;
use crate::rules::{BounceBack, CollisionRule, FhpCollision, LatticeRules, WallRule};

/// Single-threaded reference engine.
#[derive(Clone, Debug)]
pub struct SerialEngine<W = BounceBack, C = FhpCollision> {
    rules: LatticeRules<W, C>,
}

impl SerialEngine {
    /// FHP rules.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            rules: LatticeRules::fhp(),
        }
    }
}

impl Default for SerialEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: WallRule, C: CollisionRule> SerialEngine<W, C> {
    /// Engine with custom rules.
    #[must_use]
    pub const fn with_rules(rules: LatticeRules<W, C>) -> Self {
        Self { rules }
    }

    /// Transition rules.
    #[inline]
    #[must_use]
    pub const fn rules(&self) -> &LatticeRules<W, C> {
        &self.rules
    }
}

impl<W: WallRule, C: CollisionRule> Simulator for SerialEngine<W, C> {
    fn run(&self, grid_a: &mut Grid, grid_b: &mut Grid, iterations: usize) -> LgaResult<RunReport> {
        let grid_size = validate_run(grid_a, grid_b, iterations)?;
        let all_rows = RowInterval::new(0, grid_size);
        debug!(grid_size, iterations, "starting serial run");

        let start = Instant::now();
        for _ in 0..iterations / 2 {
            update_half_step(&self.rules, grid_a.view(), grid_b.cells_mut(), all_rows);
            update_half_step(&self.rules, grid_b.view(), grid_a.cells_mut(), all_rows);
        }
        let elapsed = start.elapsed();

        Ok(RunReport {
            grid_size,
            num_threads: 1,
            iterations,
            intervals: vec![all_rows],
            uncovered_rows: None,
            workers: vec![WorkerStats {
                half_steps: iterations,
                compute_time: elapsed,
                barrier_wait: Duration::ZERO,
                state: WorkerState::Done,
                ..WorkerStats::new(0, all_rows)
            }],
            elapsed,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LgaError;
    use crate::lattice::{Cell, Direction, DirectionTable, GridView};
    use crate::rules::NoCollision;

    #[test]
    fn test_two_half_steps_move_two_cells() {
        let mut a = Grid::new(5).unwrap();
        let mut b = Grid::new(5).unwrap();
        a.set(2, 0, Cell::EMPTY.with(Direction::E));

        let report = SerialEngine::new().run(&mut a, &mut b, 2).unwrap();

        assert_eq!(a.get(2, 2), Some(Cell::EMPTY.with(Direction::E)));
        assert_eq!(a.particle_count(), 1);
        // B holds the intermediate generation.
        assert_eq!(b.get(2, 1), Some(Cell::EMPTY.with(Direction::E)));
        assert_eq!(report.workers[0].half_steps, 2);
    }

    #[test]
    fn test_custom_rules_are_used() {
        fn absorb(_: GridView<'_>, _: usize, _: usize, _: Direction) -> Cell {
            Cell::EMPTY
        }
        let rules = LatticeRules::new(DirectionTable::HEX, absorb, NoCollision);
        let engine = SerialEngine::with_rules(rules);
        assert_eq!(engine.rules().directions(), &DirectionTable::HEX);

        let mut a = Grid::new(4).unwrap();
        let mut b = Grid::new(4).unwrap();
        a.set(2, 1, Cell::EMPTY.with(Direction::W));
        a.set(2, 0, Cell::WALL);
        // A head-on pair passes straight through without collisions.
        a.set(0, 1, Cell::EMPTY.with(Direction::E));
        a.set(0, 3, Cell::EMPTY.with(Direction::W));
        engine.run(&mut a, &mut b, 2).unwrap();

        assert_eq!(a.particle_count(), 2);
        assert_eq!(a.get(0, 1), Some(Cell::EMPTY.with(Direction::W)));
        assert_eq!(a.get(0, 3), Some(Cell::EMPTY.with(Direction::E)));
    }

    #[test]
    fn test_rejects_odd_iterations() {
        let mut a = Grid::new(3).unwrap();
        let mut b = Grid::new(3).unwrap();
        assert_eq!(
            SerialEngine::new().run(&mut a, &mut b, 1).unwrap_err(),
            LgaError::OddIterations(1)
        );
    }
}
