//! # Parallel Engine
//!
//! Fixed pool of scoped worker threads, one row band each, synchronized by a
//! single reusable [`GenerationBarrier`].
//!
//! ```text
//!   run()
//!     ├─ validate sizes + iteration parity
//!     ├─ partition rows
//!     ├─ spawn workers 0..N          (spawn failure -> abort barrier)
//!     ├─ join every worker           (panic -> barrier already aborted)
//!     └─ RunReport
//! ```
//!
//! Threads are scoped, so both grids are borrowed for exactly the run and
//! every worker has been joined before `run` returns, on every path.

use std::io;
use std::thread;
use std::time::Instant;

use tracing::{debug, error, info, warn};

use super::worker::{Worker, WorkerStats};
use super::{validate_run, PartitionPolicy, Partitioner, RowInterval, RunReport, Simulator};
use crate::error::{LgaError, LgaResult};
use crate::lattice::Grid;
use crate::rules::{BounceBack, CollisionRule, FhpCollision, LatticeRules, WallRule};
use crate::sync::{GenerationBarrier, SharedGrid};

/// Multi-threaded engine.
#[derive(Clone, Debug)]
pub struct ParallelEngine<W = BounceBack, C = FhpCollision> {
    rules: LatticeRules<W, C>,
    num_threads: usize,
    policy: PartitionPolicy,
}

impl ParallelEngine {
    /// FHP rules with `num_threads` workers and the default partition policy.
    ///
    /// # Errors
    ///
    /// Returns [`LgaError::InvalidThreadCount`] if `num_threads == 0`.
    pub fn new(num_threads: usize) -> LgaResult<Self> {
        Self::with_rules(LatticeRules::fhp(), num_threads)
    }
}

impl<W: WallRule, C: CollisionRule> ParallelEngine<W, C> {
    /// Engine with custom rules.
    ///
    /// # Errors
    ///
    /// Returns [`LgaError::InvalidThreadCount`] if `num_threads == 0`.
    pub fn with_rules(rules: LatticeRules<W, C>, num_threads: usize) -> LgaResult<Self> {
        if num_threads == 0 {
            return Err(LgaError::InvalidThreadCount(num_threads));
        }
        Ok(Self {
            rules,
            num_threads,
            policy: PartitionPolicy::default(),
        })
    }

    /// Sets how leftover rows are handled.
    #[must_use]
    pub const fn with_policy(mut self, policy: PartitionPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Worker count.
    #[inline]
    #[must_use]
    pub const fn num_threads(&self) -> usize {
        self.num_threads
    }

    /// Partition policy.
    #[inline]
    #[must_use]
    pub const fn policy(&self) -> PartitionPolicy {
        self.policy
    }

    /// Transition rules.
    #[inline]
    #[must_use]
    pub const fn rules(&self) -> &LatticeRules<W, C> {
        &self.rules
    }
}

impl<W: WallRule, C: CollisionRule> ParallelEngine<W, C> {
    /// Spawns one worker per interval and joins them all.
    ///
    /// `spawn_gate` runs before each spawn; an error from it is treated the
    /// same as the OS refusing the thread. Returns the stats of every worker
    /// that was joined cleanly, plus the first failure.
    fn run_workers<'s, G>(
        &'s self,
        grids: (&'s SharedGrid<'s>, &'s SharedGrid<'s>),
        intervals: &[RowInterval],
        barrier: &'s GenerationBarrier,
        iterations: usize,
        spawn_gate: G,
    ) -> (Vec<WorkerStats>, Option<LgaError>)
    where
        G: Fn(usize) -> io::Result<()>,
    {
        thread::scope(|scope| {
            let mut handles = Vec::with_capacity(intervals.len());
            let mut failure = None;

            for (id, &rows) in intervals.iter().enumerate() {
                debug!(worker = id, start = rows.start, end = rows.end, "spawning worker");
                let worker = Worker::new(id, rows, grids, barrier, &self.rules, iterations);
                let spawned = match spawn_gate(id) {
                    Ok(()) => thread::Builder::new()
                        .name(format!("lga-worker-{id}"))
                        .spawn_scoped(scope, move || worker.run()),
                    Err(err) => Err(err),
                };

                match spawned {
                    Ok(handle) => handles.push((id, handle)),
                    Err(err) => {
                        error!(worker = id, error = %err, "failed to spawn worker, aborting run");
                        barrier.abort();
                        failure = Some(LgaError::ThreadSpawn {
                            worker: id,
                            reason: err.to_string(),
                        });
                        break;
                    }
                }
            }

            let mut stats: Vec<WorkerStats> = Vec::with_capacity(handles.len());
            for (id, handle) in handles {
                match handle.join() {
                    Ok(worker_stats) => {
                        debug!(
                            worker = id,
                            half_steps = worker_stats.half_steps,
                            state = ?worker_stats.state,
                            "worker joined"
                        );
                        stats.push(worker_stats);
                    }
                    Err(_) => {
                        error!(worker = id, "worker panicked, run aborted");
                        failure.get_or_insert(LgaError::WorkerPanicked { worker: id });
                    }
                }
            }

            (stats, failure)
        })
    }
}

impl<W: WallRule, C: CollisionRule> Simulator for ParallelEngine<W, C> {
    fn run(&self, grid_a: &mut Grid, grid_b: &mut Grid, iterations: usize) -> LgaResult<RunReport> {
        let grid_size = validate_run(grid_a, grid_b, iterations)?;
        let partitioner = Partitioner::new(grid_size, self.num_threads, self.policy)?;
        let intervals = partitioner.intervals();
        let uncovered_rows = partitioner.uncovered_rows();
        let barrier = GenerationBarrier::new(self.num_threads)?;

        if let Some(rows) = uncovered_rows {
            warn!(
                start = rows.start,
                end = rows.end,
                "rows {}..{} are not assigned to any worker and will not be updated",
                rows.start,
                rows.end
            );
        }
        info!(
            grid_size,
            num_threads = self.num_threads,
            iterations,
            policy = ?self.policy,
            "starting parallel run"
        );

        let start = Instant::now();
        let (workers, failure) = {
            let shared_a = SharedGrid::new(grid_a);
            let shared_b = SharedGrid::new(grid_b);
            self.run_workers((&shared_a, &shared_b), &intervals, &barrier, iterations, |_| Ok(()))
        };
        if let Some(err) = failure {
            return Err(err);
        }
        let elapsed = start.elapsed();

        let report = RunReport {
            grid_size,
            num_threads: self.num_threads,
            iterations,
            intervals,
            uncovered_rows,
            workers,
            elapsed,
        };
        info!(
            elapsed = ?elapsed,
            max_barrier_wait = ?report.max_barrier_wait(),
            "parallel run complete"
        );
        Ok(report)
    }
}
