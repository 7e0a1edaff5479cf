//! # Worker
//!
//! One pool thread. Owns a fixed row band and alternates direction every
//! half-step:
//!
//! ```text
//!   Running ──(half-step done)──> AtBarrier ──(released)──> Running
//!      │                              │
//!      │                          (aborted)
//!      ▼                              ▼
//!    Done                          Aborted
//! ```
//!
//! A worker never touches rows outside its band and never reads a buffer
//! while anyone may be writing it. The barrier after every half-step is what
//! makes both hold.

use std::thread;
use std::time::{Duration, Instant};

use tracing::trace;

use super::{update_half_step, RowInterval};
use crate::rules::{CollisionRule, LatticeRules, WallRule};
use crate::sync::{GenerationBarrier, SharedGrid};

/// Lifecycle of a worker thread.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum WorkerState {
    /// Computing a half-step.
    Running,
    /// Waiting for the rest of the pool.
    AtBarrier,
    /// Finished every half-step.
    Done,
    /// Stopped early because the run was aborted.
    Aborted,
}

/// What a worker did during one run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WorkerStats {
    /// Worker index (0-based, in row order).
    pub id: usize,
    /// Rows the worker owned.
    pub rows: RowInterval,
    /// Half-steps completed.
    pub half_steps: usize,
    /// Time spent updating cells.
    pub compute_time: Duration,
    /// Time spent blocked at the barrier.
    pub barrier_wait: Duration,
    /// State when the worker exited.
    pub state: WorkerState,
}

impl WorkerStats {
    pub(crate) const fn new(id: usize, rows: RowInterval) -> Self {
        Self {
            id,
            rows,
            half_steps: 0,
            compute_time: Duration::ZERO,
            barrier_wait: Duration::ZERO,
            state: WorkerState::Running,
        }
    }
}

/// Aborts the barrier if the worker unwinds, so the rest of the pool is not
/// left waiting for a participant that will never arrive.
struct AbortOnUnwind<'b>(&'b GenerationBarrier);

impl Drop for AbortOnUnwind<'_> {
    fn drop(&mut self) {
        if thread::panicking() {
            self.0.abort();
        }
    }
}

/// Everything a pool thread needs for one run.
pub(crate) struct Worker<'s, W, C> {
    rows: RowInterval,
    grid_a: &'s SharedGrid<'s>,
    grid_b: &'s SharedGrid<'s>,
    barrier: &'s GenerationBarrier,
    rules: &'s LatticeRules<W, C>,
    iterations: usize,
    stats: WorkerStats,
}

impl<'s, W: WallRule, C: CollisionRule> Worker<'s, W, C> {
    pub(crate) fn new(
        id: usize,
        rows: RowInterval,
        grids: (&'s SharedGrid<'s>, &'s SharedGrid<'s>),
        barrier: &'s GenerationBarrier,
        rules: &'s LatticeRules<W, C>,
        iterations: usize,
    ) -> Self {
        Self {
            rows,
            grid_a: grids.0,
            grid_b: grids.1,
            barrier,
            rules,
            iterations,
            stats: WorkerStats::new(id, rows),
        }
    }

    /// Runs `iterations / 2` rounds of A -> B, barrier, B -> A, barrier.
    pub(crate) fn run(mut self) -> WorkerStats {
        let _guard = AbortOnUnwind(self.barrier);
        let (a, b) = (self.grid_a, self.grid_b);

        trace!(worker = self.stats.id, rows = ?self.rows, "worker started");
        for _ in 0..self.iterations / 2 {
            self.half_step(a, b);
            if !self.rendezvous() {
                return self.finish(WorkerState::Aborted);
            }
            self.half_step(b, a);
            if !self.rendezvous() {
                return self.finish(WorkerState::Aborted);
            }
        }
        self.finish(WorkerState::Done)
    }

    fn half_step(&mut self, src: &SharedGrid<'_>, dst: &SharedGrid<'_>) {
        let start = Instant::now();
        {
            // SAFETY: between two barrier waits every worker only reads `src`
            // and only writes its own rows of `dst`. Row bands are disjoint,
            // and both references die before the next wait.
            #[allow(unsafe_code)]
            let (view, rows) = unsafe { (src.view(), dst.rows_mut(self.rows)) };
            update_half_step(self.rules, view, rows, self.rows);
        }
        self.stats.compute_time += start.elapsed();
        self.stats.half_steps += 1;
    }

    /// Waits for the pool. Returns false if the run was aborted.
    fn rendezvous(&mut self) -> bool {
        self.transition(WorkerState::AtBarrier);
        let start = Instant::now();
        let outcome = self.barrier.wait();
        self.stats.barrier_wait += start.elapsed();

        if outcome.is_aborted() {
            return false;
        }
        self.transition(WorkerState::Running);
        true
    }

    fn transition(&mut self, next: WorkerState) {
        trace!(worker = self.stats.id, from = ?self.stats.state, to = ?next, "state change");
        self.stats.state = next;
    }

    fn finish(mut self, state: WorkerState) -> WorkerStats {
        self.transition(state);
        self.stats
    }
}
