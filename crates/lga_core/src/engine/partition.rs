//! # Row Partitioning
//!
//! Splits `[0, grid_size)` into one contiguous band of rows per worker:
//!
//! ```text
//!   step = grid_size / num_threads
//!   worker k  ->  [k * step, (k + 1) * step)
//! ```
//!
//! When `grid_size` is not a multiple of `num_threads` there are
//! `grid_size % num_threads` rows left over. What happens to them is chosen
//! by [`PartitionPolicy`].

use std::ops::Range;

use serde::{Deserialize, Serialize};

use crate::error::{LgaError, LgaResult};

/// Half-open range of rows owned by exactly one worker.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct RowInterval {
    /// First row (inclusive).
    pub start: usize,
    /// Last row (exclusive).
    pub end: usize,
}

impl RowInterval {
    /// Creates `[start, end)`.
    ///
    /// # Panics
    ///
    /// Panics if `start > end`.
    #[inline]
    #[must_use]
    pub const fn new(start: usize, end: usize) -> Self {
        assert!(start <= end, "interval start must not exceed end");
        Self { start, end }
    }

    /// Number of rows.
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.end - self.start
    }

    /// Returns true if no rows are assigned.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Returns true if `row` lies in the interval.
    #[inline]
    #[must_use]
    pub const fn contains(&self, row: usize) -> bool {
        self.start <= row && row < self.end
    }

    /// Iterator over the rows.
    #[inline]
    #[must_use]
    pub const fn rows(&self) -> Range<usize> {
        self.start..self.end
    }
}

/// What to do with the rows left over by integer division.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PartitionPolicy {
    /// Leave the tail rows unassigned. They are never updated and keep
    /// whatever the buffers held when the run started.
    Truncate,
    /// Give the tail rows to the last worker.
    #[default]
    RemainderToLast,
    /// Refuse grids that do not divide evenly.
    Strict,
}

/// Computes row intervals for a fixed worker pool.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Partitioner {
    grid_size: usize,
    num_threads: usize,
    policy: PartitionPolicy,
}

impl Partitioner {
    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// - [`LgaError::InvalidGridSize`] if `grid_size == 0`
    /// - [`LgaError::InvalidThreadCount`] if `num_threads == 0`
    /// - [`LgaError::UnevenPartition`] under [`PartitionPolicy::Strict`] when
    ///   `grid_size % num_threads != 0`
    pub fn new(grid_size: usize, num_threads: usize, policy: PartitionPolicy) -> LgaResult<Self> {
        if grid_size == 0 {
            return Err(LgaError::InvalidGridSize(grid_size));
        }
        if num_threads == 0 {
            return Err(LgaError::InvalidThreadCount(num_threads));
        }
        if policy == PartitionPolicy::Strict && grid_size % num_threads != 0 {
            return Err(LgaError::UnevenPartition {
                grid_size,
                num_threads,
            });
        }
        Ok(Self {
            grid_size,
            num_threads,
            policy,
        })
    }

    /// Rows per worker before any remainder handling.
    #[inline]
    #[must_use]
    pub const fn step(&self) -> usize {
        self.grid_size / self.num_threads
    }

    /// The policy in effect.
    #[inline]
    #[must_use]
    pub const fn policy(&self) -> PartitionPolicy {
        self.policy
    }

    /// One interval per worker, in row order.
    #[must_use]
    pub fn intervals(&self) -> Vec<RowInterval> {
        let step = self.step();
        let mut intervals: Vec<RowInterval> = (0..self.num_threads)
            .map(|k| RowInterval::new(k * step, (k + 1) * step))
            .collect();

        if self.policy == PartitionPolicy::RemainderToLast {
            if let Some(last) = intervals.last_mut() {
                last.end = self.grid_size;
            }
        }
        intervals
    }

    /// Rows no worker will ever touch. Only non-empty under
    /// [`PartitionPolicy::Truncate`] with a non-divisible grid.
    #[must_use]
    pub fn uncovered_rows(&self) -> Option<RowInterval> {
        let covered = match self.policy {
            PartitionPolicy::Truncate => self.step() * self.num_threads,
            PartitionPolicy::RemainderToLast | PartitionPolicy::Strict => self.grid_size,
        };
        (covered < self.grid_size).then(|| RowInterval::new(covered, self.grid_size))
    }
}
