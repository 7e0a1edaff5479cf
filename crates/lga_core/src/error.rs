//! # Engine Error Types
//!
//! All errors that can occur while building or running a simulation.
//!
//! The transition rule itself cannot fail. Everything here is either input
//! validation (done before any worker starts) or resource acquisition.

use thiserror::Error;

/// Errors that can occur in the LGA engine.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LgaError {
    /// Grid side length must be positive.
    #[error("invalid grid size: {0} (must be > 0)")]
    InvalidGridSize(usize),

    /// The two ping-pong buffers disagree on their dimensions.
    #[error("grid size mismatch: grid A is {a}x{a}, grid B is {b}x{b}")]
    GridSizeMismatch {
        /// Side length of grid A.
        a: usize,
        /// Side length of grid B.
        b: usize,
    },

    /// A raw buffer does not hold exactly `grid_size²` cells.
    #[error("buffer length mismatch: expected {expected} cells, got {actual}")]
    BufferLength {
        /// Expected number of cells.
        expected: usize,
        /// Number of cells supplied.
        actual: usize,
    },

    /// A raw byte is neither WALL nor a valid direction mask.
    #[error("invalid cell value 0x{value:02x} at index {index}")]
    InvalidCell {
        /// Flat index of the offending byte.
        index: usize,
        /// The byte value.
        value: u8,
    },

    /// Worker count must be positive.
    #[error("invalid thread count: {0} (must be > 0)")]
    InvalidThreadCount(usize),

    /// Strict partitioning requires `grid_size % num_threads == 0`.
    #[error("grid size {grid_size} is not divisible by {num_threads} threads")]
    UnevenPartition {
        /// Grid side length.
        grid_size: usize,
        /// Requested worker count.
        num_threads: usize,
    },

    /// The half-step count must be even so the result lands in grid A.
    #[error("iteration count {0} is odd; the result would end up in grid B")]
    OddIterations(usize),

    /// Layout density must be a probability.
    #[error("invalid particle density {0} (must be within [0, 1])")]
    InvalidDensity(f64),

    /// A direction table whose reverse offsets do not cancel out.
    #[error("direction {direction} on parity {parity} does not invert")]
    InvalidDirectionTable {
        /// Row parity (0 = even, 1 = odd).
        parity: usize,
        /// Direction index.
        direction: usize,
    },

    /// The OS refused to start a worker thread.
    #[error("failed to spawn worker {worker}: {reason}")]
    ThreadSpawn {
        /// Worker index.
        worker: usize,
        /// OS error message.
        reason: String,
    },

    /// A worker panicked; the run was aborted.
    #[error("worker {worker} panicked; run aborted")]
    WorkerPanicked {
        /// Worker index.
        worker: usize,
    },
}

/// Result type for engine operations.
pub type LgaResult<T> = Result<T, LgaError>;
