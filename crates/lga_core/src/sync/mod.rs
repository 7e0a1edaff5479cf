//! # Synchronization Primitives for the Worker Pool
//!
//! No locks on cells. No race conditions.
//!
//! ## The Problem
//!
//! ```text
//! Worker 1:  WRITE rows [0, k) of the next generation
//! Worker 2:  WRITE rows [k, n) of the next generation
//! Both:      READ every row of the previous generation
//!
//! Without synchronization: a worker reads a half-written generation
//! With a lock per cell:    contention on the hottest loop
//! ```
//!
//! ## The Solution: Double Buffering + Barrier
//!
//! ```text
//! Half-step N:    read A, write B (each worker its own rows)
//! ── barrier ──
//! Half-step N+1:  read B, write A
//! ── barrier ──
//! ```
//!
//! The barrier is the only cross-thread ordering point.

mod barrier;
mod shared_grid;

pub use barrier::{BarrierWait, GenerationBarrier};
pub(crate) use shared_grid::SharedGrid;
