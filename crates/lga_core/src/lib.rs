//! # LGA Core Engine
//!
//! Barrier-synchronized parallel update engine for a hexagonal lattice-gas
//! automaton (FHP model):
//! - Six particle directions per cell, packed into one byte
//! - Double-buffered grids, one half-step per buffer swap
//! - Fixed worker pool, one contiguous row band per worker
//!
//! ## Architecture Rules
//!
//! 1. **No locks on cells** - workers write disjoint rows, read a frozen source
//! 2. **One ordering point** - the generation barrier between half-steps
//! 3. **Bit-exact parallelism** - any thread count matches the serial engine
//!
//! ## Example
//!
//! ```rust,ignore
//! use lga_core::{generate, LayoutConfig, ParallelEngine, Simulator};
//!
//! let mut a = generate(256, &LayoutConfig::default())?;
//! let mut b = a.clone();
//! let report = ParallelEngine::new(8)?.run(&mut a, &mut b, 1000)?;
//! // `a` holds generation 1000
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod engine;
pub mod error;
pub mod lattice;
pub mod layout;
pub mod rules;
pub mod sync;

pub use engine::{
    update_half_step, ParallelEngine, PartitionPolicy, Partitioner, RowInterval, RunReport,
    SerialEngine, Simulator, WorkerState, WorkerStats,
};
pub use error::{LgaError, LgaResult};
pub use lattice::{Cell, Direction, DirectionTable, Grid, GridView, Offset, NUM_DIRECTIONS};
pub use layout::{generate, FillRegion, LayoutConfig};
pub use rules::{BounceBack, CollisionRule, FhpCollision, LatticeRules, NoCollision, WallRule};
pub use sync::{BarrierWait, GenerationBarrier};
