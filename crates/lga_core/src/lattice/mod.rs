//! # Lattice Primitives
//!
//! Cells, directions, the parity-dependent direction table and the grid
//! buffers the engine ping-pongs between.
//!
//! ## Geometry
//!
//! ```text
//!   row 0:  o   o   o   o
//!   row 1:    o   o   o   o
//!   row 2:  o   o   o   o
//!   row 3:    o   o   o   o
//! ```
//!
//! Every cell has six neighbors. Which array slots they live in depends on
//! whether the row is even or odd; [`DirectionTable`] owns that mapping.

mod cell;
mod directions;
mod grid;

pub use cell::{Cell, Direction, NUM_DIRECTIONS};
pub use directions::{DirectionTable, Offset};
pub use grid::{Grid, GridView};
