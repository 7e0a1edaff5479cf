//! # Wall Reflection
//!
//! No-slip bounce-back: a particle that would step into a WALL stays in its
//! cell and reverses direction.

use super::WallRule;
use crate::lattice::{Cell, Direction, GridView};

/// Bounce-back wall rule.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BounceBack;

impl WallRule for BounceBack {
    #[inline]
    fn reflect(&self, grid: GridView<'_>, row: usize, col: usize, dir: Direction) -> Cell {
        if grid.cell(row, col).has(dir) {
            Cell::EMPTY.with(dir.reverse())
        } else {
            Cell::EMPTY
        }
    }
}
