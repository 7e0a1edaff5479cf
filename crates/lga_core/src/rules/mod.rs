//! # Transition Rule
//!
//! The per-cell update. Given the previous generation, a cell's next state is
//! assembled from the particles that stream into it, then passed through the
//! collision rule:
//!
//! ```text
//!   for each direction d:
//!       neighbor = cell + offset(row parity, d)
//!       off grid          -> nothing
//!       WALL              -> wall rule (bounce back into this cell)
//!       has reverse(d)    -> that particle arrives, still moving reverse(d)
//!   next = collision(accumulated)
//! ```
//!
//! Walls and collisions are collaborators behind [`WallRule`] and
//! [`CollisionRule`]. Everything the rule needs is held in one
//! [`LatticeRules`] value that workers share by reference.

mod collision;
mod wall;

pub use collision::{FhpCollision, NoCollision};
pub use wall::BounceBack;

use crate::lattice::{Cell, Direction, DirectionTable, GridView};

/// Resolves particle collisions inside a single cell.
///
/// Implementations must be pure: the engine calls them from many threads.
pub trait CollisionRule: Send + Sync {
    /// Maps the raw post-propagation mask to the post-collision mask.
    fn resolve(&self, cell: Cell) -> Cell;
}

impl<F> CollisionRule for F
where
    F: Fn(Cell) -> Cell + Send + Sync,
{
    #[inline]
    fn resolve(&self, cell: Cell) -> Cell {
        self(cell)
    }
}

/// Computes what bounces back into `(row, col)` when the neighbor in `dir`
/// is a WALL.
///
/// Implementations must be pure: the engine calls them from many threads.
pub trait WallRule: Send + Sync {
    /// Returns the particles (if any) reflected into `(row, col)`. Only the
    /// direction bits of the result are used.
    fn reflect(&self, grid: GridView<'_>, row: usize, col: usize, dir: Direction) -> Cell;
}

impl<F> WallRule for F
where
    F: Fn(GridView<'_>, usize, usize, Direction) -> Cell + Send + Sync,
{
    #[inline]
    fn reflect(&self, grid: GridView<'_>, row: usize, col: usize, dir: Direction) -> Cell {
        self(grid, row, col, dir)
    }
}

/// Direction table plus wall and collision collaborators.
#[derive(Clone, Debug)]
pub struct LatticeRules<W = BounceBack, C = FhpCollision> {
    directions: DirectionTable,
    wall: W,
    collision: C,
}

impl LatticeRules {
    /// Hex lattice, bounce-back walls, FHP collisions.
    #[must_use]
    pub const fn fhp() -> Self {
        Self {
            directions: DirectionTable::HEX,
            wall: BounceBack,
            collision: FhpCollision,
        }
    }
}

impl Default for LatticeRules {
    fn default() -> Self {
        Self::fhp()
    }
}

impl<W: WallRule, C: CollisionRule> LatticeRules<W, C> {
    /// Bundles custom collaborators.
    #[must_use]
    pub const fn new(directions: DirectionTable, wall: W, collision: C) -> Self {
        Self {
            directions,
            wall,
            collision,
        }
    }

    /// Neighbor offsets.
    #[inline]
    #[must_use]
    pub const fn directions(&self) -> &DirectionTable {
        &self.directions
    }

    /// Computes the next state of `(row, col)` from the previous generation.
    #[inline]
    #[must_use]
    pub fn next_cell(&self, grid: GridView<'_>, row: usize, col: usize) -> Cell {
        if grid.cell(row, col).is_wall() {
            return Cell::WALL;
        }

        let mut next = Cell::EMPTY;
        for dir in Direction::ALL {
            let rev = dir.reverse();
            let Some(neighbor) = grid.neighbor(row, col, self.directions.offset(row, dir)) else {
                continue;
            };

            if neighbor.is_wall() {
                next |= Cell::from_bits(self.wall.reflect(grid, row, col, dir).raw());
            } else if neighbor.has(rev) {
                next = next.with(rev);
            }
        }

        self.collision.resolve(next)
    }
}
