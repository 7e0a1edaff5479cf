//! # Layout Generator
//!
//! Seeded initial conditions. The same `(grid_size, LayoutConfig)` always
//! produces the same grid, on every platform: the RNG is `ChaCha8Rng` and
//! cells are visited in row-major order, direction by direction.
//!
//! ```text
//!   border_walls    divider         fill = left_half
//!   # # # # #       . . # . .       3 1 . . .
//!    # . . . #       . . . . .       2 . . . .
//!   # . . . #       . . # . .       4 1 . . .
//! ```

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::error::{LgaError, LgaResult};
use crate::lattice::{Cell, Direction, Grid};

/// Which non-wall cells receive particles.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FillRegion {
    /// Every non-wall cell.
    #[default]
    Everywhere,
    /// Columns left of the middle only. With a divider this is the classic
    /// free-expansion setup.
    LeftHalf,
}

impl FillRegion {
    #[inline]
    const fn covers(self, col: usize, grid_size: usize) -> bool {
        match self {
            Self::Everywhere => true,
            Self::LeftHalf => col < grid_size / 2,
        }
    }
}

/// Initial-condition parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LayoutConfig {
    /// RNG seed.
    pub seed: u64,
    /// Probability that any one direction bit of a fillable cell is set.
    pub density: f64,
    /// Wall off the outermost ring of cells.
    pub border_walls: bool,
    /// Vertical wall down the middle column with a gap in the center.
    pub divider: bool,
    /// Region that receives particles.
    pub fill: FillRegion,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            density: 0.2,
            border_walls: true,
            divider: false,
            fill: FillRegion::Everywhere,
        }
    }
}

impl LayoutConfig {
    /// Checks that `density` is a probability.
    ///
    /// # Errors
    ///
    /// Returns [`LgaError::InvalidDensity`] if `density` is outside `[0, 1]`
    /// or NaN.
    pub fn validate(&self) -> LgaResult<()> {
        if (0.0..=1.0).contains(&self.density) {
            Ok(())
        } else {
            Err(LgaError::InvalidDensity(self.density))
        }
    }
}

/// Rows of the divider gap: a quarter of the height, centered.
fn divider_gap(grid_size: usize) -> (usize, usize) {
    let gap = (grid_size / 4).max(1);
    let start = (grid_size - gap) / 2;
    (start, start + gap)
}

/// Builds a `grid_size × grid_size` grid from `config`.
///
/// # Errors
///
/// Returns [`LgaError::InvalidGridSize`] for a zero size and
/// [`LgaError::InvalidDensity`] for a density outside `[0, 1]`.
pub fn generate(grid_size: usize, config: &LayoutConfig) -> LgaResult<Grid> {
    config.validate()?;
    let mut grid = Grid::new(grid_size)?;
    let last = grid_size - 1;

    if config.border_walls {
        for i in 0..grid_size {
            grid.set(0, i, Cell::WALL);
            grid.set(last, i, Cell::WALL);
            grid.set(i, 0, Cell::WALL);
            grid.set(i, last, Cell::WALL);
        }
    }

    if config.divider {
        let col = grid_size / 2;
        let (gap_start, gap_end) = divider_gap(grid_size);
        for row in (0..grid_size).filter(|r| !(gap_start..gap_end).contains(r)) {
            grid.set(row, col, Cell::WALL);
        }
    }

    let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
    for row in 0..grid_size {
        for col in 0..grid_size {
            if grid.row(row)[col].is_wall() || !config.fill.covers(col, grid_size) {
                continue;
            }
            let mut next = Cell::EMPTY;
            for dir in Direction::ALL {
                if rng.gen_bool(config.density) {
                    next = next.with(dir);
                }
            }
            grid.set(row, col, next);
        }
    }

    Ok(grid)
}
