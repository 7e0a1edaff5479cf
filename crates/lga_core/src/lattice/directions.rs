//! # Direction Table
//!
//! The hex lattice is stored as a square array with every odd row shifted
//! half a cell to the right ("odd-r" layout). Neighbor offsets therefore
//! depend on the parity of the row:
//!
//! ```text
//!   even row i:          odd row i:
//!     NW  NE               NW  NE
//!   W   *   E            W   *   E
//!     SW  SE               SW  SE
//!
//!   NW = (-1,-1)         NW = (-1, 0)
//!   NE = (-1, 0)         NE = (-1,+1)
//!   SW = (+1,-1)         SW = (+1, 0)
//!   SE = (+1, 0)         SE = (+1,+1)
//! ```

use super::cell::{Direction, NUM_DIRECTIONS};
use crate::error::{LgaError, LgaResult};

/// A `(Δrow, Δcol)` neighbor offset.
pub type Offset = (isize, isize);

/// Parity-indexed neighbor offsets, `offsets[row % 2][direction]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DirectionTable {
    offsets: [[Offset; NUM_DIRECTIONS]; 2],
}

impl DirectionTable {
    /// The default hexagonal table ("odd-r" layout).
    pub const HEX: Self = Self {
        offsets: [
            // Even rows: E, NE, NW, W, SW, SE
            [(0, 1), (-1, 0), (-1, -1), (0, -1), (1, -1), (1, 0)],
            // Odd rows
            [(0, 1), (-1, 1), (-1, 0), (0, -1), (1, 0), (1, 1)],
        ],
    };

    /// Builds a custom table.
    ///
    /// # Errors
    ///
    /// Returns [`LgaError::InvalidDirectionTable`] if walking along a
    /// direction and then along its reverse does not return to the start.
    /// Both the row we land on and the row we start from are checked, so a
    /// particle can always find its way back.
    pub fn new(even: [Offset; NUM_DIRECTIONS], odd: [Offset; NUM_DIRECTIONS]) -> LgaResult<Self> {
        let table = Self { offsets: [even, odd] };
        table.validate()?;
        Ok(table)
    }

    fn validate(&self) -> LgaResult<()> {
        for parity in 0..2 {
            for dir in Direction::ALL {
                let (di, dj) = self.offsets[parity][dir.index()];
                let landed = (parity as isize + di).rem_euclid(2) as usize;
                let (bi, bj) = self.offsets[landed][dir.reverse().index()];
                if di + bi != 0 || dj + bj != 0 {
                    return Err(LgaError::InvalidDirectionTable {
                        parity,
                        direction: dir.index(),
                    });
                }
            }
        }
        Ok(())
    }

    /// Returns the offset of `dir` for a cell on `row`.
    #[inline]
    #[must_use]
    pub const fn offset(&self, row: usize, dir: Direction) -> Offset {
        self.offsets[row % 2][dir.index()]
    }
}

impl Default for DirectionTable {
    fn default() -> Self {
        Self::HEX
    }
}
