//! # Grid Storage
//!
//! A square, row-major array of [`Cell`]s. All 2D-to-flat index math lives
//! here; the rest of the crate only talks rows and columns.

use std::fmt;

use super::cell::Cell;
use super::directions::Offset;
use crate::error::{LgaError, LgaResult};

/// Owned `size × size` cell buffer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    size: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// Creates an all-EMPTY grid.
    ///
    /// # Errors
    ///
    /// Returns [`LgaError::InvalidGridSize`] if `size` is zero or `size²`
    /// overflows.
    pub fn new(size: usize) -> LgaResult<Self> {
        let len = Self::checked_len(size)?;
        Ok(Self {
            size,
            cells: vec![Cell::EMPTY; len],
        })
    }

    /// Wraps an existing cell buffer.
    ///
    /// # Errors
    ///
    /// Returns [`LgaError::BufferLength`] if `cells.len() != size²`.
    pub fn from_cells(size: usize, cells: Vec<Cell>) -> LgaResult<Self> {
        let expected = Self::checked_len(size)?;
        if cells.len() != expected {
            return Err(LgaError::BufferLength {
                expected,
                actual: cells.len(),
            });
        }
        Ok(Self { size, cells })
    }

    /// Imports a raw byte buffer, validating every byte.
    ///
    /// # Errors
    ///
    /// Returns [`LgaError::BufferLength`] on a length mismatch and
    /// [`LgaError::InvalidCell`] for the first byte that is neither WALL nor a
    /// direction mask.
    pub fn from_bytes(size: usize, bytes: &[u8]) -> LgaResult<Self> {
        let cells = bytes
            .iter()
            .enumerate()
            .map(|(index, &value)| Cell::from_raw(value).ok_or(LgaError::InvalidCell { index, value }))
            .collect::<LgaResult<Vec<_>>>()?;
        Self::from_cells(size, cells)
    }

    fn checked_len(size: usize) -> LgaResult<usize> {
        if size == 0 {
            return Err(LgaError::InvalidGridSize(size));
        }
        size.checked_mul(size).ok_or(LgaError::InvalidGridSize(size))
    }

    /// Side length.
    #[inline]
    #[must_use]
    pub const fn size(&self) -> usize {
        self.size
    }

    /// Flat index of `(row, col)` (row-major).
    #[inline]
    #[must_use]
    pub const fn index(&self, row: usize, col: usize) -> usize {
        row * self.size + col
    }

    /// Reads a cell, `None` if out of bounds.
    #[inline]
    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> Option<Cell> {
        self.view().get(row, col)
    }

    /// Writes a cell.
    ///
    /// # Panics
    ///
    /// Panics if `(row, col)` is out of bounds.
    #[inline]
    pub fn set(&mut self, row: usize, col: usize, cell: Cell) {
        assert!(row < self.size && col < self.size, "cell ({row}, {col}) out of bounds");
        let idx = self.index(row, col);
        self.cells[idx] = cell;
    }

    /// One row of cells.
    ///
    /// # Panics
    ///
    /// Panics if `row >= size`.
    #[inline]
    #[must_use]
    pub fn row(&self, row: usize) -> &[Cell] {
        &self.cells[row * self.size..(row + 1) * self.size]
    }

    /// One row of cells, mutable.
    ///
    /// # Panics
    ///
    /// Panics if `row >= size`.
    #[inline]
    pub fn row_mut(&mut self, row: usize) -> &mut [Cell] {
        let size = self.size;
        &mut self.cells[row * size..(row + 1) * size]
    }

    /// All cells, row-major.
    #[inline]
    #[must_use]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// All cells, row-major, mutable.
    #[inline]
    pub fn cells_mut(&mut self) -> &mut [Cell] {
        &mut self.cells
    }

    /// Zero-copy byte view of the buffer.
    #[inline]
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.cells)
    }

    /// Borrowed read-only view.
    #[inline]
    #[must_use]
    pub fn view(&self) -> GridView<'_> {
        GridView::new(self.size, &self.cells)
    }

    /// Total number of particles on the grid.
    #[must_use]
    pub fn particle_count(&self) -> u64 {
        self.cells.iter().map(|c| u64::from(c.particle_count())).sum()
    }

    /// Number of WALL cells.
    #[must_use]
    pub fn wall_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_wall()).count()
    }
}

impl fmt::Display for Grid {
    /// `#` wall, `.` empty, digit = particle count. Odd rows are indented to
    /// show the hex skew.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.size {
            if row % 2 == 1 {
                f.write_str(" ")?;
            }
            for (col, cell) in self.row(row).iter().enumerate() {
                if col > 0 {
                    f.write_str(" ")?;
                }
                if cell.is_wall() {
                    f.write_str("#")?;
                } else if cell.is_empty() {
                    f.write_str(".")?;
                } else {
                    write!(f, "{}", cell.particle_count())?;
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Borrowed, bounds-aware 2D view over a cell buffer.
#[derive(Clone, Copy, Debug)]
pub struct GridView<'a> {
    size: usize,
    cells: &'a [Cell],
}

impl<'a> GridView<'a> {
    /// Wraps a row-major slice of `size²` cells.
    ///
    /// # Panics
    ///
    /// Panics if `cells.len() != size * size`.
    #[inline]
    #[must_use]
    pub fn new(size: usize, cells: &'a [Cell]) -> Self {
        assert_eq!(cells.len(), size * size, "view length must be size²");
        Self { size, cells }
    }

    /// Side length.
    #[inline]
    #[must_use]
    pub const fn size(&self) -> usize {
        self.size
    }

    /// Returns true if signed coordinates fall inside the grid.
    #[inline]
    #[must_use]
    pub const fn in_bounds(&self, row: isize, col: isize) -> bool {
        row >= 0 && col >= 0 && (row as usize) < self.size && (col as usize) < self.size
    }

    /// Reads a cell, `None` if out of bounds.
    #[inline]
    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> Option<Cell> {
        if row < self.size && col < self.size {
            Some(self.cells[row * self.size + col])
        } else {
            None
        }
    }

    /// Reads a cell.
    ///
    /// # Panics
    ///
    /// Panics if `(row, col)` is out of bounds.
    #[inline]
    #[must_use]
    pub fn cell(&self, row: usize, col: usize) -> Cell {
        assert!(col < self.size, "column {col} out of bounds");
        self.cells[row * self.size + col]
    }

    /// Reads the neighbor of `(row, col)` at `offset`, `None` if it falls
    /// off the grid.
    #[inline]
    #[must_use]
    #[allow(clippy::cast_possible_wrap, clippy::cast_sign_loss)]
    pub fn neighbor(&self, row: usize, col: usize, offset: Offset) -> Option<Cell> {
        let n_row = row as isize + offset.0;
        let n_col = col as isize + offset.1;
        if self.in_bounds(n_row, n_col) {
            Some(self.cells[n_row as usize * self.size + n_col as usize])
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lattice::Direction;

    #[test]
    fn test_new_rejects_zero() {
        assert_eq!(Grid::new(0).unwrap_err(), LgaError::InvalidGridSize(0));
    }

    #[test]
    fn test_index_is_row_major() {
        let grid = Grid::new(5).unwrap();
        assert_eq!(grid.index(0, 0), 0);
        assert_eq!(grid.index(0, 4), 4);
        assert_eq!(grid.index(1, 0), 5);
        assert_eq!(grid.index(4, 4), 24);
    }

    #[test]
    fn test_from_bytes_validates() {
        let mut bytes = vec![0u8; 9];
        bytes[4] = 0x80;
        bytes[5] = 0x21;
        let grid = Grid::from_bytes(3, &bytes).unwrap();
        assert!(grid.get(1, 1).unwrap().is_wall());
        assert_eq!(grid.as_bytes(), bytes.as_slice());

        bytes[7] = 0x41;
        assert_eq!(
            Grid::from_bytes(3, &bytes).unwrap_err(),
            LgaError::InvalidCell { index: 7, value: 0x41 }
        );
        assert_eq!(
            Grid::from_bytes(4, &[0u8; 9]).unwrap_err(),
            LgaError::BufferLength { expected: 16, actual: 9 }
        );
    }

    #[test]
    fn test_neighbor_bounds() {
        let mut grid = Grid::new(3).unwrap();
        grid.set(0, 0, Cell::EMPTY.with(Direction::E));
        let view = grid.view();
        assert_eq!(view.neighbor(1, 1, (-1, -1)), Some(Cell::EMPTY.with(Direction::E)));
        assert_eq!(view.neighbor(0, 0, (-1, 0)), None);
        assert_eq!(view.neighbor(2, 2, (0, 1)), None);
        assert!(view.in_bounds(2, 2));
        assert!(!view.in_bounds(-1, 0));
    }

    #[test]
    fn test_counts_and_display() {
        let mut grid = Grid::new(2).unwrap();
        grid.set(0, 0, Cell::WALL);
        grid.set(1, 1, Cell::from_bits(0b101));
        assert_eq!(grid.particle_count(), 2);
        assert_eq!(grid.wall_count(), 1);
        assert_eq!(grid.to_string(), "# .\n . 2\n");
    }
}
