//! # Shared Grid Buffer
//!
//! Lets every worker read the whole source buffer while writing its own rows
//! of the destination buffer, with no locks on the cells.
//!
//! ## Safety Note
//!
//! This module requires unsafe code: the borrow checker cannot see that row
//! intervals are disjoint, or that the barrier separates readers from writers.
//!
//! ## Access Protocol
//!
//! ```text
//!   half-step N:   every worker   view(src)            (shared, read-only)
//!                  worker k       rows_mut(dst, I_k)   (exclusive, I_k disjoint)
//!   ── barrier ──  all references from half-step N are dead
//!   half-step N+1: src and dst swap roles
//! ```

#![allow(unsafe_code)]

use std::marker::PhantomData;
use std::slice;

use crate::engine::RowInterval;
use crate::lattice::{Cell, Grid, GridView};

/// Raw handle to a grid buffer shared by the worker pool.
///
/// Holds the `&mut Grid` borrow for `'a`, so the owner cannot touch the grid
/// while workers run.
pub(crate) struct SharedGrid<'a> {
    ptr: *mut Cell,
    size: usize,
    _grid: PhantomData<&'a mut Grid>,
}

// SAFETY: SharedGrid only hands out references through `view` and `rows_mut`,
// whose contracts forbid overlapping mutable access. Cells are plain bytes.
unsafe impl Send for SharedGrid<'_> {}
// SAFETY: see above; concurrent access is coordinated by the caller's
// partition (disjoint rows) and barrier (read/write phases never overlap).
unsafe impl Sync for SharedGrid<'_> {}

impl<'a> SharedGrid<'a> {
    /// Takes the exclusive borrow of `grid` for the duration of a run.
    pub(crate) fn new(grid: &'a mut Grid) -> Self {
        let size = grid.size();
        Self {
            ptr: grid.cells_mut().as_mut_ptr(),
            size,
            _grid: PhantomData,
        }
    }

    /// Read-only view of the whole buffer.
    ///
    /// # Safety
    ///
    /// No thread may write to this buffer while the returned view is alive.
    pub(crate) unsafe fn view(&self) -> GridView<'_> {
        // SAFETY: `ptr` covers `size²` initialized cells for `'a`; the caller
        // guarantees there is no concurrent writer.
        let cells = unsafe { slice::from_raw_parts(self.ptr, self.size * self.size) };
        GridView::new(self.size, cells)
    }

    /// Exclusive access to the rows of `interval`.
    ///
    /// # Safety
    ///
    /// For as long as the returned slice is alive, no other reference (shared
    /// or mutable) to any of these rows may exist. In particular no
    /// [`SharedGrid::view`] of this buffer may be alive.
    ///
    /// # Panics
    ///
    /// Panics if the interval extends past the last row.
    #[allow(clippy::mut_from_ref)]
    pub(crate) unsafe fn rows_mut(&self, interval: RowInterval) -> &mut [Cell] {
        assert!(interval.end <= self.size, "row interval out of bounds");
        // SAFETY: the range lies inside the buffer (checked above); exclusivity
        // is the caller's contract.
        unsafe {
            slice::from_raw_parts_mut(
                self.ptr.add(interval.start * self.size),
                interval.len() * self.size,
            )
        }
    }
}
