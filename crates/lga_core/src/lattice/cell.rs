//! # Cells and Directions
//!
//! A cell is one byte. The low [`NUM_DIRECTIONS`] bits say which directions
//! carry a particle; the WALL sentinel sits above them so it can never be
//! confused with a particle configuration.
//!
//! ```text
//!   bit:   7     6    5    4    3    2    1    0
//!        WALL    -   SE   SW    W   NW   NE    E
//! ```

use bytemuck::{Pod, Zeroable};

/// Number of lattice directions (hexagonal lattice).
pub const NUM_DIRECTIONS: usize = 6;

/// One lattice cell: WALL, EMPTY, or a particle bitmask.
///
/// `#[repr(transparent)]` over `u8` so a `&[Cell]` can be viewed as raw bytes
/// without copying.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Pod, Zeroable)]
#[repr(transparent)]
pub struct Cell(u8);

impl Cell {
    /// No particles.
    pub const EMPTY: Self = Self(0x00);

    /// Static obstacle. Never moves, never changes.
    pub const WALL: Self = Self(0x80);

    /// Bits that may be set on a particle cell.
    pub const PARTICLE_MASK: u8 = (1 << NUM_DIRECTIONS) - 1;

    /// Builds a particle cell from a direction mask. High bits are dropped.
    #[inline]
    #[must_use]
    pub const fn from_bits(bits: u8) -> Self {
        Self(bits & Self::PARTICLE_MASK)
    }

    /// Validates a raw byte: WALL or a mask within [`Cell::PARTICLE_MASK`].
    #[inline]
    #[must_use]
    pub const fn from_raw(raw: u8) -> Option<Self> {
        if raw == Self::WALL.0 || raw & !Self::PARTICLE_MASK == 0 {
            Some(Self(raw))
        } else {
            None
        }
    }

    /// Returns the raw byte.
    #[inline]
    #[must_use]
    pub const fn raw(self) -> u8 {
        self.0
    }

    /// Returns true for the WALL sentinel.
    #[inline]
    #[must_use]
    pub const fn is_wall(self) -> bool {
        self.0 == Self::WALL.0
    }

    /// Returns true when no particle is present.
    #[inline]
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == Self::EMPTY.0
    }

    /// Returns true if a particle moves in `dir`. Always false for walls.
    #[inline]
    #[must_use]
    pub const fn has(self, dir: Direction) -> bool {
        !self.is_wall() && self.0 & dir.mask() != 0
    }

    /// Returns this cell with a particle added in `dir`.
    #[inline]
    #[must_use]
    pub const fn with(self, dir: Direction) -> Self {
        Self(self.0 | dir.mask())
    }

    /// Number of particles in the cell (0 for walls).
    #[inline]
    #[must_use]
    pub const fn particle_count(self) -> u32 {
        if self.is_wall() {
            0
        } else {
            self.0.count_ones()
        }
    }
}

impl std::ops::BitOr for Cell {
    type Output = Self;

    #[inline]
    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl std::ops::BitOrAssign for Cell {
    #[inline]
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

/// A lattice direction, counter-clockwise from east.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Direction(u8);

impl Direction {
    /// East.
    pub const E: Self = Self(0);
    /// North-east.
    pub const NE: Self = Self(1);
    /// North-west.
    pub const NW: Self = Self(2);
    /// West.
    pub const W: Self = Self(3);
    /// South-west.
    pub const SW: Self = Self(4);
    /// South-east.
    pub const SE: Self = Self(5);

    /// All directions in bit order.
    pub const ALL: [Self; NUM_DIRECTIONS] =
        [Self::E, Self::NE, Self::NW, Self::W, Self::SW, Self::SE];

    /// Creates a direction from its index, if in range.
    #[inline]
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub const fn new(index: usize) -> Option<Self> {
        if index < NUM_DIRECTIONS {
            Some(Self(index as u8))
        } else {
            None
        }
    }

    /// Returns the direction index in `[0, NUM_DIRECTIONS)`.
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// The opposite direction: `(d + N/2) mod N`.
    #[inline]
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub const fn reverse(self) -> Self {
        Self(((self.0 as usize + NUM_DIRECTIONS / 2) % NUM_DIRECTIONS) as u8)
    }

    /// Single-bit mask of this direction.
    #[inline]
    #[must_use]
    pub const fn mask(self) -> u8 {
        1 << self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sentinels() {
        assert!(Cell::WALL.is_wall());
        assert!(!Cell::WALL.is_empty());
        assert!(Cell::EMPTY.is_empty());
        assert_eq!(Cell::WALL.raw() & Cell::PARTICLE_MASK, 0);
    }

    #[test]
    fn test_from_raw_validation() {
        assert_eq!(Cell::from_raw(0x80), Some(Cell::WALL));
        assert_eq!(Cell::from_raw(0x3F), Some(Cell::from_bits(0x3F)));
        assert_eq!(Cell::from_raw(0x40), None);
        assert_eq!(Cell::from_raw(0x81), None);
    }

    #[test]
    fn test_reverse_is_involution() {
        for dir in Direction::ALL {
            assert_ne!(dir, dir.reverse());
            assert_eq!(dir.reverse().reverse(), dir);
        }
        assert_eq!(Direction::E.reverse(), Direction::W);
        assert_eq!(Direction::NE.reverse(), Direction::SW);
        assert_eq!(Direction::NW.reverse(), Direction::SE);
    }

    #[test]
    fn test_particle_count() {
        let cell = Cell::EMPTY.with(Direction::E).with(Direction::SW);
        assert_eq!(cell.particle_count(), 2);
        assert!(cell.has(Direction::SW));
        assert!(!cell.has(Direction::W));
        assert_eq!(Cell::WALL.particle_count(), 0);
        assert!(!Cell::WALL.has(Direction::E));
        assert_eq!(Direction::new(NUM_DIRECTIONS), None);
    }
}
