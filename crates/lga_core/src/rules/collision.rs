//! # Collision Rules
//!
//! FHP-I collisions on the hexagonal lattice. Only two configurations
//! scatter:
//!
//! ```text
//!   head-on pair (d, d+3)   -> rotated by +60°   E+W -> NE+SW -> NW+SE -> E+W
//!   symmetric triple        -> the other triple  E+NW+SW <-> NE+W+SE
//! ```
//!
//! Everything else passes through untouched, so particle count and momentum
//! are conserved for every input.

use super::CollisionRule;
use crate::lattice::{Cell, NUM_DIRECTIONS};

const STATES: usize = 1 << NUM_DIRECTIONS;

/// Precomputed lookup: one entry per particle configuration.
const FHP_TABLE: [u8; STATES] = build_fhp_table();

#[allow(clippy::cast_possible_truncation)]
const fn build_fhp_table() -> [u8; STATES] {
    let mut table = [0u8; STATES];
    let mut state = 0;
    while state < STATES {
        table[state] = state as u8;
        state += 1;
    }
    // Head-on pairs.
    table[0x09] = 0x12;
    table[0x12] = 0x24;
    table[0x24] = 0x09;
    // Symmetric triples.
    table[0x15] = 0x2A;
    table[0x2A] = 0x15;
    table
}

/// Deterministic FHP-I collision rule.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FhpCollision;

impl CollisionRule for FhpCollision {
    #[inline]
    fn resolve(&self, cell: Cell) -> Cell {
        if cell.is_wall() {
            return cell;
        }
        Cell::from_bits(FHP_TABLE[usize::from(cell.raw() & Cell::PARTICLE_MASK)])
    }
}

/// Identity rule: particles pass through each other.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NoCollision;

impl CollisionRule for NoCollision {
    #[inline]
    fn resolve(&self, cell: Cell) -> Cell {
        cell
    }
}
