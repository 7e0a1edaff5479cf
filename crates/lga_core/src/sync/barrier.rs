//! # Generation Barrier
//!
//! Reusable rendezvous for a fixed number of participants.
//!
//! ```text
//!   worker 0 ──┐
//!   worker 1 ──┼──> [arrived == parties?] ──> generation += 1, wake all
//!   worker N ──┘          (no: sleep until generation changes)
//! ```
//!
//! Waiters sleep on the *generation* number, not on the arrival count, so a
//! fast worker that races into the next round can never release a slow worker
//! that is still asleep in the previous one.
//!
//! Unlike `std::sync::Barrier`, this one can be aborted. Aborting wakes every
//! sleeper and makes every later `wait` return immediately, which is how the
//! engine tears down a pool after a spawn failure or a worker panic.

use parking_lot::{Condvar, Mutex};

use crate::error::{LgaError, LgaResult};

/// Outcome of [`GenerationBarrier::wait`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BarrierWait {
    /// This caller was the last to arrive and released the round.
    Leader,
    /// Released by another participant.
    Follower,
    /// The barrier was aborted; the caller must stop.
    Aborted,
}

impl BarrierWait {
    /// Returns true for [`BarrierWait::Leader`].
    #[inline]
    #[must_use]
    pub const fn is_leader(self) -> bool {
        matches!(self, Self::Leader)
    }

    /// Returns true for [`BarrierWait::Aborted`].
    #[inline]
    #[must_use]
    pub const fn is_aborted(self) -> bool {
        matches!(self, Self::Aborted)
    }
}

#[derive(Debug)]
struct BarrierState {
    arrived: usize,
    generation: u64,
    aborted: bool,
}

/// Counter + generation + condvar barrier with abort support.
#[derive(Debug)]
pub struct GenerationBarrier {
    parties: usize,
    state: Mutex<BarrierState>,
    released: Condvar,
}

impl GenerationBarrier {
    /// Creates a barrier for exactly `parties` participants.
    ///
    /// # Errors
    ///
    /// Returns [`LgaError::InvalidThreadCount`] if `parties == 0`.
    pub fn new(parties: usize) -> LgaResult<Self> {
        if parties == 0 {
            return Err(LgaError::InvalidThreadCount(parties));
        }
        Ok(Self {
            parties,
            state: Mutex::new(BarrierState {
                arrived: 0,
                generation: 0,
                aborted: false,
            }),
            released: Condvar::new(),
        })
    }

    /// Number of participants per round.
    #[inline]
    #[must_use]
    pub const fn parties(&self) -> usize {
        self.parties
    }

    /// Number of completed rounds.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.state.lock().generation
    }

    /// Returns true once [`GenerationBarrier::abort`] has been called.
    #[must_use]
    pub fn is_aborted(&self) -> bool {
        self.state.lock().aborted
    }

    /// Blocks until `parties` callers have arrived in the current round.
    ///
    /// Every write made before `wait` by any participant is visible to every
    /// participant after `wait` returns (the mutex provides the ordering).
    pub fn wait(&self) -> BarrierWait {
        let mut state = self.state.lock();
        if state.aborted {
            return BarrierWait::Aborted;
        }

        state.arrived += 1;
        if state.arrived == self.parties {
            state.arrived = 0;
            state.generation = state.generation.wrapping_add(1);
            self.released.notify_all();
            return BarrierWait::Leader;
        }

        let generation = state.generation;
        while state.generation == generation && !state.aborted {
            self.released.wait(&mut state);
        }

        if state.generation == generation {
            BarrierWait::Aborted
        } else {
            BarrierWait::Follower
        }
    }

    /// Releases every current and future waiter with [`BarrierWait::Aborted`].
    pub fn abort(&self) {
        let mut state = self.state.lock();
        state.aborted = true;
        self.released.notify_all();
    }
}
