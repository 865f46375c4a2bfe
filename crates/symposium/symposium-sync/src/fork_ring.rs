//! The forks, arranged in a ring.
//!
//! Fork `i` sits between seat `i` (its left fork) and seat `i - 1 mod N`
//! (its right fork). The ring only hands out forks by index; which fork a
//! seat asks for first is the caller's decision.

use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use symposium_events::SeatId;
use tracing::{trace, warn};

use crate::spin_lock::RawSpinLock;

/// Holder value of a fork nobody owns.
const VACANT: usize = usize::MAX;

#[derive(Debug)]
struct ForkSlot {
    lock: RawSpinLock,
    /// Seat currently holding the fork, or `VACANT`.
    /// Only written inside the critical section of `lock`.
    holder: AtomicUsize,
    acquisitions: AtomicU64,
}

impl ForkSlot {
    fn new() -> Self {
        Self {
            lock: RawSpinLock::new(),
            holder: AtomicUsize::new(VACANT),
            acquisitions: AtomicU64::new(0),
        }
    }
}

/// N exclusive forks indexed `0..N`.
#[derive(Debug)]
pub struct ForkRing {
    slots: Box<[ForkSlot]>,
    /// Times a fork was claimed while the ring still recorded another holder.
    violations: AtomicU64,
}

impl ForkRing {
    pub fn new(forks: usize) -> Self {
        Self {
            slots: (0..forks).map(|_| ForkSlot::new()).collect(),
            violations: AtomicU64::new(0),
        }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Blocks until `seat` owns fork `fork`. The fork is put down when the
    /// returned guard is dropped.
    ///
    /// # Panics
    /// Panics if `fork` is out of range.
    pub fn acquire(&self, fork: usize, seat: SeatId) -> ForkGuard<'_> {
        let slot = &self.slots[fork];
        slot.lock.acquire();

        let prev = slot.holder.swap(seat.0, Ordering::AcqRel);
        if prev != VACANT {
            self.violations.fetch_add(1, Ordering::Relaxed);
            warn!(fork, seat = seat.0, prev, "fork claimed while still held");
        }
        slot.acquisitions.fetch_add(1, Ordering::Relaxed);
        trace!(fork, seat = seat.0, "fork acquired");

        ForkGuard {
            ring: self,
            fork,
            seat,
        }
    }

    /// Seat holding fork `fork` right now, if any.
    pub fn holder(&self, fork: usize) -> Option<SeatId> {
        match self.slots[fork].holder.load(Ordering::Acquire) {
            VACANT => None,
            seat => Some(SeatId(seat)),
        }
    }

    pub fn acquisitions(&self, fork: usize) -> u64 {
        self.slots[fork].acquisitions.load(Ordering::Relaxed)
    }

    pub fn total_acquisitions(&self) -> u64 {
        self.slots
            .iter()
            .map(|s| s.acquisitions.load(Ordering::Relaxed))
            .sum()
    }

    /// Should always be zero.
    pub fn violations(&self) -> u64 {
        self.violations.load(Ordering::Relaxed)
    }

    fn put_down(&self, fork: usize, seat: SeatId) {
        let slot = &self.slots[fork];
        slot.holder.store(VACANT, Ordering::Release);
        trace!(fork, seat = seat.0, "fork released");
        slot.lock.release();
    }
}

/// Ownership of one fork. Dropping it puts the fork back on the table.
#[must_use = "the fork is released as soon as the guard is dropped"]
#[derive(Debug)]
pub struct ForkGuard<'a> {
    ring: &'a ForkRing,
    fork: usize,
    seat: SeatId,
}

impl ForkGuard<'_> {
    pub fn fork(&self) -> usize {
        self.fork
    }
}

impl Drop for ForkGuard<'_> {
    fn drop(&mut self) {
        self.ring.put_down(self.fork, self.seat);
    }
}
