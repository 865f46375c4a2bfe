use std::time::Instant;
use symposium_events::{SeatId, SeatRecord, SeatView, StateSnapshot};

use crate::spin_lock::SpinLock;

/// Every seat's record behind one coarse lock.
///
/// Writers touch only their own record; readers copy the whole table. Both
/// happen under the same lock, so a reader never sees a record halfway
/// through a transition.
pub struct SeatTable {
    records: SpinLock<Vec<SeatRecord>>,
}

impl SeatTable {
    pub fn new(seats: usize) -> Self {
        Self {
            records: SpinLock::new((0..seats).map(|i| SeatRecord::new(SeatId(i))).collect()),
        }
    }

    pub fn len(&self) -> usize {
        self.records.with_lock(|r| r.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Scoped exclusive access to all records.
    pub fn with_lock<R>(&self, f: impl FnOnce(&mut [SeatRecord]) -> R) -> R {
        self.records.with_lock(|r| f(r.as_mut_slice()))
    }

    /// Applies `f` to `seat`'s record as one atomic update.
    ///
    /// # Panics
    /// Panics if `seat` is not in the table.
    pub fn update<R>(&self, seat: SeatId, f: impl FnOnce(&mut SeatRecord) -> R) -> R {
        self.with_lock(|records| f(&mut records[seat.0]))
    }

    pub fn record(&self, seat: SeatId) -> SeatRecord {
        self.with_lock(|records| records[seat.0].clone())
    }

    pub fn snapshot(&self) -> StateSnapshot {
        self.with_lock(|records| {
            let seats = records.iter().map(SeatView::from).collect();
            StateSnapshot::new(Instant::now(), seats)
        })
    }
}
