use crate::seat::{SeatId, SeatRecord, Status};
use std::time::{Duration, Instant};

/// Read-only copy of one seat, taken under the table lock.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SeatView {
    pub seat: SeatId,
    pub status: Status,
    pub holding_left: bool,
    pub holding_right: bool,
    /// Set only while `status` is Hungry.
    pub hungry_since: Option<Instant>,
    pub meals: u64,
}

impl SeatView {
    /// Time spent waiting for forks as of `at`; `None` unless Hungry.
    pub fn waiting(&self, at: Instant) -> Option<Duration> {
        self.hungry_since.map(|since| at.saturating_duration_since(since))
    }
}

impl From<&SeatRecord> for SeatView {
    fn from(rec: &SeatRecord) -> Self {
        Self {
            seat: rec.seat(),
            status: rec.status(),
            holding_left: rec.holding_left(),
            holding_right: rec.holding_right(),
            hungry_since: rec.hungry_since(),
            meals: rec.meals(),
        }
    }
}

/// Consistent view of the whole table at one instant.
///
/// Two snapshots taken with no worker activity in between compare equal on
/// `seats()`; only `taken_at` differs.
#[derive(Clone, Debug)]
pub struct StateSnapshot {
    taken_at: Instant,
    seats: Vec<SeatView>,
}

impl StateSnapshot {
    pub fn new(taken_at: Instant, seats: Vec<SeatView>) -> Self {
        Self { taken_at, seats }
    }

    pub fn taken_at(&self) -> Instant {
        self.taken_at
    }

    pub fn seats(&self) -> &[SeatView] {
        &self.seats
    }

    /// Waiting time of `view` measured at the moment the snapshot was taken.
    pub fn waiting(&self, view: &SeatView) -> Option<Duration> {
        view.waiting(self.taken_at)
    }

    pub fn min_meals(&self) -> u64 {
        self.seats.iter().map(|s| s.meals).min().unwrap_or(0)
    }

    pub fn total_meals(&self) -> u64 {
        self.seats.iter().map(|s| s.meals).sum()
    }

    pub fn count(&self, status: Status) -> usize {
        self.seats.iter().filter(|s| s.status == status).count()
    }
}
