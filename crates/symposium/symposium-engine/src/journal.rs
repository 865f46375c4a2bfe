use symposium_events::{SeatId, Status};
use symposium_sync::SpinLock;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum JournalEvent {
    StatusChanged(Status),
    /// Recorded after the fork is held.
    ForkAcquired(usize),
    /// Recorded before the fork is put down.
    ForkReleased(usize),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct JournalEntry {
    /// Position in the global history.
    pub seq: u64,
    pub seat: SeatId,
    pub event: JournalEvent,
}

/// Append-only history of everything the philosophers did.
///
/// Fork events are recorded while the fork is held, so for any one fork the
/// history order matches the real order of ownership.
#[derive(Default)]
pub struct Journal {
    entries: SpinLock<Vec<JournalEntry>>,
}

impl Journal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, seat: SeatId, event: JournalEvent) {
        self.entries.with_lock(|entries| {
            let seq = entries.len() as u64;
            entries.push(JournalEntry { seq, seat, event });
        });
    }

    /// Copy of the history in sequence order.
    pub fn entries(&self) -> Vec<JournalEntry> {
        self.entries.with_lock(|e| e.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sequence_numbers_are_dense() {
        let j = Journal::new();
        j.record(SeatId(0), JournalEvent::StatusChanged(Status::Hungry));
        j.record(SeatId(1), JournalEvent::ForkAcquired(1));
        j.record(SeatId(1), JournalEvent::ForkReleased(1));

        let entries = j.entries();
        assert_eq!(entries.len(), 3);
        for (i, e) in entries.iter().enumerate() {
            assert_eq!(e.seq, i as u64);
        }
        assert_eq!(entries[1].event, JournalEvent::ForkAcquired(1));
    }
}
