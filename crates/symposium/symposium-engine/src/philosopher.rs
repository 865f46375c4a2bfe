//! One philosopher's life cycle.
//!
//! ```text
//!            think delay
//!  Thinking ────────────▶ Hungry
//!     ▲                     │ pick up `first`, then `second`
//!     │  put down both      ▼
//!     └──────────────── Eating
//!        after eat delay
//! ```
//!
//! The running signal is checked once per cycle, before thinking. A seat that
//! is already hungry or eating finishes that cycle before it notices a stop.

use std::thread;
use std::time::Instant;
use symposium_events::{SeatId, Status};
use symposium_sync::{ForkGuard, ForkRing, RunningSignal, SeatTable};
use tracing::debug;

use crate::journal::{Journal, JournalEvent};
use crate::order::AcquisitionOrder;
use crate::pacing::SeatPacing;

pub struct Philosopher<'a> {
    order: AcquisitionOrder,
    ring: &'a ForkRing,
    table: &'a SeatTable,
    running: &'a RunningSignal,
    pacing: SeatPacing,
    journal: Option<&'a Journal>,
}

impl<'a> Philosopher<'a> {
    pub fn new(
        seat: SeatId,
        ring: &'a ForkRing,
        table: &'a SeatTable,
        running: &'a RunningSignal,
        pacing: SeatPacing,
    ) -> Self {
        Self {
            order: AcquisitionOrder::for_seat(seat, ring.len()),
            ring,
            table,
            running,
            pacing,
            journal: None,
        }
    }

    pub fn with_journal(mut self, journal: Option<&'a Journal>) -> Self {
        self.journal = journal;
        self
    }

    /// Loops until the running signal is cleared. Returns the number of
    /// meals eaten.
    pub fn run(mut self) -> u64 {
        let seat = self.order.seat;
        debug!(
            seat = seat.0,
            first = self.order.first,
            second = self.order.second,
            "philosopher seated"
        );

        let mut meals = 0u64;
        while self.running.is_running() {
            thread::sleep(self.pacing.think());

            let now = Instant::now();
            self.table.update(seat, |r| r.become_hungry(now));
            self.note_status(Status::Hungry);

            let first = self.pick_up(self.order.first);
            let second = self.pick_up(self.order.second);

            let now = Instant::now();
            self.table.update(seat, |r| r.start_eating(now));
            self.note_status(Status::Eating);

            thread::sleep(self.pacing.eat());

            // Flags are cleared before the forks go down, so no snapshot ever
            // shows two neighbours holding the same fork.
            self.table.update(seat, |r| r.finish_eating());
            self.note_status(Status::Thinking);

            self.put_down(second);
            self.put_down(first);
            meals += 1;
        }

        debug!(seat = seat.0, meals, "philosopher left the table");
        meals
    }

    fn pick_up(&self, fork: usize) -> ForkGuard<'a> {
        let guard = self.ring.acquire(fork, self.order.seat);
        self.note(JournalEvent::ForkAcquired(fork));
        guard
    }

    fn put_down(&self, guard: ForkGuard<'a>) {
        self.note(JournalEvent::ForkReleased(guard.fork()));
        drop(guard);
    }

    fn note_status(&self, status: Status) {
        debug!(seat = self.order.seat.0, %status, "status changed");
        self.note(JournalEvent::StatusChanged(status));
    }

    fn note(&self, event: JournalEvent) {
        if let Some(journal) = self.journal {
            journal.record(self.order.seat, event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pacing::Pacing;
    use std::time::Duration;

    /// A lone seat with the running signal already cleared never picks up a
    /// fork.
    #[test]
    fn stopped_signal_exits_before_the_first_cycle() {
        let ring = ForkRing::new(2);
        let table = SeatTable::new(2);
        let running = RunningSignal::new();
        running.stop();

        let pacing = Pacing::fixed(vec![Duration::from_millis(1)]).for_seat(SeatId(0));
        let meals = Philosopher::new(SeatId(0), &ring, &table, &running, pacing).run();

        assert_eq!(meals, 0);
        assert_eq!(ring.total_acquisitions(), 0);
        assert_eq!(table.record(SeatId(0)).status(), Status::Thinking);
    }

    /// With no competition a single seat eats on every cycle and journals
    /// its forks in ascending order.
    #[test]
    fn uncontended_seat_eats_and_journals_in_order() {
        let ring = ForkRing::new(3);
        let table = SeatTable::new(3);
        let running = RunningSignal::new();
        let journal = Journal::new();
        let pacing = Pacing::fixed(vec![Duration::from_micros(50)]).for_seat(SeatId(2));

        let meals = thread::scope(|s| {
            let p = Philosopher::new(SeatId(2), &ring, &table, &running, pacing)
                .with_journal(Some(&journal));
            let h = s.spawn(move || p.run());
            while table.record(SeatId(2)).meals() < 3 {
                thread::yield_now();
            }
            running.stop();
            h.join().unwrap()
        });

        assert!(meals >= 3);
        assert_eq!(table.record(SeatId(2)).meals(), meals);
        assert_eq!(ring.holder(0), None);
        assert_eq!(ring.holder(2), None);

        let acquired: Vec<usize> = journal
            .entries()
            .iter()
            .filter_map(|e| match e.event {
                JournalEvent::ForkAcquired(f) => Some(f),
                _ => None,
            })
            .collect();
        assert_eq!(acquired.len() as u64, 2 * meals);
        for pair in acquired.chunks(2) {
            // Seat 2 of 3: left fork 2, right fork 0.
            assert_eq!(pair, [0, 2]);
        }
    }
}
