//! Shared helpers: fast configurations and a journal replayer that checks
//! the safety properties of a finished run.

#![allow(dead_code)]

use std::time::Duration;
use symposium_config::{DelayRange, SimulationConfig};
use symposium_engine::{AcquisitionOrder, JournalEntry, JournalEvent};
use symposium_events::{SeatId, Status};

/// Delays of 0.1..=1 ms, an early stop after `meals` meals per seat, and a
/// generous cap on the wall-clock duration.
pub fn fast_config(seats: usize, meals: u64) -> SimulationConfig {
    SimulationConfig::builder(seats)
        .duration(Duration::from_secs(30))
        .tick(Duration::from_micros(10))
        .think(DelayRange::new(10, 100))
        .eat(DelayRange::new(10, 100))
        .report_interval(Duration::from_millis(5))
        .seed(Some(0xD1_4E))
        .meals_per_seat(Some(meals))
        .build()
        .expect("valid config")
}

/// Replays `entries` and panics on the first entry that breaks:
/// - mutual exclusion (a fork taken while someone else holds it),
/// - acquisition order (anything but `first` then `second`),
/// - transitions (anything but Thinking -> Hungry -> Eating -> Thinking),
/// - holding iff eating (forks held outside a Hungry..Thinking window).
pub fn replay(entries: &[JournalEntry], seats: usize) -> ReplayStats {
    let mut holder: Vec<Option<SeatId>> = vec![None; seats];
    let mut status = vec![Status::Thinking; seats];
    let mut held: Vec<Vec<usize>> = vec![Vec::new(); seats];
    let mut stats = ReplayStats {
        meals: vec![0; seats],
        acquisitions: 0,
    };

    for (i, e) in entries.iter().enumerate() {
        assert_eq!(e.seq, i as u64, "journal has gaps");
        let s = e.seat.0;
        match e.event {
            JournalEvent::ForkAcquired(fork) => {
                assert_eq!(
                    holder[fork], None,
                    "seq {}: {} took fork {fork} held by {:?}",
                    e.seq, e.seat, holder[fork]
                );
                assert_eq!(status[s], Status::Hungry, "seq {}: {} took a fork while {:?}", e.seq, e.seat, status[s]);

                let order = AcquisitionOrder::for_seat(e.seat, seats);
                let expected = match held[s].len() {
                    0 => order.first,
                    1 => order.second,
                    n => panic!("seq {}: {} already holds {n} forks", e.seq, e.seat),
                };
                assert_eq!(fork, expected, "seq {}: {} broke the acquisition order", e.seq, e.seat);

                holder[fork] = Some(e.seat);
                held[s].push(fork);
                stats.acquisitions += 1;
            }
            JournalEvent::ForkReleased(fork) => {
                assert_eq!(holder[fork], Some(e.seat), "seq {}: {} released fork {fork} it does not hold", e.seq, e.seat);
                holder[fork] = None;
                held[s].retain(|&f| f != fork);
            }
            JournalEvent::StatusChanged(next) => {
                assert_eq!(next, status[s].next(), "seq {}: {} went {:?} -> {next:?}", e.seq, e.seat, status[s]);
                match next {
                    Status::Hungry => assert!(held[s].is_empty()),
                    Status::Eating => assert_eq!(held[s].len(), 2),
                    // Forks are still in hand; they go down right after.
                    Status::Thinking => {
                        assert_eq!(held[s].len(), 2);
                        stats.meals[s] += 1;
                    }
                }
                status[s] = next;
            }
        }
    }

    assert!(holder.iter().all(Option::is_none), "forks still held at the end: {holder:?}");
    assert!(status.iter().all(|&st| st == Status::Thinking), "seats not back to thinking: {status:?}");
    stats
}

#[derive(Debug)]
pub struct ReplayStats {
    pub meals: Vec<u64>,
    pub acquisitions: u64,
}
