#![forbid(unsafe_code)]

use serde::Serialize;
use std::fmt;
use std::time::{Duration, Instant};

// SeatId doubles as the philosopher id and as the index of its left fork.
// repr(transparent) keeps it layout-identical to usize so it can index the
// ring and the table directly.
#[repr(transparent)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize)]
pub struct SeatId(pub usize);

impl SeatId {
    /// Index of the fork on this seat's left.
    #[inline]
    pub fn left_fork(self) -> usize {
        self.0
    }

    /// Index of the fork on this seat's right in a ring of `seats` forks.
    #[inline]
    pub fn right_fork(self, seats: usize) -> usize {
        (self.0 + 1) % seats
    }
}

impl fmt::Display for SeatId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P{}", self.0)
    }
}

/// Observable life-cycle status of a philosopher.
///
/// The set is closed: there is no fallback variant. A seat only ever moves
/// Thinking -> Hungry -> Eating -> Thinking.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum Status {
    Thinking,
    Hungry,
    Eating,
}

impl Status {
    /// The only status a seat may move to from `self`.
    pub fn next(self) -> Status {
        match self {
            Status::Thinking => Status::Hungry,
            Status::Hungry => Status::Eating,
            Status::Eating => Status::Thinking,
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Status::Thinking => "thinking",
            Status::Hungry => "hungry",
            Status::Eating => "eating",
        };
        f.write_str(s)
    }
}

// The hungry timestamp lives inside the Hungry variant so it cannot be read
// in any other phase.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Phase {
    Thinking,
    Hungry { since: Instant },
    Eating,
}

/// One philosopher's observable state, owned by the seat table.
///
/// Holding flags are not stored: a seat holds both of its forks exactly while
/// it is Eating, so the flags are derived from the phase and can never
/// disagree with it.
#[derive(Clone, Debug)]
pub struct SeatRecord {
    seat: SeatId,
    phase: Phase,
    /// Completed Eating phases.
    meals: u64,
    /// Longest time spent Hungry before getting both forks.
    longest_wait: Duration,
}

impl SeatRecord {
    pub fn new(seat: SeatId) -> Self {
        Self {
            seat,
            phase: Phase::Thinking,
            meals: 0,
            longest_wait: Duration::ZERO,
        }
    }

    pub fn seat(&self) -> SeatId {
        self.seat
    }

    pub fn status(&self) -> Status {
        match self.phase {
            Phase::Thinking => Status::Thinking,
            Phase::Hungry { .. } => Status::Hungry,
            Phase::Eating => Status::Eating,
        }
    }

    /// When the seat became hungry; `None` unless the status is Hungry.
    pub fn hungry_since(&self) -> Option<Instant> {
        match self.phase {
            Phase::Hungry { since } => Some(since),
            _ => None,
        }
    }

    pub fn holding_left(&self) -> bool {
        self.phase == Phase::Eating
    }

    pub fn holding_right(&self) -> bool {
        self.phase == Phase::Eating
    }

    pub fn meals(&self) -> u64 {
        self.meals
    }

    pub fn longest_wait(&self) -> Duration {
        self.longest_wait
    }

    /// Thinking -> Hungry.
    pub fn become_hungry(&mut self, now: Instant) {
        debug_assert_eq!(self.status(), Status::Thinking, "{} skipped Thinking", self.seat);
        self.phase = Phase::Hungry { since: now };
    }

    /// Hungry -> Eating. Must only be called once both forks are held.
    pub fn start_eating(&mut self, now: Instant) {
        debug_assert_eq!(self.status(), Status::Hungry, "{} skipped Hungry", self.seat);
        if let Phase::Hungry { since } = self.phase {
            self.longest_wait = self.longest_wait.max(now.saturating_duration_since(since));
        }
        self.phase = Phase::Eating;
    }

    /// Eating -> Thinking. Must be called before the forks are put down.
    pub fn finish_eating(&mut self) {
        debug_assert_eq!(self.status(), Status::Eating, "{} skipped Eating", self.seat);
        self.phase = Phase::Thinking;
        self.meals += 1;
    }
}
