//! Deadlock avoidance by resource ordering.
//!
//! Seat `i` needs fork `i` (left) and fork `(i + 1) mod N` (right). Every seat
//! picks up the lower-indexed of its two forks first. With one global order
//! on forks, no cycle of seats can each hold one fork while waiting for the
//! next, so circular wait and with it deadlock are impossible.
//!
//! Taking "left, then right" everywhere is not equivalent: seat `N - 1`'s
//! right fork is fork 0, seat 0's left fork, which closes the cycle.

use symposium_events::SeatId;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AcquisitionOrder {
    pub seat: SeatId,
    pub left: usize,
    pub right: usize,
    /// Picked up first: `min(left, right)`.
    pub first: usize,
    /// Picked up second: `max(left, right)`.
    pub second: usize,
}

impl AcquisitionOrder {
    pub fn for_seat(seat: SeatId, seats: usize) -> Self {
        let left = seat.left_fork();
        let right = seat.right_fork(seats);
        Self {
            seat,
            left,
            right,
            first: left.min(right),
            second: left.max(right),
        }
    }
}
