mod fork_ring;
mod seat_table;
mod signal;
mod spin_lock;

pub use fork_ring::{ForkGuard, ForkRing};
pub use seat_table::SeatTable;
pub use signal::RunningSignal;
pub use spin_lock::{RawSpinLock, SpinGuard, SpinLock};
