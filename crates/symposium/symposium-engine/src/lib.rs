mod controller;
mod journal;
mod order;
mod pacing;
mod philosopher;
mod summary;

pub use controller::Simulation;
pub use journal::{Journal, JournalEntry, JournalEvent};
pub use order::AcquisitionOrder;
pub use pacing::{Pacing, SeatPacing};
pub use philosopher::Philosopher;
pub use summary::{RunSummary, SeatSummary};

pub use symposium_sync::{ForkRing, RunningSignal, SeatTable};
