pub mod seat;
pub mod snapshot;
pub use seat::{SeatId, SeatRecord, Status};
pub use snapshot::{SeatView, StateSnapshot};
