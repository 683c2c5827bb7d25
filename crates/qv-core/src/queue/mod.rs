//! Client-side queue tickets.
//!
//! Joining fabricates a position, queue length and wait estimate per
//! selected service; there is no queue engine behind it.

mod active;
mod selection;
mod ticket;

pub use active::{ActiveQueues, QueueError};
pub use selection::ServiceSelection;
pub use ticket::{QueueTicket, POSITION_RANGE, QUEUE_COUNT_RANGE, WAIT_MINUTES_RANGE};
