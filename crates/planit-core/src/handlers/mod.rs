//! Screen-level actions over the current user's data.
//!
//! Each board keeps the last list fetched from the server and refetches
//! after every successful mutation.

pub mod calendar;
pub mod tasks;

pub use calendar::CalendarBoard;
pub use tasks::TaskBoard;
