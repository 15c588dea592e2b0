//! Maintenance sweeper for stale tracking records.

mod sweeper;


pub use sweeper::{CleanupResult, RecordSweeper, SweeperConfig};
