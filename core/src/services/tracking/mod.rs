//! Abuse trackers owning the per-phone-number and per-IP records.
//!
//! Both trackers run their read-modify-write cycles inside a bounded
//! optimistic-concurrency retry loop so concurrent requests for the same
//! key never lose updates.

mod ip_tracker;
mod phone_tracker;

#[cfg(test)]
mod tests;

pub use ip_tracker::IpReputationTracker;
pub use phone_tracker::PhoneRiskTracker;

/// Contended writes are retried this many times before giving up. Each
/// lost race means another writer committed, so a writer contending with
/// N-1 peers needs at most N-1 retries.
pub(crate) const MAX_WRITE_RETRIES: usize = 16;
