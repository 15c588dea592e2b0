//! IP reputation repository trait.
//!
//! Same per-key atomicity contract as the phone-side repository: `insert`
//! conflicts on an existing key, `update` is a compare-and-set on
//! `record.version`.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::entities::ip_reputation::IpReputationRecord;
use crate::errors::DomainError;

/// Repository trait for `IpReputationRecord` persistence operations.
#[async_trait]
pub trait IpReputationRepository: Send + Sync {
    /// Find the reputation record for an IP address.
    async fn find_by_ip(&self, ip_address: &str)
        -> Result<Option<IpReputationRecord>, DomainError>;

    /// Insert the record for an IP seen for the first time.
    ///
    /// # Returns
    /// * `Err(DomainError::Conflict)` - A concurrent request created the
    ///   row first; re-read and update instead
    async fn insert(&self, record: IpReputationRecord)
        -> Result<IpReputationRecord, DomainError>;

    /// Update an existing record, compare-and-set on `record.version`.
    ///
    /// # Returns
    /// * `Err(DomainError::Conflict)` - Lost race; re-read and retry
    async fn update(&self, record: IpReputationRecord)
        -> Result<IpReputationRecord, DomainError>;

    /// Delete records whose `last_seen_at` is older than `cutoff`.
    /// Used by the maintenance sweeper only.
    async fn delete_older_than(&self, cutoff: DateTime<Utc>) -> Result<u64, DomainError>;
}
