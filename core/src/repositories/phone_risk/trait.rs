//! Phone risk repository trait defining the interface for tracking-record
//! persistence.
//!
//! Implementations must provide per-key atomicity: two concurrent
//! read-modify-write cycles over the same phone number must not both
//! succeed against the same base version.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::entities::phone_risk::PhoneRiskRecord;
use crate::errors::DomainError;

/// Repository trait for `PhoneRiskRecord` persistence operations.
///
/// Exactly one record exists per phone number. Creation races surface as
/// `DomainError::Conflict` from `insert`; stale writes surface as
/// `DomainError::Conflict` from `update`. Callers are expected to re-read
/// and retry.
#[async_trait]
pub trait PhoneRiskRepository: Send + Sync {
    /// Find the tracking record for a phone number.
    ///
    /// # Returns
    /// * `Ok(Some(record))` - Record found
    /// * `Ok(None)` - The number has never been seen
    /// * `Err(DomainError)` - Store error
    async fn find_by_phone(
        &self,
        phone_number: &str,
    ) -> Result<Option<PhoneRiskRecord>, DomainError>;

    /// Insert the record for a number seen for the first time.
    ///
    /// # Returns
    /// * `Ok(record)` - The persisted record
    /// * `Err(DomainError::Conflict)` - A concurrent request created the
    ///   row first; re-read and update instead
    async fn insert(&self, record: PhoneRiskRecord) -> Result<PhoneRiskRecord, DomainError>;

    /// Update an existing record, compare-and-set on `record.version`.
    ///
    /// # Returns
    /// * `Ok(record)` - The persisted record with its version advanced
    /// * `Err(DomainError::Conflict)` - The stored version differs from
    ///   `record.version` (lost race) or the row disappeared; re-read and
    ///   retry
    async fn update(&self, record: PhoneRiskRecord) -> Result<PhoneRiskRecord, DomainError>;

    /// Atomically clear the block fields (`is_blocked`, `block_reason`,
    /// `blocked_until`) on a record, leaving all counters intact.
    ///
    /// # Returns
    /// * `Ok(true)` - A record existed and was cleared
    /// * `Ok(false)` - No record for that number
    async fn clear_block(&self, phone_number: &str) -> Result<bool, DomainError>;

    /// Delete records whose `last_attempt_at` is older than `cutoff`.
    /// Used by the maintenance sweeper only.
    ///
    /// # Returns
    /// The number of rows deleted.
    async fn delete_older_than(&self, cutoff: DateTime<Utc>) -> Result<u64, DomainError>;
}
