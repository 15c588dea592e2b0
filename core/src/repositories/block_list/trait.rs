//! Permanent block list repository trait.

use async_trait::async_trait;

use crate::domain::entities::blocked_number::BlockedPhoneNumber;
use crate::errors::DomainError;

/// Repository trait for the administrator-controlled permanent block list.
#[async_trait]
pub trait BlockListRepository: Send + Sync {
    /// Look up a phone number in the permanent block list.
    async fn find_by_phone(
        &self,
        phone_number: &str,
    ) -> Result<Option<BlockedPhoneNumber>, DomainError>;

    /// Insert a new block-list entry.
    ///
    /// # Returns
    /// * `Err(DomainError::Conflict)` - The number is already listed. The
    ///   duplicate is surfaced to the caller, not silently ignored; an
    ///   administrator repeating a block should learn it already exists.
    async fn insert(&self, entry: BlockedPhoneNumber)
        -> Result<BlockedPhoneNumber, DomainError>;

    /// Remove a phone number from the permanent block list.
    ///
    /// # Returns
    /// * `Ok(true)` - An entry existed and was removed
    /// * `Ok(false)` - The number was not listed
    async fn remove(&self, phone_number: &str) -> Result<bool, DomainError>;
}
