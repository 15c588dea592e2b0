//! Administrator-controlled permanent block list manager.

use std::sync::Arc;

use tracing::info;

use og_shared::utils::phone::mask_phone_number;

use crate::domain::entities::blocked_number::BlockedPhoneNumber;
use crate::errors::DomainResult;
use crate::repositories::block_list::BlockListRepository;
use crate::repositories::phone_risk::PhoneRiskRepository;

/// Owns the permanent phone block list. Presence in the list is an
/// absolute veto checked before any scoring. Unblocking also clears the
/// block fields on the tracking record so the number is immediately
/// admissible again, while its counters and scores are preserved.
pub struct BlockListService<B: BlockListRepository, P: PhoneRiskRepository> {
    block_list: Arc<B>,
    phone_risk: Arc<P>,
}

impl<B: BlockListRepository, P: PhoneRiskRepository> BlockListService<B, P> {
    /// Create a new block list service.
    pub fn new(block_list: Arc<B>, phone_risk: Arc<P>) -> Self {
        Self {
            block_list,
            phone_risk,
        }
    }

    /// Look up a phone number in the permanent list.
    pub async fn is_phone_blocked(
        &self,
        phone_number: &str,
    ) -> DomainResult<Option<BlockedPhoneNumber>> {
        self.block_list.find_by_phone(phone_number).await
    }

    /// Insert a phone number into the permanent list. A duplicate insert
    /// surfaces as `DomainError::Conflict`; administrative actions never
    /// silently no-op.
    pub async fn block_phone(
        &self,
        phone_number: &str,
        reason: &str,
        blocked_by: &str,
    ) -> DomainResult<BlockedPhoneNumber> {
        let entry = self
            .block_list
            .insert(BlockedPhoneNumber::new(phone_number, reason, blocked_by))
            .await?;

        info!(
            phone = %mask_phone_number(phone_number),
            blocked_by = blocked_by,
            reason = reason,
            "phone number added to permanent block list"
        );

        Ok(entry)
    }

    /// Remove a phone number from the permanent list and clear any block
    /// fields on its tracking record. Counters and scores are untouched, so
    /// a repeat offender's history is preserved. Idempotent: unblocking a
    /// number that is not blocked anywhere succeeds quietly.
    pub async fn unblock_phone(&self, phone_number: &str) -> DomainResult<()> {
        let removed_from_list = self.block_list.remove(phone_number).await?;
        let cleared_tracking_block = self.phone_risk.clear_block(phone_number).await?;

        info!(
            phone = %mask_phone_number(phone_number),
            removed_from_list = removed_from_list,
            cleared_tracking_block = cleared_tracking_block,
            "phone number unblocked"
        );

        Ok(())
    }
}
