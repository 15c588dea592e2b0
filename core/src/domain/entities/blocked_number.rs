//! Administrator-controlled permanent phone-number block list entry.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A permanently blocked phone number. Presence in the block list is an
/// absolute veto that bypasses all scoring; only an administrator removes
/// an entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockedPhoneNumber {
    /// Phone number in E.164 format (list key)
    pub phone_number: String,

    /// Why the number was blocked
    pub block_reason: String,

    /// Administrator identity that placed the block
    pub blocked_by: String,

    /// When the block was placed
    pub blocked_at: DateTime<Utc>,
}

impl BlockedPhoneNumber {
    /// Creates a new block-list entry stamped with the current time.
    pub fn new(
        phone_number: impl Into<String>,
        block_reason: impl Into<String>,
        blocked_by: impl Into<String>,
    ) -> Self {
        Self {
            phone_number: phone_number.into(),
            block_reason: block_reason.into(),
            blocked_by: blocked_by.into(),
            blocked_at: Utc::now(),
        }
    }
}
