//! Domain entities for abuse tracking and blocking.

pub mod blocked_number;
pub mod ip_reputation;
pub mod phone_risk;

pub use blocked_number::BlockedPhoneNumber;
pub use ip_reputation::IpReputationRecord;
pub use phone_risk::PhoneRiskRecord;
