//! Repository interfaces for the durable record store.
//!
//! The gate engine is stateless; all mutable state lives behind these
//! traits. The store must serialize concurrent updates per key: `insert`
//! fails when the key already exists, and `update` is a compare-and-set on
//! the record's `version` token. Callers retry on `DomainError::Conflict`.

pub mod block_list;
pub mod ip_reputation;
pub mod phone_risk;

pub use block_list::{BlockListRepository, MockBlockListRepository};
pub use ip_reputation::{IpReputationRepository, MockIpReputationRepository};
pub use phone_risk::{MockPhoneRiskRepository, PhoneRiskRepository};
