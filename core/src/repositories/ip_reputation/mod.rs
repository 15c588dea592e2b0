//! IP reputation record repository module.

mod r#trait;
pub use r#trait::IpReputationRepository;

mod mock;
pub use mock::MockIpReputationRepository;

#[cfg(test)]
mod tests;
