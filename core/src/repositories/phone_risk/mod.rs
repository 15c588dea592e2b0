//! Phone risk record repository module.

mod r#trait;
pub use r#trait::PhoneRiskRepository;

mod mock;
pub use mock::MockPhoneRiskRepository;

#[cfg(test)]
mod tests;
