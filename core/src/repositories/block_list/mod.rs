//! Permanent block list repository module.

mod r#trait;
pub use r#trait::BlockListRepository;

mod mock;
pub use mock::MockBlockListRepository;

#[cfg(test)]
mod tests;
