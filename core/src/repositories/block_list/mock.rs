//! Mock implementation of BlockListRepository for testing

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::entities::blocked_number::BlockedPhoneNumber;
use crate::errors::DomainError;

use super::r#trait::BlockListRepository;

/// In-memory permanent block list.
pub struct MockBlockListRepository {
    entries: Arc<RwLock<HashMap<String, BlockedPhoneNumber>>>,
}

impl MockBlockListRepository {
    /// Create a new mock repository
    pub fn new() -> Self {
        Self {
            entries: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

impl Default for MockBlockListRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BlockListRepository for MockBlockListRepository {
    async fn find_by_phone(
        &self,
        phone_number: &str,
    ) -> Result<Option<BlockedPhoneNumber>, DomainError> {
        let entries = self.entries.read().await;
        Ok(entries.get(phone_number).cloned())
    }

    async fn insert(
        &self,
        entry: BlockedPhoneNumber,
    ) -> Result<BlockedPhoneNumber, DomainError> {
        let mut entries = self.entries.write().await;

        if entries.contains_key(&entry.phone_number) {
            return Err(DomainError::Conflict {
                resource: format!("block_list:{}", entry.phone_number),
            });
        }

        entries.insert(entry.phone_number.clone(), entry.clone());
        Ok(entry)
    }

    async fn remove(&self, phone_number: &str) -> Result<bool, DomainError> {
        let mut entries = self.entries.write().await;
        Ok(entries.remove(phone_number).is_some())
    }
}
