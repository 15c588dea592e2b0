//! Mock implementation of PhoneRiskRepository for testing

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::entities::phone_risk::PhoneRiskRecord;
use crate::errors::DomainError;

use super::r#trait::PhoneRiskRepository;

/// In-memory phone risk repository. Enforces the same per-key atomicity
/// contract as a real store: inserts fail on existing keys and updates are
/// compare-and-set on the record version, all under one write lock.
pub struct MockPhoneRiskRepository {
    records: Arc<RwLock<HashMap<String, PhoneRiskRecord>>>,
}

impl MockPhoneRiskRepository {
    /// Create a new mock repository
    pub fn new() -> Self {
        Self {
            records: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Number of records currently stored (test helper)
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    /// Whether the store is empty (test helper)
    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

impl Default for MockPhoneRiskRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PhoneRiskRepository for MockPhoneRiskRepository {
    async fn find_by_phone(
        &self,
        phone_number: &str,
    ) -> Result<Option<PhoneRiskRecord>, DomainError> {
        let records = self.records.read().await;
        Ok(records.get(phone_number).cloned())
    }

    async fn insert(&self, record: PhoneRiskRecord) -> Result<PhoneRiskRecord, DomainError> {
        let mut records = self.records.write().await;

        if records.contains_key(&record.phone_number) {
            return Err(DomainError::Conflict {
                resource: format!("phone_risk:{}", record.phone_number),
            });
        }

        records.insert(record.phone_number.clone(), record.clone());
        Ok(record)
    }

    async fn update(&self, mut record: PhoneRiskRecord) -> Result<PhoneRiskRecord, DomainError> {
        let mut records = self.records.write().await;

        match records.get(&record.phone_number) {
            Some(stored) if stored.version == record.version => {
                record.version += 1;
                records.insert(record.phone_number.clone(), record.clone());
                Ok(record)
            }
            _ => Err(DomainError::Conflict {
                resource: format!("phone_risk:{}", record.phone_number),
            }),
        }
    }

    async fn clear_block(&self, phone_number: &str) -> Result<bool, DomainError> {
        let mut records = self.records.write().await;

        match records.get_mut(phone_number) {
            Some(record) => {
                record.clear_block();
                record.version += 1;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete_older_than(&self, cutoff: DateTime<Utc>) -> Result<u64, DomainError> {
        let mut records = self.records.write().await;
        let before = records.len();
        records.retain(|_, record| record.last_attempt_at >= cutoff);
        Ok((before - records.len()) as u64)
    }
}
