//! Mock implementation of IpReputationRepository for testing

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::entities::ip_reputation::IpReputationRecord;
use crate::errors::DomainError;

use super::r#trait::IpReputationRepository;

/// In-memory IP reputation repository with the same compare-and-set
/// contract as the real store.
pub struct MockIpReputationRepository {
    records: Arc<RwLock<HashMap<String, IpReputationRecord>>>,
}

impl MockIpReputationRepository {
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
}

impl Default for MockIpReputationRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl IpReputationRepository for MockIpReputationRepository {
    async fn find_by_ip(
        &self,
        ip_address: &str,
    ) -> Result<Option<IpReputationRecord>, DomainError> {
        let records = self.records.read().await;
        Ok(records.get(ip_address).cloned())
    }

    async fn insert(
        &self,
        record: IpReputationRecord,
    ) -> Result<IpReputationRecord, DomainError> {
        let mut records = self.records.write().await;

        if records.contains_key(&record.ip_address) {
            return Err(DomainError::Conflict {
                resource: format!("ip_reputation:{}", record.ip_address),
            });
        }

        records.insert(record.ip_address.clone(), record.clone());
        Ok(record)
    }

    async fn update(
        &self,
        mut record: IpReputationRecord,
    ) -> Result<IpReputationRecord, DomainError> {
        let mut records = self.records.write().await;

        match records.get(&record.ip_address) {
            Some(stored) if stored.version == record.version => {
                record.version += 1;
                records.insert(record.ip_address.clone(), record.clone());
                Ok(record)
            }
            _ => Err(DomainError::Conflict {
                resource: format!("ip_reputation:{}", record.ip_address),
            }),
        }
    }

    async fn delete_older_than(&self, cutoff: DateTime<Utc>) -> Result<u64, DomainError> {
        let mut records = self.records.write().await;
        let before = records.len();
        records.retain(|_, record| record.last_seen_at >= cutoff);
        Ok((before - records.len()) as u64)
    }
}
