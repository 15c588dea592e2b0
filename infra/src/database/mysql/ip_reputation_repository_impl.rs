//! MySQL implementation of the IpReputationRepository trait.
//!
//! The attempted-phone set is stored as a JSON column; it stays small in
//! practice because the sweeper prunes idle IPs.

use std::collections::HashSet;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row};

use og_core::domain::entities::ip_reputation::IpReputationRecord;
use og_core::errors::DomainError;
use og_core::repositories::ip_reputation::IpReputationRepository;

use super::{column_error, is_unique_violation, query_error};

/// MySQL implementation of IpReputationRepository
pub struct MySqlIpReputationRepository {
    /// Database connection pool
    pool: MySqlPool,
}

impl MySqlIpReputationRepository {
    /// Create a new MySQL IP reputation repository
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Convert a database row to an IpReputationRecord entity
    fn row_to_record(row: &sqlx::mysql::MySqlRow) -> Result<IpReputationRecord, DomainError> {
        let phones_json: String = row
            .try_get("phone_numbers_attempted")
            .map_err(|e| column_error("phone_numbers_attempted", e))?;
        let phone_numbers_attempted: HashSet<String> = serde_json::from_str(&phones_json)
            .map_err(|e| DomainError::Internal {
                message: format!("Invalid attempted-phone set: {}", e),
            })?;

        Ok(IpReputationRecord {
            ip_address: row
                .try_get("ip_address")
                .map_err(|e| column_error("ip_address", e))?,
            phone_numbers_attempted,
            total_attempts: row
                .try_get("total_attempts")
                .map_err(|e| column_error("total_attempts", e))?,
            first_seen_at: row
                .try_get("first_seen_at")
                .map_err(|e| column_error("first_seen_at", e))?,
            last_seen_at: row
                .try_get("last_seen_at")
                .map_err(|e| column_error("last_seen_at", e))?,
            risk_score: row
                .try_get("risk_score")
                .map_err(|e| column_error("risk_score", e))?,
            is_blocked: row
                .try_get("is_blocked")
                .map_err(|e| column_error("is_blocked", e))?,
            version: row.try_get("version").map_err(|e| column_error("version", e))?,
        })
    }

    fn phones_to_json(record: &IpReputationRecord) -> Result<String, DomainError> {
        serde_json::to_string(&record.phone_numbers_attempted).map_err(|e| {
            DomainError::Internal {
                message: format!("Failed to serialize attempted-phone set: {}", e),
            }
        })
    }
}

#[async_trait]
impl IpReputationRepository for MySqlIpReputationRepository {
    async fn find_by_ip(
        &self,
        ip_address: &str,
    ) -> Result<Option<IpReputationRecord>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT ip_address, phone_numbers_attempted, total_attempts,
                   first_seen_at, last_seen_at, risk_score, is_blocked, version
            FROM ip_reputation_records
            WHERE ip_address = ?
            "#,
        )
        .bind(ip_address)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| query_error("Failed to load ip reputation record", e))?;

        row.as_ref().map(Self::row_to_record).transpose()
    }

    async fn insert(
        &self,
        record: IpReputationRecord,
    ) -> Result<IpReputationRecord, DomainError> {
        let phones_json = Self::phones_to_json(&record)?;

        let result = sqlx::query(
            r#"
            INSERT INTO ip_reputation_records (
                ip_address, phone_numbers_attempted, total_attempts,
                first_seen_at, last_seen_at, risk_score, is_blocked, version
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&record.ip_address)
        .bind(&phones_json)
        .bind(record.total_attempts)
        .bind(record.first_seen_at)
        .bind(record.last_seen_at)
        .bind(record.risk_score)
        .bind(record.is_blocked)
        .bind(record.version)
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(record),
            Err(e) if is_unique_violation(&e) => Err(DomainError::Conflict {
                resource: format!("ip_reputation:{}", record.ip_address),
            }),
            Err(e) => Err(query_error("Failed to insert ip reputation record", e)),
        }
    }

    async fn update(
        &self,
        mut record: IpReputationRecord,
    ) -> Result<IpReputationRecord, DomainError> {
        let phones_json = Self::phones_to_json(&record)?;

        let result = sqlx::query(
            r#"
            UPDATE ip_reputation_records
            SET phone_numbers_attempted = ?, total_attempts = ?,
                first_seen_at = ?, last_seen_at = ?, risk_score = ?,
                is_blocked = ?, version = version + 1
            WHERE ip_address = ? AND version = ?
            "#,
        )
        .bind(&phones_json)
        .bind(record.total_attempts)
        .bind(record.first_seen_at)
        .bind(record.last_seen_at)
        .bind(record.risk_score)
        .bind(record.is_blocked)
        .bind(&record.ip_address)
        .bind(record.version)
        .execute(&self.pool)
        .await
        .map_err(|e| query_error("Failed to update ip reputation record", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::Conflict {
                resource: format!("ip_reputation:{}", record.ip_address),
            });
        }

        record.version += 1;
        Ok(record)
    }

    async fn delete_older_than(&self, cutoff: DateTime<Utc>) -> Result<u64, DomainError> {
        let result = sqlx::query("DELETE FROM ip_reputation_records WHERE last_seen_at < ?")
            .bind(cutoff)
            .execute(&self.pool)
            .await
            .map_err(|e| query_error("Failed to delete stale ip reputation records", e))?;

        Ok(result.rows_affected())
    }
}
