//! MySQL implementation of the PhoneRiskRepository trait.
//!
//! One row per phone number in `phone_risk_records`. Updates are
//! compare-and-set on the `version` column: the trackers re-read and retry
//! when a concurrent request won the race, so no increment is ever lost.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row};

use og_core::domain::entities::phone_risk::PhoneRiskRecord;
use og_core::errors::DomainError;
use og_core::repositories::phone_risk::PhoneRiskRepository;

use super::{column_error, is_unique_violation, query_error};

/// MySQL implementation of PhoneRiskRepository
pub struct MySqlPhoneRiskRepository {
    /// Database connection pool
    pool: MySqlPool,
}

impl MySqlPhoneRiskRepository {
    /// Create a new MySQL phone risk repository
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Convert a database row to a PhoneRiskRecord entity
    fn row_to_record(row: &sqlx::mysql::MySqlRow) -> Result<PhoneRiskRecord, DomainError> {
        Ok(PhoneRiskRecord {
            phone_number: row
                .try_get("phone_number")
                .map_err(|e| column_error("phone_number", e))?,
            last_ip: row.try_get("last_ip").map_err(|e| column_error("last_ip", e))?,
            last_user_agent: row
                .try_get("last_user_agent")
                .map_err(|e| column_error("last_user_agent", e))?,
            attempt_count: row
                .try_get("attempt_count")
                .map_err(|e| column_error("attempt_count", e))?,
            first_attempt_at: row
                .try_get("first_attempt_at")
                .map_err(|e| column_error("first_attempt_at", e))?,
            last_attempt_at: row
                .try_get("last_attempt_at")
                .map_err(|e| column_error("last_attempt_at", e))?,
            is_blocked: row
                .try_get("is_blocked")
                .map_err(|e| column_error("is_blocked", e))?,
            block_reason: row
                .try_get("block_reason")
                .map_err(|e| column_error("block_reason", e))?,
            blocked_until: row
                .try_get("blocked_until")
                .map_err(|e| column_error("blocked_until", e))?,
            attempts_last_hour: row
                .try_get("attempts_last_hour")
                .map_err(|e| column_error("attempts_last_hour", e))?,
            attempts_last_day: row
                .try_get("attempts_last_day")
                .map_err(|e| column_error("attempts_last_day", e))?,
            distinct_ip_count: row
                .try_get("distinct_ip_count")
                .map_err(|e| column_error("distinct_ip_count", e))?,
            velocity_score: row
                .try_get("velocity_score")
                .map_err(|e| column_error("velocity_score", e))?,
            pattern_score: row
                .try_get("pattern_score")
                .map_err(|e| column_error("pattern_score", e))?,
            total_risk_score: row
                .try_get("total_risk_score")
                .map_err(|e| column_error("total_risk_score", e))?,
            version: row.try_get("version").map_err(|e| column_error("version", e))?,
        })
    }
}

#[async_trait]
impl PhoneRiskRepository for MySqlPhoneRiskRepository {
    async fn find_by_phone(
        &self,
        phone_number: &str,
    ) -> Result<Option<PhoneRiskRecord>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT phone_number, last_ip, last_user_agent, attempt_count,
                   first_attempt_at, last_attempt_at, is_blocked, block_reason,
                   blocked_until, attempts_last_hour, attempts_last_day,
                   distinct_ip_count, velocity_score, pattern_score,
                   total_risk_score, version
            FROM phone_risk_records
            WHERE phone_number = ?
            "#,
        )
        .bind(phone_number)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| query_error("Failed to load phone risk record", e))?;

        row.as_ref().map(Self::row_to_record).transpose()
    }

    async fn insert(&self, record: PhoneRiskRecord) -> Result<PhoneRiskRecord, DomainError> {
        let result = sqlx::query(
            r#"
            INSERT INTO phone_risk_records (
                phone_number, last_ip, last_user_agent, attempt_count,
                first_attempt_at, last_attempt_at, is_blocked, block_reason,
                blocked_until, attempts_last_hour, attempts_last_day,
                distinct_ip_count, velocity_score, pattern_score,
                total_risk_score, version
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&record.phone_number)
        .bind(&record.last_ip)
        .bind(&record.last_user_agent)
        .bind(record.attempt_count)
        .bind(record.first_attempt_at)
        .bind(record.last_attempt_at)
        .bind(record.is_blocked)
        .bind(&record.block_reason)
        .bind(record.blocked_until)
        .bind(record.attempts_last_hour)
        .bind(record.attempts_last_day)
        .bind(record.distinct_ip_count)
        .bind(record.velocity_score)
        .bind(record.pattern_score)
        .bind(record.total_risk_score)
        .bind(record.version)
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(record),
            Err(e) if is_unique_violation(&e) => Err(DomainError::Conflict {
                resource: format!("phone_risk:{}", record.phone_number),
            }),
            Err(e) => Err(query_error("Failed to insert phone risk record", e)),
        }
    }

    async fn update(&self, mut record: PhoneRiskRecord) -> Result<PhoneRiskRecord, DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE phone_risk_records
            SET last_ip = ?, last_user_agent = ?, attempt_count = ?,
                first_attempt_at = ?, last_attempt_at = ?, is_blocked = ?,
                block_reason = ?, blocked_until = ?, attempts_last_hour = ?,
                attempts_last_day = ?, distinct_ip_count = ?,
                velocity_score = ?, pattern_score = ?, total_risk_score = ?,
                version = version + 1
            WHERE phone_number = ? AND version = ?
            "#,
        )
        .bind(&record.last_ip)
        .bind(&record.last_user_agent)
        .bind(record.attempt_count)
        .bind(record.first_attempt_at)
        .bind(record.last_attempt_at)
        .bind(record.is_blocked)
        .bind(&record.block_reason)
        .bind(record.blocked_until)
        .bind(record.attempts_last_hour)
        .bind(record.attempts_last_day)
        .bind(record.distinct_ip_count)
        .bind(record.velocity_score)
        .bind(record.pattern_score)
        .bind(record.total_risk_score)
        .bind(&record.phone_number)
        .bind(record.version)
        .execute(&self.pool)
        .await
        .map_err(|e| query_error("Failed to update phone risk record", e))?;

        if result.rows_affected() == 0 {
            // Lost the race: the stored version moved on (or the row was
            // swept); the caller re-reads and retries
            return Err(DomainError::Conflict {
                resource: format!("phone_risk:{}", record.phone_number),
            });
        }

        record.version += 1;
        Ok(record)
    }

    async fn clear_block(&self, phone_number: &str) -> Result<bool, DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE phone_risk_records
            SET is_blocked = FALSE, block_reason = NULL, blocked_until = NULL,
                version = version + 1
            WHERE phone_number = ?
            "#,
        )
        .bind(phone_number)
        .execute(&self.pool)
        .await
        .map_err(|e| query_error("Failed to clear block on phone risk record", e))?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_older_than(&self, cutoff: DateTime<Utc>) -> Result<u64, DomainError> {
        let result = sqlx::query("DELETE FROM phone_risk_records WHERE last_attempt_at < ?")
            .bind(cutoff)
            .execute(&self.pool)
            .await
            .map_err(|e| query_error("Failed to delete stale phone risk records", e))?;

        Ok(result.rows_affected())
    }
}
