//! MySQL implementation of the BlockListRepository trait.

use async_trait::async_trait;
use sqlx::{MySqlPool, Row};

use og_core::domain::entities::blocked_number::BlockedPhoneNumber;
use og_core::errors::DomainError;
use og_core::repositories::block_list::BlockListRepository;

use super::{column_error, is_unique_violation, query_error};

/// MySQL implementation of BlockListRepository
pub struct MySqlBlockListRepository {
    /// Database connection pool
    pool: MySqlPool,
}

impl MySqlBlockListRepository {
    /// Create a new MySQL block list repository
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Convert a database row to a BlockedPhoneNumber entity
    fn row_to_entry(row: &sqlx::mysql::MySqlRow) -> Result<BlockedPhoneNumber, DomainError> {
        Ok(BlockedPhoneNumber {
            phone_number: row
                .try_get("phone_number")
                .map_err(|e| column_error("phone_number", e))?,
            block_reason: row
                .try_get("block_reason")
                .map_err(|e| column_error("block_reason", e))?,
            blocked_by: row
                .try_get("blocked_by")
                .map_err(|e| column_error("blocked_by", e))?,
            blocked_at: row
                .try_get("blocked_at")
                .map_err(|e| column_error("blocked_at", e))?,
        })
    }
}

#[async_trait]
impl BlockListRepository for MySqlBlockListRepository {
    async fn find_by_phone(
        &self,
        phone_number: &str,
    ) -> Result<Option<BlockedPhoneNumber>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT phone_number, block_reason, blocked_by, blocked_at
            FROM blocked_phone_numbers
            WHERE phone_number = ?
            "#,
        )
        .bind(phone_number)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| query_error("Failed to load block list entry", e))?;

        row.as_ref().map(Self::row_to_entry).transpose()
    }

    async fn insert(
        &self,
        entry: BlockedPhoneNumber,
    ) -> Result<BlockedPhoneNumber, DomainError> {
        let result = sqlx::query(
            r#"
            INSERT INTO blocked_phone_numbers (
                phone_number, block_reason, blocked_by, blocked_at
            ) VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(&entry.phone_number)
        .bind(&entry.block_reason)
        .bind(&entry.blocked_by)
        .bind(entry.blocked_at)
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(entry),
            Err(e) if is_unique_violation(&e) => Err(DomainError::Conflict {
                resource: format!("block_list:{}", entry.phone_number),
            }),
            Err(e) => Err(query_error("Failed to insert block list entry", e)),
        }
    }

    async fn remove(&self, phone_number: &str) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM blocked_phone_numbers WHERE phone_number = ?")
            .bind(phone_number)
            .execute(&self.pool)
            .await
            .map_err(|e| query_error("Failed to remove block list entry", e))?;

        Ok(result.rows_affected() > 0)
    }
}
