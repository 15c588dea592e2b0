//! Database module - MySQL implementations using SQLx
//!
//! This module provides the database access layer:
//! - Connection pool management
//! - Repository pattern implementations for the gate's three stores

use std::time::Duration;

use sqlx::mysql::MySqlPoolOptions;
use sqlx::MySqlPool;
use tracing::info;

use og_shared::config::DatabaseConfig;

use crate::InfrastructureError;

pub mod mysql;

// Re-export commonly used types
pub use mysql::{MySqlBlockListRepository, MySqlIpReputationRepository, MySqlPhoneRiskRepository};

/// Create a MySQL connection pool from the given configuration
pub async fn create_pool(config: &DatabaseConfig) -> Result<MySqlPool, InfrastructureError> {
    let pool = MySqlPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(Duration::from_secs(config.connect_timeout))
        .idle_timeout(Duration::from_secs(config.idle_timeout))
        .max_lifetime(Duration::from_secs(config.max_lifetime))
        .connect(&config.url)
        .await?;

    info!(
        max_connections = config.max_connections,
        "Database connection pool created"
    );

    Ok(pool)
}
