//! Stale-record sweeper for periodic maintenance of the tracking stores.
//!
//! This module prunes tracking rows that have not been touched within the
//! configured age thresholds. It runs out-of-band from request handling
//! (an external scheduler or the built-in background task) and shares no
//! in-memory state with the gate, so it is safe to run against live
//! traffic. The permanent block list is administrator-owned and is never
//! swept.

use std::sync::Arc;

use chrono::{Duration, Utc};
use tracing::{error, info, warn};

use crate::errors::DomainResult;
use crate::repositories::ip_reputation::IpReputationRepository;
use crate::repositories::phone_risk::PhoneRiskRepository;

/// Configuration for the record sweeper
#[derive(Debug, Clone)]
pub struct SweeperConfig {
    /// How often to run cleanup when running as a background task (seconds)
    pub interval_seconds: u64,
    /// Phone tracking rows older than this are deleted (days since last attempt)
    pub phone_max_age_days: i64,
    /// IP reputation rows older than this are deleted (days since last seen)
    pub ip_max_age_days: i64,
    /// Whether cleanup is enabled
    pub enabled: bool,
}

impl Default for SweeperConfig {
    fn default() -> Self {
        Self {
            interval_seconds: 3600, // Run every hour
            phone_max_age_days: 30,
            ip_max_age_days: 90,
            enabled: true,
        }
    }
}

/// Service for pruning stale phone and IP tracking records
pub struct RecordSweeper<P, I>
where
    P: PhoneRiskRepository + 'static,
    I: IpReputationRepository + 'static,
{
    phone_risk: Arc<P>,
    ip_reputation: Arc<I>,
    config: SweeperConfig,
}

impl<P, I> RecordSweeper<P, I>
where
    P: PhoneRiskRepository + 'static,
    I: IpReputationRepository + 'static,
{
    /// Create a new record sweeper
    pub fn new(phone_risk: Arc<P>, ip_reputation: Arc<I>, config: SweeperConfig) -> Self {
        Self {
            phone_risk,
            ip_reputation,
            config,
        }
    }

    /// Run a single cleanup cycle
    ///
    /// Deletes phone tracking rows whose last attempt and IP reputation
    /// rows whose last sighting are older than the configured thresholds.
    ///
    /// # Returns
    /// * `Ok(CleanupResult)` - Summary of cleanup operations
    pub async fn run_cleanup(&self) -> DomainResult<CleanupResult> {
        if !self.config.enabled {
            return Ok(CleanupResult::default());
        }

        info!("Starting stale-record sweep");

        let mut result = CleanupResult::default();
        let now = Utc::now();

        let phone_cutoff = now - Duration::days(self.config.phone_max_age_days);
        match self.phone_risk.delete_older_than(phone_cutoff).await {
            Ok(count) => {
                result.phone_records_deleted = count;
                info!("Deleted {} stale phone tracking records", count);
            }
            Err(e) => {
                error!("Failed to sweep phone tracking records: {}", e);
                result.errors.push(format!("phone sweep error: {}", e));
            }
        }

        let ip_cutoff = now - Duration::days(self.config.ip_max_age_days);
        match self.ip_reputation.delete_older_than(ip_cutoff).await {
            Ok(count) => {
                result.ip_records_deleted = count;
                info!("Deleted {} stale ip reputation records", count);
            }
            Err(e) => {
                error!("Failed to sweep ip reputation records: {}", e);
                result.errors.push(format!("ip sweep error: {}", e));
            }
        }

        info!(
            "Stale-record sweep completed - Phone: {}, IP: {}",
            result.phone_records_deleted, result.ip_records_deleted
        );

        Ok(result)
    }

    /// Run a cleanup cycle and return the total number of rows deleted.
    /// Convenience entry point for external schedulers.
    pub async fn cleanup_stale_records(&self) -> DomainResult<u64> {
        Ok(self.run_cleanup().await?.total_cleaned())
    }

    /// Start the sweeper as a background task
    ///
    /// This spawns a tokio task that runs cleanup at regular intervals
    pub fn start_background_task(self: Arc<Self>) {
        if !self.config.enabled {
            warn!("Record sweeper is disabled");
            return;
        }

        let interval = std::time::Duration::from_secs(self.config.interval_seconds);

        tokio::spawn(async move {
            info!(
                "Record sweeper started - will run every {} seconds",
                self.config.interval_seconds
            );

            let mut interval_timer = tokio::time::interval(interval);

            loop {
                interval_timer.tick().await;

                match self.run_cleanup().await {
                    Ok(result) => {
                        if !result.errors.is_empty() {
                            warn!("Sweep completed with errors: {:?}", result.errors);
                        }
                    }
                    Err(e) => {
                        error!("Stale-record sweep failed: {}", e);
                    }
                }
            }
        });
    }
}

/// Result of a cleanup operation
#[derive(Debug, Default)]
pub struct CleanupResult {
    /// Number of stale phone tracking records deleted
    pub phone_records_deleted: u64,
    /// Number of stale IP reputation records deleted
    pub ip_records_deleted: u64,
    /// Any errors encountered during cleanup
    pub errors: Vec<String>,
}

impl CleanupResult {
    /// Check if the cleanup was successful (no errors)
    pub fn is_success(&self) -> bool {
        self.errors.is_empty()
    }

    /// Get total number of rows deleted
    pub fn total_cleaned(&self) -> u64 {
        self.phone_records_deleted + self.ip_records_deleted
    }
}
