//! IP reputation tracker: owns the per-IP tracking record.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, warn};

use og_shared::config::GateConfig;
use og_shared::utils::phone::mask_phone_number;

use crate::domain::entities::ip_reputation::IpReputationRecord;
use crate::errors::{DomainError, DomainResult};
use crate::repositories::ip_reputation::IpReputationRepository;
use crate::services::gate::scoring;

use super::MAX_WRITE_RETRIES;

/// Accumulates the set of phone numbers attempted from each IP and a
/// coarse risk score. The counters here are lifetime values, not rolling
/// windows: IP abuse is treated as cumulative evidence, unlike the
/// recent-window signal used on the phone side.
pub struct IpReputationTracker<R: IpReputationRepository> {
    repository: Arc<R>,
    config: GateConfig,
}

impl<R: IpReputationRepository> IpReputationTracker<R> {
    /// Create a new tracker over the given repository.
    pub fn new(repository: Arc<R>, config: GateConfig) -> Self {
        Self { repository, config }
    }

    /// Track an attempt happening now.
    pub async fn track_attempt(
        &self,
        ip_address: &str,
        phone_number: &str,
    ) -> DomainResult<IpReputationRecord> {
        self.track_attempt_at(ip_address, phone_number, Utc::now())
            .await
    }

    /// Track an attempt with an explicit timestamp.
    ///
    /// Once the risk score crosses the critical threshold the IP is hard
    /// blocked; there is no unblock path on this side.
    pub async fn track_attempt_at(
        &self,
        ip_address: &str,
        phone_number: &str,
        now: DateTime<Utc>,
    ) -> DomainResult<IpReputationRecord> {
        for _ in 0..MAX_WRITE_RETRIES {
            match self.repository.find_by_ip(ip_address).await? {
                None => {
                    let record =
                        IpReputationRecord::first_attempt(ip_address, phone_number, now);
                    match self.repository.insert(record).await {
                        Ok(persisted) => return Ok(persisted),
                        Err(e) if e.is_conflict() => continue,
                        Err(e) => return Err(e),
                    }
                }
                Some(mut record) => {
                    record.observe_attempt(phone_number, now);
                    record.risk_score = scoring::ip_risk_score(
                        record.distinct_phone_count(),
                        record.total_attempts,
                        &self.config.ip,
                    );

                    let newly_blocked = !record.is_blocked
                        && record.risk_score >= self.config.risk.critical;
                    // A hard block is never lifted by rescoring
                    record.is_blocked = record.is_blocked || newly_blocked;

                    match self.repository.update(record).await {
                        Ok(persisted) => {
                            if newly_blocked {
                                warn!(
                                    ip = ip_address,
                                    risk_score = persisted.risk_score,
                                    distinct_phones = persisted.distinct_phone_count(),
                                    "ip address hard blocked"
                                );
                            } else {
                                debug!(
                                    ip = ip_address,
                                    phone = %mask_phone_number(phone_number),
                                    risk_score = persisted.risk_score,
                                    "tracked attempt for ip"
                                );
                            }
                            return Ok(persisted);
                        }
                        Err(e) if e.is_conflict() => continue,
                        Err(e) => return Err(e),
                    }
                }
            }
        }

        Err(DomainError::Internal {
            message: format!(
                "gave up tracking attempt for ip {} after {} contended writes",
                ip_address, MAX_WRITE_RETRIES
            ),
        })
    }
}
