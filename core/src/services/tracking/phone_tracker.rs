//! Phone risk tracker: owns the per-phone-number tracking record.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use tracing::{debug, warn};

use og_shared::config::GateConfig;
use og_shared::utils::phone::mask_phone_number;

use crate::domain::entities::phone_risk::PhoneRiskRecord;
use crate::errors::{DomainError, DomainResult};
use crate::repositories::phone_risk::PhoneRiskRepository;
use crate::services::gate::scoring;

use super::MAX_WRITE_RETRIES;

/// Records every OTP request against a phone number: rolls the windowed
/// counters, recomputes risk scores, and applies the blocking policy.
pub struct PhoneRiskTracker<R: PhoneRiskRepository> {
    repository: Arc<R>,
    config: GateConfig,
}

impl<R: PhoneRiskRepository> PhoneRiskTracker<R> {
    /// Create a new tracker over the given repository.
    pub fn new(repository: Arc<R>, config: GateConfig) -> Self {
        Self { repository, config }
    }

    /// Record an attempt happening now.
    pub async fn record_attempt(
        &self,
        phone_number: &str,
        ip: &str,
        user_agent: Option<&str>,
    ) -> DomainResult<PhoneRiskRecord> {
        self.record_attempt_at(phone_number, ip, user_agent, Utc::now())
            .await
    }

    /// Record an attempt with an explicit timestamp.
    ///
    /// Loads or lazily creates the tracking record, folds the attempt in,
    /// recomputes the risk scores, and applies the blocking decision. A
    /// record created on first sight carries zero scores; one observation
    /// is no signal. Lost optimistic-concurrency races are retried.
    pub async fn record_attempt_at(
        &self,
        phone_number: &str,
        ip: &str,
        user_agent: Option<&str>,
        now: DateTime<Utc>,
    ) -> DomainResult<PhoneRiskRecord> {
        for _ in 0..MAX_WRITE_RETRIES {
            match self.repository.find_by_phone(phone_number).await? {
                None => {
                    let record =
                        PhoneRiskRecord::first_attempt(phone_number, ip, user_agent, now);
                    match self.repository.insert(record).await {
                        Ok(persisted) => return Ok(persisted),
                        // Another request created the row first; re-read
                        Err(e) if e.is_conflict() => continue,
                        Err(e) => return Err(e),
                    }
                }
                Some(mut record) => {
                    record.observe_attempt(ip, user_agent, now);
                    self.rescore(&mut record, user_agent);
                    self.apply_block_policy(&mut record, now);

                    match self.repository.update(record).await {
                        Ok(persisted) => {
                            debug!(
                                phone = %mask_phone_number(phone_number),
                                risk_score = persisted.total_risk_score,
                                attempts_last_hour = persisted.attempts_last_hour,
                                "recorded otp request attempt"
                            );
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
                "gave up recording attempt for {} after {} contended writes",
                mask_phone_number(phone_number),
                MAX_WRITE_RETRIES
            ),
        })
    }

    fn rescore(&self, record: &mut PhoneRiskRecord, user_agent: Option<&str>) {
        record.velocity_score = scoring::velocity_score(
            record.attempt_count,
            record.first_attempt_at,
            record.last_attempt_at,
            record.attempts_last_hour,
            &self.config.phone,
        );
        record.pattern_score = scoring::pattern_score(
            record.distinct_ip_count,
            record.attempts_last_day,
            user_agent,
            &self.config.phone,
        );
        record.total_risk_score = scoring::total_risk_score(
            record.velocity_score,
            record.pattern_score,
            &self.config.risk,
        );
    }

    /// Blocking decision in fixed priority order; the highest severity
    /// wins. A record that triggers none of the rules keeps whatever block
    /// state it already had, so an earlier block runs out on its own
    /// schedule even if this attempt scores low.
    fn apply_block_policy(&self, record: &mut PhoneRiskRecord, now: DateTime<Utc>) {
        let risk = &self.config.risk;
        let blocks = &self.config.blocks;
        let phone = &self.config.phone;

        let decision = if record.total_risk_score >= risk.critical {
            Some(("critical risk score", blocks.long_seconds))
        } else if record.total_risk_score >= risk.high {
            Some(("high risk score", blocks.medium_seconds))
        } else if record.attempts_last_hour > phone.max_per_hour {
            Some(("hourly limit exceeded", blocks.short_seconds))
        } else if record.attempts_last_day > phone.max_per_day {
            Some(("daily limit exceeded", blocks.medium_seconds))
        } else {
            None
        };

        if let Some((reason, duration_seconds)) = decision {
            record.block(reason, now + Duration::seconds(duration_seconds));
            warn!(
                phone = %mask_phone_number(&record.phone_number),
                reason = reason,
                risk_score = record.total_risk_score,
                blocked_for_seconds = duration_seconds,
                "phone number blocked"
            );
        }
    }
}
