//! Gate decision engine: the single entry point the delivery layer calls
//! before sending an OTP.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{error, info, warn};

use og_shared::config::GateConfig;
use og_shared::utils::phone::{is_valid_phone, mask_phone_number, normalize_phone_number};

use crate::domain::entities::blocked_number::BlockedPhoneNumber;
use crate::domain::entities::phone_risk::PhoneRiskRecord;
use crate::domain::value_objects::gate_decision::GateDecision;
use crate::errors::{DomainError, DomainResult};
use crate::repositories::block_list::BlockListRepository;
use crate::repositories::ip_reputation::IpReputationRepository;
use crate::repositories::phone_risk::PhoneRiskRepository;
use crate::services::blocklist::BlockListService;
use crate::services::tracking::{IpReputationTracker, PhoneRiskTracker};

/// Orchestrates the block list, the phone risk tracker, and the IP
/// reputation tracker into one admission decision per request. The engine
/// is stateless between calls; all state lives in the repositories, so any
/// number of instances can run concurrently.
pub struct GateService<P, I, B>
where
    P: PhoneRiskRepository,
    I: IpReputationRepository,
    B: BlockListRepository,
{
    phone_risk: Arc<P>,
    ip_reputation: Arc<I>,
    block_list: BlockListService<B, P>,
    phone_tracker: PhoneRiskTracker<P>,
    ip_tracker: IpReputationTracker<I>,
    config: GateConfig,
}

impl<P, I, B> GateService<P, I, B>
where
    P: PhoneRiskRepository,
    I: IpReputationRepository,
    B: BlockListRepository,
{
    /// Create a new gate over the three repositories.
    pub fn new(
        phone_risk: Arc<P>,
        ip_reputation: Arc<I>,
        block_list: Arc<B>,
        config: GateConfig,
    ) -> Self {
        Self {
            block_list: BlockListService::new(block_list, Arc::clone(&phone_risk)),
            phone_tracker: PhoneRiskTracker::new(Arc::clone(&phone_risk), config.clone()),
            ip_tracker: IpReputationTracker::new(Arc::clone(&ip_reputation), config.clone()),
            phone_risk,
            ip_reputation,
            config,
        }
    }

    /// Decide whether an OTP send for this (phone, IP, user agent) triple
    /// may proceed. Checks run in strict precedence order and short-circuit
    /// on the first denial:
    ///
    /// 1. Permanent phone block (indefinite denial)
    /// 2. IP hard block (indefinite denial)
    /// 3. Active timed phone block (denial with retry hint)
    /// 4. Minimum interval since the previous request — checked before any
    ///    state is mutated, so a rejected request does not consume a
    ///    rate-limit slot
    /// 5. Record the attempt, rescore, and apply the blocking policy
    ///
    /// Store failures follow the configured fail-open policy: the error is
    /// logged and the request is admitted rather than blocking legitimate
    /// traffic on an infrastructure fault. This availability-over-strict-
    /// security tradeoff is deliberate; do not tighten it casually.
    pub async fn check_spam_and_bots(
        &self,
        phone_number: &str,
        ip_address: &str,
        user_agent: Option<&str>,
    ) -> GateDecision {
        let phone = normalize_phone_number(phone_number);
        if !is_valid_phone(&phone) {
            info!(
                phone = %mask_phone_number(phone_number),
                "rejected request with malformed phone number"
            );
            return GateDecision::deny("invalid phone number format", 0, None);
        }

        match self
            .evaluate(&phone, ip_address, user_agent, Utc::now())
            .await
        {
            Ok(decision) => decision,
            Err(e) => self.store_failure_decision(&phone, e),
        }
    }

    async fn evaluate(
        &self,
        phone: &str,
        ip_address: &str,
        user_agent: Option<&str>,
        now: DateTime<Utc>,
    ) -> DomainResult<GateDecision> {
        // Permanent list: absolute veto, bypasses all scoring
        if let Some(entry) = self.block_list.is_phone_blocked(phone).await? {
            warn!(
                phone = %mask_phone_number(phone),
                reason = %entry.block_reason,
                "denied permanently blocked phone number"
            );
            return Ok(GateDecision::deny(
                "phone number is permanently blocked",
                100,
                None,
            ));
        }

        // IP hard block
        if let Some(ip_record) = self.ip_reputation.find_by_ip(ip_address).await? {
            if ip_record.is_blocked {
                warn!(ip = ip_address, "denied request from blocked ip");
                return Ok(GateDecision::deny("ip address is blocked", 100, None));
            }
        }

        if let Some(prev) = self.phone_risk.find_by_phone(phone).await? {
            // A block placed by an earlier request still stands
            if let Some(retry_after) = prev.retry_after_seconds(now) {
                let reason = prev
                    .block_reason
                    .clone()
                    .unwrap_or_else(|| "temporarily blocked".to_string());
                return Ok(GateDecision::deny(
                    reason,
                    prev.total_risk_score,
                    Some(retry_after),
                ));
            }

            // Minimum spacing between requests, evaluated before any
            // mutation: a rejected request must not consume a slot
            let elapsed = prev.seconds_since_last_attempt(now);
            if elapsed < self.config.phone.min_interval_seconds {
                let wait = self.config.phone.min_interval_seconds - elapsed;
                return Ok(GateDecision::deny(
                    format!("too soon since last request, retry in {} seconds", wait),
                    prev.total_risk_score,
                    Some(wait),
                ));
            }
        }

        let record = self
            .phone_tracker
            .record_attempt_at(phone, ip_address, user_agent, now)
            .await?;

        // IP tracking is advisory; a failure here never aborts the request
        // because the phone-side decision already stands
        if let Err(e) = self.ip_tracker.track_attempt_at(ip_address, phone, now).await {
            error!(
                ip = ip_address,
                error = %e,
                "ip reputation tracking failed, continuing with phone-side decision"
            );
        }

        if let Some(retry_after) = record.retry_after_seconds(now) {
            let reason = record
                .block_reason
                .clone()
                .unwrap_or_else(|| "temporarily blocked".to_string());
            return Ok(GateDecision::deny(
                reason,
                record.total_risk_score,
                Some(retry_after),
            ));
        }

        if record.total_risk_score >= self.config.risk.medium {
            warn!(
                phone = %mask_phone_number(phone),
                risk_score = record.total_risk_score,
                "elevated risk score on allowed request"
            );
        }

        Ok(GateDecision::allow(record.total_risk_score))
    }

    fn store_failure_decision(&self, phone: &str, e: DomainError) -> GateDecision {
        error!(
            phone = %mask_phone_number(phone),
            error = %e,
            fail_open = self.config.fail_open,
            "store failure during gate check"
        );

        if self.config.fail_open {
            GateDecision::allow(0)
        } else {
            GateDecision::deny("verification gate unavailable", 100, None)
        }
    }

    // ---- Admin override surface ----
    //
    // Administrative actions propagate store errors to the caller; they
    // must not silently no-op.

    /// Add a phone number to the permanent block list.
    pub async fn block_phone_number(
        &self,
        phone_number: &str,
        reason: &str,
        blocked_by: &str,
    ) -> DomainResult<BlockedPhoneNumber> {
        let phone = normalize_phone_number(phone_number);
        if !is_valid_phone(&phone) {
            return Err(DomainError::Validation {
                message: format!("invalid phone number format: {}", phone_number),
            });
        }
        self.block_list.block_phone(&phone, reason, blocked_by).await
    }

    /// Remove a phone number from the permanent block list and lift any
    /// active tracking block. History is preserved.
    pub async fn unblock_phone_number(&self, phone_number: &str) -> DomainResult<()> {
        let phone = normalize_phone_number(phone_number);
        self.block_list.unblock_phone(&phone).await
    }

    /// Read-only statistics lookup for a phone number.
    pub async fn phone_risk_stats(
        &self,
        phone_number: &str,
    ) -> DomainResult<Option<PhoneRiskRecord>> {
        let phone = normalize_phone_number(phone_number);
        self.phone_risk.find_by_phone(&phone).await
    }
}
