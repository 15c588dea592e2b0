//! Gate configuration module
//!
//! Every tunable the gate engine consumes lives here so deployments can
//! tighten or relax limits without touching code.

use serde::{Deserialize, Serialize};

/// Abuse-prevention gate configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GateConfig {
    /// Fail-open policy: when the durable store errors during a check, the
    /// request is allowed through rather than blocked on an infrastructure
    /// fault. Deliberate availability-over-strict-security tradeoff; flip
    /// to `false` to deny on store failure instead.
    #[serde(default = "default_fail_open")]
    pub fail_open: bool,

    /// Per-phone-number limits
    pub phone: PhoneLimits,

    /// Per-IP limits
    pub ip: IpLimits,

    /// Risk score thresholds and weighting
    pub risk: RiskThresholds,

    /// Temporary block durations
    pub blocks: BlockDurations,
}

/// Per-phone-number rate limits
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PhoneLimits {
    /// Max OTP requests per phone number per hour
    pub max_per_hour: u32,

    /// Max OTP requests per phone number per day
    pub max_per_day: u32,

    /// Minimum seconds between consecutive requests for the same number
    pub min_interval_seconds: i64,

    /// Distinct-IP count above which a number looks distributed
    pub ip_diversity_cap: u32,
}

impl Default for PhoneLimits {
    fn default() -> Self {
        Self {
            max_per_hour: 3,
            max_per_day: 10,
            min_interval_seconds: 60,
            ip_diversity_cap: 5,
        }
    }
}

/// Per-IP rate limits
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct IpLimits {
    /// Distinct phone numbers per IP treated as an hourly-scale excess
    pub phones_per_hour_cap: u32,

    /// Distinct phone numbers per IP treated as a daily-scale excess
    pub phones_per_day_cap: u32,

    /// Lifetime attempt count above which an IP looks busy
    pub attempts_soft_cap: u32,

    /// Lifetime attempt count above which an IP looks abusive
    pub attempts_hard_cap: u32,
}

impl Default for IpLimits {
    fn default() -> Self {
        Self {
            phones_per_hour_cap: 5,
            phones_per_day_cap: 20,
            attempts_soft_cap: 20,
            attempts_hard_cap: 50,
        }
    }
}

/// Risk score thresholds (0-100 scale) and component weighting
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RiskThresholds {
    pub low: u8,
    pub medium: u8,
    pub high: u8,
    pub critical: u8,

    /// Weight of the velocity score in the total. Velocity is the more
    /// reliable near-term signal for OTP abuse, so it outweighs pattern.
    #[serde(default = "default_velocity_weight")]
    pub velocity_weight: f64,

    /// Weight of the pattern score in the total
    #[serde(default = "default_pattern_weight")]
    pub pattern_weight: f64,
}

impl Default for RiskThresholds {
    fn default() -> Self {
        Self {
            low: 30,
            medium: 60,
            high: 80,
            critical: 100,
            velocity_weight: default_velocity_weight(),
            pattern_weight: default_pattern_weight(),
        }
    }
}

/// Temporary block durations in seconds
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BlockDurations {
    /// Short block (hourly-limit violations)
    pub short_seconds: i64,

    /// Medium block (daily-limit violations, high risk scores)
    pub medium_seconds: i64,

    /// Long block (critical risk scores)
    pub long_seconds: i64,
}

impl Default for BlockDurations {
    fn default() -> Self {
        Self {
            short_seconds: 900,    // 15 minutes
            medium_seconds: 3600,  // 1 hour
            long_seconds: 86400,   // 24 hours
        }
    }
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            fail_open: default_fail_open(),
            phone: PhoneLimits::default(),
            ip: IpLimits::default(),
            risk: RiskThresholds::default(),
            blocks: BlockDurations::default(),
        }
    }
}

impl GateConfig {
    /// Create a development configuration (more lenient limits)
    pub fn development() -> Self {
        Self {
            phone: PhoneLimits {
                max_per_hour: 10,
                max_per_day: 50,
                min_interval_seconds: 5,
                ..Default::default()
            },
            ip: IpLimits {
                phones_per_hour_cap: 50,
                phones_per_day_cap: 200,
                ..Default::default()
            },
            ..Default::default()
        }
    }

    /// Create a production configuration (default strict limits)
    pub fn production() -> Self {
        Self::default()
    }
}

fn default_fail_open() -> bool {
    true
}

fn default_velocity_weight() -> f64 {
    0.6
}

fn default_pattern_weight() -> f64 {
    0.4
}
