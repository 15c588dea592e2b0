//! Shared utilities and common types for the OtpGate server
//!
//! This crate provides common functionality used across all server modules:
//! - Configuration types for the gate, database, and environment
//! - Utility functions (phone normalization, masking)

pub mod config;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{
    BlockDurations, DatabaseConfig, Environment, GateConfig, IpLimits, PhoneLimits,
    RiskThresholds,
};
pub use utils::phone;
