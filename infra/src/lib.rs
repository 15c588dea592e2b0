//! # Infrastructure Layer
//!
//! This crate implements the infrastructure layer for the OtpGate
//! application. It provides the concrete MySQL implementations of the
//! repository traits the gate engine runs against.
//!
//! ## Architecture
//!
//! - **Database**: MySQL implementations using SQLx, including the
//!   compare-and-set update path the trackers rely on for per-key
//!   atomicity
//!
//! ## Features
//!
//! - `mysql`: Enable MySQL database support (default)

// Re-export core error types for convenience
pub use og_core::errors::*;

/// Database module - MySQL implementations using SQLx
#[cfg(feature = "mysql")]
pub mod database;

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Database connection error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}
