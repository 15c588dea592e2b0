//! # OtpGate Core
//!
//! Core business logic and domain layer for the OtpGate backend.
//! This crate contains the domain entities, gate services, repository
//! interfaces, and error types that decide whether an OTP send request
//! may proceed.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::*;
pub use errors::*;
pub use repositories::*;
pub use services::*;
