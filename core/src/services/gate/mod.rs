//! Gate decision engine module
//!
//! This module provides the admission check run before every OTP send:
//! - Pure risk-score calculators (velocity, pattern, total, IP)
//! - The `GateService` orchestrating block lists, trackers, and scoring
//! - The admin override surface (block/unblock/stats)

pub mod scoring;
mod service;

#[cfg(test)]
mod tests;

pub use service::GateService;
