//! Example demonstrating the OTP delivery gate against a live MySQL store
//!
//! Requires a MySQL database with the migrations applied and DATABASE_URL
//! set (a .env file works).
//!
//! Run with: cargo run --example gate_demo

use std::sync::Arc;

use anyhow::Result;

use og_core::services::gate::GateService;
use og_core::services::maintenance::{RecordSweeper, SweeperConfig};
use og_infra::database::{
    create_pool, MySqlBlockListRepository, MySqlIpReputationRepository, MySqlPhoneRiskRepository,
};
use og_shared::config::{DatabaseConfig, Environment, GateConfig};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let environment = Environment::from_env();
    println!("Running gate demo against {} configuration", environment);

    let db_config = DatabaseConfig::from_env();
    let pool = create_pool(&db_config).await?;

    let phone_repo = Arc::new(MySqlPhoneRiskRepository::new(pool.clone()));
    let ip_repo = Arc::new(MySqlIpReputationRepository::new(pool.clone()));
    let block_repo = Arc::new(MySqlBlockListRepository::new(pool.clone()));

    // Tight limits so the demo trips them quickly
    let mut gate_config = if environment.is_production() {
        GateConfig::production()
    } else {
        GateConfig::development()
    };
    gate_config.phone.max_per_hour = 3;
    gate_config.phone.min_interval_seconds = 0;

    let gate = GateService::new(
        Arc::clone(&phone_repo),
        Arc::clone(&ip_repo),
        block_repo,
        gate_config,
    );

    let phone = "+15550104242";
    let ip = "203.0.113.7";
    let ua = Some("Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) Safari/605.1.15");

    println!("\n=== Hammering the gate with 5 requests ===");
    for i in 1..=5 {
        let decision = gate.check_spam_and_bots(phone, ip, ua).await;
        if decision.allowed {
            println!(
                "Request {}: allowed (risk score {})",
                i, decision.risk_score
            );
        } else {
            println!(
                "Request {}: DENIED - {} (retry after {:?}s)",
                i,
                decision.reason.as_deref().unwrap_or("unknown"),
                decision.retry_after_seconds
            );
        }
    }

    println!("\n=== Admin override ===");
    gate.unblock_phone_number(phone).await?;
    let decision = gate.check_spam_and_bots(phone, ip, ua).await;
    println!(
        "After unblock: allowed = {} (risk score {})",
        decision.allowed, decision.risk_score
    );

    if let Some(stats) = gate.phone_risk_stats(phone).await? {
        println!(
            "Stats: {} lifetime attempts, {} in the last hour, score {}",
            stats.attempt_count, stats.attempts_last_hour, stats.total_risk_score
        );
    }

    println!("\n=== Maintenance sweep ===");
    let sweeper = RecordSweeper::new(phone_repo, ip_repo, SweeperConfig::default());
    let swept = sweeper.cleanup_stale_records().await?;
    println!("Sweeper removed {} stale rows", swept);

    Ok(())
}
