//! MySQL repository implementations.

mod block_list_repository_impl;
mod ip_reputation_repository_impl;
mod phone_risk_repository_impl;

pub use block_list_repository_impl::MySqlBlockListRepository;
pub use ip_reputation_repository_impl::MySqlIpReputationRepository;
pub use phone_risk_repository_impl::MySqlPhoneRiskRepository;

use og_core::errors::DomainError;

/// Map a column read failure to a domain error
pub(crate) fn column_error(column: &str, e: sqlx::Error) -> DomainError {
    DomainError::Internal {
        message: format!("Failed to get {}: {}", column, e),
    }
}

/// Map a query failure to a domain error
pub(crate) fn query_error(context: &str, e: sqlx::Error) -> DomainError {
    DomainError::Internal {
        message: format!("{}: {}", context, e),
    }
}

/// Whether the error is a unique-key violation (duplicate insert)
pub(crate) fn is_unique_violation(e: &sqlx::Error) -> bool {
    e.as_database_error()
        .map_or(false, |db| db.is_unique_violation())
}
