//! Database repository implementations
//!
//! Per-aggregate SeaORM repositories + unified RepositoryProvider.

pub mod account_repository;
pub mod repository_provider;
pub mod reservation_repository;

pub use account_repository::SeaOrmAccountRepository;
pub use repository_provider::SeaOrmRepositoryProvider;
pub use reservation_repository::SeaOrmReservationRepository;

use sea_orm::{DbErr, SqlErr};
use tracing::error;

use crate::domain::DomainError;

/// Wrap an unexpected store failure; the detail stays in the logs
pub(crate) fn db_err(e: DbErr) -> DomainError {
    error!(error = %e, "Database error");
    DomainError::Persistence(e.to_string())
}

pub(crate) fn is_unique_violation(e: &DbErr) -> bool {
    matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
}

pub(crate) fn is_foreign_key_violation(e: &DbErr) -> bool {
    matches!(e.sql_err(), Some(SqlErr::ForeignKeyConstraintViolation(_)))
}
