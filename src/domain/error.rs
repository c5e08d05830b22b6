//! Domain errors

use thiserror::Error;

use super::account::AccountId;
use super::reservation::WindowRejection;

/// Domain-level error taxonomy.
///
/// Every failure a use case can produce is one of these variants; the HTTP
/// layer only decides how each one is rendered.
#[derive(Debug, Clone, Error)]
pub enum DomainError {
    /// Unparseable request body, date or query parameter
    #[error("{0}")]
    MalformedInput(String),

    /// Business-hours / duration / ordering rule failed
    #[error(transparent)]
    Validation(#[from] WindowRejection),

    #[error("Reservation time overlaps with existing reservation")]
    OverlapConflict,

    /// No credential supplied
    #[error("Unauthorized")]
    Unauthenticated,

    /// Credential supplied but rejected (bad signature, expired, wrong password)
    #[error("{0}")]
    InvalidCredential(String),

    #[error("The user does not exist or is not authorized to create reservations.")]
    UnknownOwner(AccountId),

    #[error("email already in use")]
    DuplicateEmail(String),

    #[error("Persistence error: {0}")]
    Persistence(String),

    /// Token signing, hashing or task failure unrelated to the store
    #[error("Internal error: {0}")]
    Internal(String),
}

impl DomainError {
    /// Short machine-readable label, used for metrics and logs
    pub fn kind(&self) -> &'static str {
        match self {
            Self::MalformedInput(_) => "malformed_input",
            Self::Validation(rejection) => rejection.kind(),
            Self::OverlapConflict => "overlap_conflict",
            Self::Unauthenticated => "unauthenticated",
            Self::InvalidCredential(_) => "invalid_credential",
            Self::UnknownOwner(_) => "unknown_owner",
            Self::DuplicateEmail(_) => "duplicate_email",
            Self::Persistence(_) => "persistence",
            Self::Internal(_) => "internal",
        }
    }
}

/// Result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_error_keeps_rejection_message() {
        let err: DomainError = WindowRejection::TooShort { minimum_minutes: 60 }.into();
        assert_eq!(err.to_string(), "Minimum reservation duration is 1 hour");
        assert_eq!(err.kind(), "too_short");
    }
}
