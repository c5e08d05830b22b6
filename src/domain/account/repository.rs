//! Account repository interface

use async_trait::async_trait;

use super::model::{Account, NewAccount};
use crate::domain::DomainResult;

#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// Insert a new account.
    ///
    /// Fails with `DomainError::DuplicateEmail` when the email is taken,
    /// even if a concurrent registration won the race after the caller's
    /// own lookup.
    async fn create(&self, account: NewAccount) -> DomainResult<Account>;

    async fn find_by_email(&self, email: &str) -> DomainResult<Option<Account>>;
}
