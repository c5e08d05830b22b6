//! Repository traits for the domain layer
//!
//! `RepositoryProvider` gives unified access to the per-aggregate
//! repositories so services depend on one handle instead of a concrete
//! store.

use std::time::Duration;

use async_trait::async_trait;

use super::account::AccountRepository;
use super::reservation::ReservationRepository;
use super::DomainResult;

/// Provides access to all domain repositories.
///
/// ```ignore
/// async fn handle(repos: &dyn RepositoryProvider) {
///     let account = repos.accounts().find_by_email("ana@example.com").await?;
///     let day = repos.reservations().find_by_date(date).await?;
/// }
/// ```
#[async_trait]
pub trait RepositoryProvider: Send + Sync {
    fn accounts(&self) -> &dyn AccountRepository;
    fn reservations(&self) -> &dyn ReservationRepository;

    /// Round-trip to the backing store; returns the observed latency
    async fn ping(&self) -> DomainResult<Duration>;
}
