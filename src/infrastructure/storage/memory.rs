//! In-memory storage implementation
//!
//! Enforces the same constraints as the SQL schema (unique email, owner must
//! exist) so services behave identically against it. Used by tests and by
//! `DB_URL=memory` for throwaway runs.

use std::sync::atomic::{AtomicI32, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

use crate::domain::{
    Account, AccountId, AccountRepository, DomainError, DomainResult, NewAccount, NewReservation,
    RepositoryProvider, Reservation, ReservationRepository,
};

pub struct InMemoryAccountRepository {
    accounts: Arc<DashMap<AccountId, Account>>,
    emails: DashMap<String, AccountId>,
    counter: AtomicI32,
}

#[async_trait]
impl AccountRepository for InMemoryAccountRepository {
    async fn create(&self, new: NewAccount) -> DomainResult<Account> {
        match self.emails.entry(new.email.clone()) {
            Entry::Occupied(_) => Err(DomainError::DuplicateEmail(new.email)),
            Entry::Vacant(slot) => {
                let now = Utc::now();
                let account = Account {
                    id: self.counter.fetch_add(1, Ordering::SeqCst),
                    name: new.name,
                    email: new.email,
                    password_hash: new.password_hash,
                    created_at: now,
                    updated_at: now,
                };
                self.accounts.insert(account.id, account.clone());
                slot.insert(account.id);
                Ok(account)
            }
        }
    }

    async fn find_by_email(&self, email: &str) -> DomainResult<Option<Account>> {
        Ok(self
            .emails
            .get(email)
            .and_then(|id| self.accounts.get(id.value()).map(|a| a.clone())))
    }
}

pub struct InMemoryReservationRepository {
    accounts: Arc<DashMap<AccountId, Account>>,
    by_date: DashMap<NaiveDate, Vec<Reservation>>,
    counter: AtomicI32,
}

#[async_trait]
impl ReservationRepository for InMemoryReservationRepository {
    async fn create(&self, new: NewReservation) -> DomainResult<Reservation> {
        if !self.accounts.contains_key(&new.owner_id) {
            return Err(DomainError::UnknownOwner(new.owner_id));
        }

        let now = Utc::now();
        let reservation = Reservation {
            id: self.counter.fetch_add(1, Ordering::SeqCst),
            owner_id: new.owner_id,
            date: new.date,
            window: new.window,
            created_at: now,
            updated_at: now,
        };
        self.by_date
            .entry(new.date)
            .or_default()
            .push(reservation.clone());
        Ok(reservation)
    }

    async fn find_by_date(&self, date: NaiveDate) -> DomainResult<Vec<Reservation>> {
        let mut day = self
            .by_date
            .get(&date)
            .map(|entry| entry.value().clone())
            .unwrap_or_default();
        day.sort_by_key(|r| (r.window.start, r.id));

        // Yield so concurrent callers interleave as they would against a real store.
        tokio::task::yield_now().await;
        Ok(day)
    }
}

/// In-memory repository provider for development and testing
pub struct InMemoryRepositoryProvider {
    accounts: InMemoryAccountRepository,
    reservations: InMemoryReservationRepository,
}

impl InMemoryRepositoryProvider {
    pub fn new() -> Self {
        let accounts = Arc::new(DashMap::new());
        Self {
            accounts: InMemoryAccountRepository {
                accounts: Arc::clone(&accounts),
                emails: DashMap::new(),
                counter: AtomicI32::new(1),
            },
            reservations: InMemoryReservationRepository {
                accounts,
                by_date: DashMap::new(),
                counter: AtomicI32::new(1),
            },
        }
    }
}

impl Default for InMemoryRepositoryProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RepositoryProvider for InMemoryRepositoryProvider {
    fn accounts(&self) -> &dyn AccountRepository {
        &self.accounts
    }

    fn reservations(&self) -> &dyn ReservationRepository {
        &self.reservations
    }

    async fn ping(&self) -> DomainResult<Duration> {
        Ok(Duration::ZERO)
    }
}
