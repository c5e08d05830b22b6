//! SeaORM implementation of RepositoryProvider

use std::time::{Duration, Instant};

use async_trait::async_trait;
use sea_orm::DatabaseConnection;

use super::account_repository::SeaOrmAccountRepository;
use super::db_err;
use super::reservation_repository::SeaOrmReservationRepository;
use crate::domain::{AccountRepository, DomainResult, RepositoryProvider, ReservationRepository};

/// Unified repository provider backed by SeaORM.
///
/// Holds one connection pool and exposes per-aggregate repository accessors.
pub struct SeaOrmRepositoryProvider {
    db: DatabaseConnection,
    accounts: SeaOrmAccountRepository,
    reservations: SeaOrmReservationRepository,
}

impl SeaOrmRepositoryProvider {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            accounts: SeaOrmAccountRepository::new(db.clone()),
            reservations: SeaOrmReservationRepository::new(db.clone()),
            db,
        }
    }
}

#[async_trait]
impl RepositoryProvider for SeaOrmRepositoryProvider {
    fn accounts(&self) -> &dyn AccountRepository {
        &self.accounts
    }

    fn reservations(&self) -> &dyn ReservationRepository {
        &self.reservations
    }

    async fn ping(&self) -> DomainResult<Duration> {
        let started = Instant::now();
        self.db.ping().await.map_err(db_err)?;
        Ok(started.elapsed())
    }
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, NaiveTime};
    use sea_orm_migration::MigratorTrait;

    use super::*;
    use crate::domain::{DomainError, NewAccount, NewReservation, TimeWindow};
    use crate::infrastructure::database::migrator::Migrator;
    use crate::infrastructure::database::{init_database, DatabaseConfig};

    async fn provider() -> SeaOrmRepositoryProvider {
        let db = init_database(&DatabaseConfig::in_memory()).await.unwrap();
        Migrator::up(&db, None).await.unwrap();
        SeaOrmRepositoryProvider::new(db)
    }

    fn new_account(email: &str) -> NewAccount {
        NewAccount {
            name: "Ana".into(),
            email: email.into(),
            password_hash: "$2b$04$placeholder".into(),
        }
    }

    fn window(start: (u32, u32), end: (u32, u32)) -> TimeWindow {
        TimeWindow::new(
            NaiveTime::from_hms_opt(start.0, start.1, 0).unwrap(),
            NaiveTime::from_hms_opt(end.0, end.1, 0).unwrap(),
        )
    }

    fn june_10() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 10).unwrap()
    }

    #[tokio::test]
    async fn ping_reaches_the_database() {
        let repos = provider().await;
        assert!(repos.ping().await.is_ok());
    }

    #[tokio::test]
    async fn account_lookup_by_email() {
        let repos = provider().await;
        let created = repos.accounts().create(new_account("ana@example.com")).await.unwrap();

        let by_email = repos
            .accounts()
            .find_by_email("ana@example.com")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(by_email.id, created.id);
        assert_eq!(by_email.email, "ana@example.com");

        assert!(repos.accounts().find_by_email("nobody@example.com").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn duplicate_email_maps_to_domain_error() {
        let repos = provider().await;
        repos.accounts().create(new_account("ana@example.com")).await.unwrap();

        let err = repos
            .accounts()
            .create(new_account("ana@example.com"))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::DuplicateEmail(email) if email == "ana@example.com"));
    }

    #[tokio::test]
    async fn missing_owner_maps_to_unknown_owner() {
        let repos = provider().await;
        let err = repos
            .reservations()
            .create(NewReservation::new(999, june_10(), window((10, 0), (11, 0))))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::UnknownOwner(999)));
    }

    #[tokio::test]
    async fn find_by_date_is_ordered_by_start() {
        let repos = provider().await;
        let owner = repos.accounts().create(new_account("ana@example.com")).await.unwrap();

        for (start, end) in [((15, 0), (16, 0)), ((9, 0), (10, 0)), ((12, 30), (14, 0))] {
            repos
                .reservations()
                .create(NewReservation::new(owner.id, june_10(), window(start, end)))
                .await
                .unwrap();
        }
        let other_day = june_10().succ_opt().unwrap();
        repos
            .reservations()
            .create(NewReservation::new(owner.id, other_day, window((10, 0), (11, 0))))
            .await
            .unwrap();

        let day = repos.reservations().find_by_date(june_10()).await.unwrap();
        let starts: Vec<String> = day.iter().map(|r| r.window.start_label()).collect();
        assert_eq!(starts, vec!["09:00", "12:30", "15:00"]);
        assert!(day.iter().all(|r| r.owner_id == owner.id && r.date == june_10()));

        let again = repos.reservations().find_by_date(june_10()).await.unwrap();
        assert_eq!(day, again);
    }
}
