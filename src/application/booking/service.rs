//! Reservation service
//!
//! Owns the create path (validate → detect conflict → persist) and the
//! per-date read path. Creation for a given date is serialised through
//! [`DateLocks`], so two overlapping requests for the same date cannot both
//! pass the conflict check.

use std::sync::Arc;

use chrono::NaiveDate;
use tracing::{debug, info};

use super::locks::DateLocks;
use crate::domain::reservation::{find_overlapping, has_conflict};
use crate::domain::{
    AccountId, BusinessHours, DomainError, DomainResult, NewReservation, RepositoryProvider,
    Reservation, TimeWindow,
};

pub struct ReservationService {
    repos: Arc<dyn RepositoryProvider>,
    hours: BusinessHours,
    locks: DateLocks,
}

impl ReservationService {
    pub fn new(repos: Arc<dyn RepositoryProvider>, hours: BusinessHours) -> Self {
        Self {
            repos,
            hours,
            locks: DateLocks::new(),
        }
    }

    // ── Commands ────────────────────────────────────────────────

    /// Create a reservation for `owner_id` on `date` from `start` to `end`
    /// (`HH:MM`). All-or-nothing: on any error nothing is persisted.
    pub async fn create_reservation(
        &self,
        owner_id: AccountId,
        date: NaiveDate,
        start: &str,
        end: &str,
    ) -> DomainResult<Reservation> {
        let result = self.try_create(owner_id, date, start, end).await;
        match &result {
            Ok(reservation) => {
                metrics::counter!("reservations_created_total").increment(1);
                info!(
                    reservation_id = reservation.id,
                    account_id = owner_id,
                    %date,
                    start = %reservation.window.start_label(),
                    end = %reservation.window.end_label(),
                    "Reservation created"
                );
            }
            Err(e) => {
                metrics::counter!("reservations_rejected_total", "reason" => e.kind()).increment(1);
                debug!(account_id = owner_id, %date, start, end, reason = e.kind(), "Reservation rejected");
            }
        }
        result
    }

    async fn try_create(
        &self,
        owner_id: AccountId,
        date: NaiveDate,
        start: &str,
        end: &str,
    ) -> DomainResult<Reservation> {
        let window = self.hours.validate(start, end)?;

        let _guard = self.locks.acquire(date).await;

        if self.has_conflict(date, &window).await? {
            return Err(DomainError::OverlapConflict);
        }

        self.repos
            .reservations()
            .create(NewReservation::new(owner_id, date, window))
            .await
    }

    // ── Queries ─────────────────────────────────────────────────

    /// All reservations on `date`, ordered by start time. Empty when none.
    pub async fn reservations_on_date(&self, date: NaiveDate) -> DomainResult<Vec<Reservation>> {
        self.repos.reservations().find_by_date(date).await
    }

    /// Existing reservations on `date` that overlap `window`
    pub async fn find_overlapping(
        &self,
        date: NaiveDate,
        window: &TimeWindow,
    ) -> DomainResult<Vec<Reservation>> {
        let existing = self.reservations_on_date(date).await?;
        Ok(find_overlapping(&existing, window).into_iter().cloned().collect())
    }

    pub async fn has_conflict(&self, date: NaiveDate, window: &TimeWindow) -> DomainResult<bool> {
        let existing = self.reservations_on_date(date).await?;
        Ok(has_conflict(&existing, window))
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveTime;

    use super::*;
    use crate::domain::{NewAccount, WindowRejection};
    use crate::infrastructure::storage::InMemoryRepositoryProvider;

    fn june_10() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 10).unwrap()
    }

    async fn setup() -> (ReservationService, AccountId) {
        let repos: Arc<dyn RepositoryProvider> = Arc::new(InMemoryRepositoryProvider::new());
        let owner = repos
            .accounts()
            .create(NewAccount {
                name: "Ana".into(),
                email: "ana@example.com".into(),
                password_hash: "hash".into(),
            })
            .await
            .unwrap();
        (ReservationService::new(repos, BusinessHours::default()), owner.id)
    }

    #[tokio::test]
    async fn creates_and_persists_with_owner() {
        let (svc, owner) = setup().await;
        let created = svc
            .create_reservation(owner, june_10(), "10:00", "11:00")
            .await
            .unwrap();
        assert_eq!(created.owner_id, owner);
        assert_eq!(created.window.start_label(), "10:00");

        let day = svc.reservations_on_date(june_10()).await.unwrap();
        assert_eq!(day, vec![created]);
    }

    #[tokio::test]
    async fn overlapping_second_request_is_rejected() {
        let (svc, owner) = setup().await;
        svc.create_reservation(owner, june_10(), "10:00", "11:00")
            .await
            .unwrap();

        let err = svc
            .create_reservation(owner, june_10(), "10:30", "11:30")
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::OverlapConflict));
        assert_eq!(svc.reservations_on_date(june_10()).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn back_to_back_is_allowed() {
        let (svc, owner) = setup().await;
        svc.create_reservation(owner, june_10(), "10:00", "11:00")
            .await
            .unwrap();
        svc.create_reservation(owner, june_10(), "11:00", "12:00")
            .await
            .unwrap();
        assert_eq!(svc.reservations_on_date(june_10()).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn same_window_on_another_date_is_allowed() {
        let (svc, owner) = setup().await;
        svc.create_reservation(owner, june_10(), "10:00", "11:00")
            .await
            .unwrap();
        let next_day = june_10().succ_opt().unwrap();
        svc.create_reservation(owner, next_day, "10:00", "11:00")
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn validation_rejection_is_propagated_verbatim() {
        let (svc, owner) = setup().await;

        let err = svc
            .create_reservation(owner, june_10(), "08:00", "09:30")
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            DomainError::Validation(WindowRejection::OutsideBusinessHours { .. })
        ));

        let err = svc
            .create_reservation(owner, june_10(), "10:00", "10:00")
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(WindowRejection::ZeroDuration { .. })));
        assert_eq!(err.to_string().matches("10:00").count(), 2);

        assert!(svc.reservations_on_date(june_10()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn unknown_owner_is_reported() {
        let (svc, _) = setup().await;
        let err = svc
            .create_reservation(404, june_10(), "10:00", "11:00")
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::UnknownOwner(404)));
    }

    #[tokio::test]
    async fn find_overlapping_returns_conflicting_rows() {
        let (svc, owner) = setup().await;
        svc.create_reservation(owner, june_10(), "09:00", "10:00")
            .await
            .unwrap();
        svc.create_reservation(owner, june_10(), "13:00", "15:00")
            .await
            .unwrap();

        let t = |h, m| NaiveTime::from_hms_opt(h, m, 0).unwrap();
        let hits = svc
            .find_overlapping(june_10(), &TimeWindow::new(t(14, 0), t(16, 0)))
            .await
            .unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].window.start_label(), "13:00");

        assert!(!svc
            .has_conflict(june_10(), &TimeWindow::new(t(10, 0), t(13, 0)))
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn reads_are_repeatable() {
        let (svc, owner) = setup().await;
        for (s, e) in [("15:00", "16:00"), ("09:00", "10:30"), ("12:00", "13:00")] {
            svc.create_reservation(owner, june_10(), s, e).await.unwrap();
        }
        let first = svc.reservations_on_date(june_10()).await.unwrap();
        let second = svc.reservations_on_date(june_10()).await.unwrap();
        assert_eq!(first, second);
        let starts: Vec<String> = first.iter().map(|r| r.window.start_label()).collect();
        assert_eq!(starts, vec!["09:00", "12:00", "15:00"]);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_identical_requests_book_once() {
        let (svc, owner) = setup().await;
        let svc = Arc::new(svc);

        let attempts: Vec<_> = (0..16)
            .map(|_| {
                let svc = Arc::clone(&svc);
                tokio::spawn(async move {
                    svc.create_reservation(owner, june_10(), "10:00", "11:00").await
                })
            })
            .collect();

        let mut succeeded = 0;
        for attempt in attempts {
            match attempt.await.unwrap() {
                Ok(_) => succeeded += 1,
                Err(e) => assert!(matches!(e, DomainError::OverlapConflict)),
            }
        }
        assert_eq!(succeeded, 1);
        assert_eq!(svc.reservations_on_date(june_10()).await.unwrap().len(), 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_mixed_requests_never_double_book() {
        let (svc, owner) = setup().await;
        let svc = Arc::new(svc);
        let windows = [
            ("10:00", "11:00"),
            ("10:30", "11:30"),
            ("11:00", "12:00"),
            ("09:00", "12:00"),
            ("11:30", "13:00"),
            ("14:00", "15:00"),
            ("14:30", "16:00"),
            ("16:00", "18:00"),
        ];

        let attempts: Vec<_> = windows
            .iter()
            .map(|&(s, e)| {
                let svc = Arc::clone(&svc);
                tokio::spawn(async move { svc.create_reservation(owner, june_10(), s, e).await })
            })
            .collect();
        for attempt in attempts {
            let _ = attempt.await.unwrap();
        }

        let day = svc.reservations_on_date(june_10()).await.unwrap();
        assert!(!day.is_empty());
        for (i, a) in day.iter().enumerate() {
            for b in &day[i + 1..] {
                assert!(!a.window.overlaps(&b.window), "{:?} overlaps {:?}", a, b);
            }
        }
    }
}
