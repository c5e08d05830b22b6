//! Reservation repository interface

use async_trait::async_trait;
use chrono::NaiveDate;

use super::model::{NewReservation, Reservation};
use crate::domain::DomainResult;

#[async_trait]
pub trait ReservationRepository: Send + Sync {
    /// Persist a new reservation.
    ///
    /// Fails with `DomainError::UnknownOwner` when the owner account does
    /// not exist. Performs no overlap checking of its own.
    async fn create(&self, reservation: NewReservation) -> DomainResult<Reservation>;

    /// All reservations on `date`, ordered by start time, then id
    async fn find_by_date(&self, date: NaiveDate) -> DomainResult<Vec<Reservation>>;
}
