//! Reservation domain entity

use chrono::{DateTime, NaiveDate, Utc};

use super::window::TimeWindow;
use crate::domain::account::AccountId;

pub type ReservationId = i32;

/// An owned, immutable time interval on a single calendar date
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reservation {
    pub id: ReservationId,
    pub owner_id: AccountId,
    pub date: NaiveDate,
    pub window: TimeWindow,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Reservation that passed validation and conflict detection and is about
/// to be persisted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewReservation {
    pub owner_id: AccountId,
    pub date: NaiveDate,
    pub window: TimeWindow,
}

impl NewReservation {
    pub fn new(owner_id: AccountId, date: NaiveDate, window: TimeWindow) -> Self {
        Self {
            owner_id,
            date,
            window,
        }
    }
}
