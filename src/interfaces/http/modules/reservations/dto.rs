//! Reservation DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::domain::reservation::DATE_FORMAT;
use crate::domain::{AccountId, Reservation, ReservationId};

/// Request to book a time window on a date
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateReservationRequest {
    /// `YYYY-MM-DD`
    #[serde(default)]
    pub date: String,
    /// `HH:MM`
    #[serde(default)]
    pub start_time: String,
    /// `HH:MM`
    #[serde(default)]
    pub end_time: String,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct ListReservationsQuery {
    /// `YYYY-MM-DD`
    pub date: Option<String>,
}

/// Reservation details in API responses.
///
/// Record keys (`ID`, `CreatedAt`, `UpdatedAt`, `DeletedAt`) are capitalised;
/// booking fields are snake_case.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
pub struct ReservationDto {
    #[serde(rename = "ID")]
    pub id: ReservationId,
    #[serde(rename = "CreatedAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "UpdatedAt")]
    pub updated_at: DateTime<Utc>,
    /// Always `null`; reservations are never soft-deleted
    #[serde(rename = "DeletedAt")]
    pub deleted_at: Option<DateTime<Utc>>,
    pub user_id: AccountId,
    pub date: String,
    pub start_time: String,
    pub end_time: String,
}

impl From<Reservation> for ReservationDto {
    fn from(r: Reservation) -> Self {
        Self {
            id: r.id,
            user_id: r.owner_id,
            date: r.date.format(DATE_FORMAT).to_string(),
            start_time: r.window.start_label(),
            end_time: r.window.end_label(),
            created_at: r.created_at,
            updated_at: r.updated_at,
            deleted_at: None,
        }
    }
}
