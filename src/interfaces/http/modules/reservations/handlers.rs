//! Reservation HTTP handlers

use std::sync::Arc;

use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::{Extension, Json};
use chrono::NaiveDate;

use super::dto::*;
use crate::application::ReservationService;
use crate::domain::reservation::DATE_FORMAT;
use crate::interfaces::http::common::{ApiError, ErrorBody, ValidatedJson};
use crate::interfaces::http::middleware::AuthenticatedAccount;

/// Application state for reservation handlers.
#[derive(Clone)]
pub struct ReservationAppState {
    pub reservations: Arc<ReservationService>,
}

fn parse_date(raw: &str) -> Result<NaiveDate, ApiError> {
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT)
        .map_err(|_| ApiError::bad_request("Invalid date format"))
}

#[utoipa::path(
    post,
    path = "/reservations",
    tag = "Reservations",
    security(("bearer_auth" = [])),
    request_body = CreateReservationRequest,
    responses(
        (status = 201, description = "Reservation created", body = ReservationDto),
        (status = 400, description = "Invalid input, rule violation or overlap", body = ErrorBody),
        (status = 401, description = "Missing or invalid bearer token", body = ErrorBody)
    )
)]
pub async fn create_reservation(
    State(state): State<ReservationAppState>,
    Extension(caller): Extension<AuthenticatedAccount>,
    ValidatedJson(request): ValidatedJson<CreateReservationRequest>,
) -> Result<(StatusCode, Json<ReservationDto>), ApiError> {
    let date = parse_date(&request.date)?;

    let reservation = state
        .reservations
        .create_reservation(caller.account_id, date, &request.start_time, &request.end_time)
        .await?;

    Ok((StatusCode::CREATED, Json(reservation.into())))
}

#[utoipa::path(
    get,
    path = "/reservations",
    tag = "Reservations",
    security(("bearer_auth" = [])),
    params(ListReservationsQuery),
    responses(
        (status = 200, description = "Reservations on the date, by start time", body = [ReservationDto]),
        (status = 400, description = "Missing or malformed date", body = ErrorBody),
        (status = 401, description = "Missing or invalid bearer token", body = ErrorBody)
    )
)]
pub async fn list_reservations(
    State(state): State<ReservationAppState>,
    query: Result<Query<ListReservationsQuery>, QueryRejection>,
) -> Result<Json<Vec<ReservationDto>>, ApiError> {
    let Query(query) = query.map_err(|_| ApiError::bad_request("Invalid input"))?;
    let raw = query
        .date
        .filter(|d| !d.trim().is_empty())
        .ok_or_else(|| ApiError::bad_request("date query param is required"))?;
    let date = parse_date(&raw)?;

    let reservations = state.reservations.reservations_on_date(date).await?;
    Ok(Json(reservations.into_iter().map(ReservationDto::from).collect()))
}
