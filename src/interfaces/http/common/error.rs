//! Mapping from domain failures to HTTP responses
//!
//! Every error body has the shape `{"error": "<message>"}`.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::error;
use utoipa::ToSchema;

use crate::domain::DomainError;

/// Message returned for any 5xx; the detail only goes to the log
pub const INTERNAL_ERROR_MESSAGE: &str = "internal server error";

/// JSON error envelope
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorBody {
    pub error: String,
}

/// An error ready to be rendered as a response
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn unauthorized() -> Self {
        Self::new(StatusCode::UNAUTHORIZED, "Unauthorized")
    }
}

/// HTTP status for each domain failure
pub fn status_for(err: &DomainError) -> StatusCode {
    match err {
        DomainError::MalformedInput(_)
        | DomainError::Validation(_)
        | DomainError::OverlapConflict
        | DomainError::UnknownOwner(_)
        | DomainError::DuplicateEmail(_) => StatusCode::BAD_REQUEST,
        DomainError::Unauthenticated | DomainError::InvalidCredential(_) => StatusCode::UNAUTHORIZED,
        DomainError::Persistence(_) | DomainError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        let status = status_for(&err);
        if status.is_server_error() {
            error!(kind = err.kind(), "Request failed: {}", err);
            return Self::new(status, INTERNAL_ERROR_MESSAGE);
        }
        Self::new(status, err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(ErrorBody { error: self.message })).into_response()
    }
}
