//! Authentication middleware for Axum

use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::{header, Request},
    middleware::Next,
    response::{IntoResponse, Response},
};
use tracing::debug;

use crate::application::AccountService;
use crate::domain::AccountId;
use crate::interfaces::http::common::ApiError;

/// State the middleware needs to verify bearer credentials
#[derive(Clone)]
pub struct AuthState {
    pub accounts: Arc<AccountService>,
}

/// Identity of the caller, inserted into request extensions once the bearer
/// credential has been verified.
///
/// Extract in handlers: `Extension(caller): Extension<AuthenticatedAccount>`
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AuthenticatedAccount {
    pub account_id: AccountId,
}

/// Bearer authentication middleware
///
/// Every failure (no header, wrong scheme, bad signature, expired) is
/// answered with the same `401 {"error": "Unauthorized"}`.
pub async fn auth_middleware(
    State(auth_state): State<AuthState>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    let auth_header = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok());

    match auth_state.accounts.authenticate(auth_header) {
        Ok(account_id) => {
            request
                .extensions_mut()
                .insert(AuthenticatedAccount { account_id });
            next.run(request).await
        }
        Err(e) => {
            debug!(reason = e.kind(), "Rejected credential: {}", e);
            ApiError::unauthorized().into_response()
        }
    }
}
