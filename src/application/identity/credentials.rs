//! Bearer credential resolution
//!
//! Turns an `Authorization` header into exactly one account id or a typed
//! failure. Claims are decoded into `TokenClaims`; there is no untyped claim
//! access anywhere.

use crate::domain::{AccountId, DomainError, DomainResult};
use crate::infrastructure::crypto::jwt::{verify_token, JwtConfig};

const BEARER_PREFIX: &str = "Bearer ";

/// Extract the token from an `Authorization: Bearer <token>` header value
pub fn bearer_token(authorization: Option<&str>) -> DomainResult<&str> {
    let header = authorization.ok_or(DomainError::Unauthenticated)?;
    let token = header
        .strip_prefix(BEARER_PREFIX)
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| DomainError::InvalidCredential("Malformed authorization header".into()))?;
    Ok(token)
}

/// Resolve the caller's account from an `Authorization` header value
pub fn resolve_account(authorization: Option<&str>, config: &JwtConfig) -> DomainResult<AccountId> {
    let token = bearer_token(authorization)?;
    let claims = verify_token(token, config)
        .map_err(|e| DomainError::InvalidCredential(format!("Invalid token: {}", e)))?;
    Ok(claims.user_id)
}
