//! JWT Token handling

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::AccountId;

/// Longest accepted token lifetime (one year)
pub const MAX_EXPIRATION_HOURS: i64 = 24 * 365;

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("token lifetime of {0} hours is out of range")]
    Lifetime(i64),

    #[error(transparent)]
    Jwt(#[from] jsonwebtoken::errors::Error),
}

/// JWT configuration
#[derive(Clone)]
pub struct JwtConfig {
    /// Secret key for signing tokens
    pub secret: String,
    /// Token expiration time in hours
    pub expiration_hours: i64,
    /// Issuer claim
    pub issuer: String,
}

impl std::fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &"***")
            .field("expiration_hours", &self.expiration_hours)
            .field("issuer", &self.issuer)
            .finish()
    }
}

/// Signing key used when `JWT_SECRET` is not set. Must be overridden in production.
pub const INSECURE_DEFAULT_SECRET: &str = "defaultsecret";

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: INSECURE_DEFAULT_SECRET.to_string(),
            expiration_hours: 24,
            issuer: "booking-service".to_string(),
        }
    }
}

/// JWT claims: the account id plus expiry
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct TokenClaims {
    /// Owning account
    pub user_id: AccountId,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Issuer
    pub iss: String,
}

impl TokenClaims {
    /// Claims issued now, expiring after `config.expiration_hours`
    pub fn new(account_id: AccountId, config: &JwtConfig) -> Result<Self, TokenError> {
        let hours = config.expiration_hours;
        let lifetime = Duration::try_hours(hours)
            .filter(|_| (1..=MAX_EXPIRATION_HOURS).contains(&hours))
            .ok_or(TokenError::Lifetime(hours))?;

        let now = Utc::now();
        let exp = now
            .checked_add_signed(lifetime)
            .ok_or(TokenError::Lifetime(hours))?;

        Ok(Self {
            user_id: account_id,
            exp: exp.timestamp(),
            iat: now.timestamp(),
            iss: config.issuer.clone(),
        })
    }
}

/// Create a signed token for an account
pub fn create_token(account_id: AccountId, config: &JwtConfig) -> Result<String, TokenError> {
    let claims = TokenClaims::new(account_id, config)?;
    Ok(encode_claims(&claims, config)?)
}

pub(crate) fn encode_claims(
    claims: &TokenClaims,
    config: &JwtConfig,
) -> Result<String, jsonwebtoken::errors::Error> {
    encode(
        &Header::default(),
        claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
}

/// Verify signature, issuer and expiry, and decode into typed claims
pub fn verify_token(
    token: &str,
    config: &JwtConfig,
) -> Result<TokenClaims, jsonwebtoken::errors::Error> {
    let mut validation = Validation::default();
    validation.set_issuer(&[&config.issuer]);
    validation.set_required_spec_claims(&["exp", "iss"]);

    let token_data = decode::<TokenClaims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &validation,
    )?;

    Ok(token_data.claims)
}
