//! Account service: application-layer orchestration
//!
//! Registration, login and credential resolution. HTTP handlers are thin
//! wrappers that delegate here.

use std::sync::Arc;

use tracing::{debug, info};

use crate::domain::{Account, AccountId, DomainError, DomainResult, NewAccount, RepositoryProvider};
use crate::infrastructure::crypto::jwt::{create_token, JwtConfig};
use crate::infrastructure::crypto::password::{hash_password, verify_password};

use super::credentials::resolve_account;

const INVALID_LOGIN: &str = "invalid email or password";

/// Issued credential plus the account it belongs to
#[derive(Debug, Clone)]
pub struct AuthResult {
    pub token: String,
    pub account: Account,
}

pub struct AccountService {
    repos: Arc<dyn RepositoryProvider>,
    jwt_config: Arc<JwtConfig>,
    bcrypt_cost: u32,
}

impl AccountService {
    pub fn new(repos: Arc<dyn RepositoryProvider>, jwt_config: Arc<JwtConfig>, bcrypt_cost: u32) -> Self {
        Self {
            repos,
            jwt_config,
            bcrypt_cost,
        }
    }

    // ── Registration ────────────────────────────────────────────

    /// Register a new account and issue its first credential.
    pub async fn register(&self, name: &str, email: &str, password: &str) -> DomainResult<AuthResult> {
        let name = name.trim();
        let email = email.trim();
        if name.is_empty() || email.is_empty() || password.is_empty() {
            return Err(DomainError::MalformedInput("All fields are required".into()));
        }

        if self.repos.accounts().find_by_email(email).await?.is_some() {
            debug!(email, "Registration rejected, email taken");
            return Err(DomainError::DuplicateEmail(email.to_string()));
        }

        let password_hash = self.hash(password.to_string()).await?;

        // The store re-checks uniqueness, closing the lookup/insert race.
        let account = self
            .repos
            .accounts()
            .create(NewAccount {
                name: name.to_string(),
                email: email.to_string(),
                password_hash,
            })
            .await?;

        info!(account_id = account.id, "New account registered");
        self.issue(account)
    }

    // ── Authentication ──────────────────────────────────────────

    /// Check email + password and issue a credential.
    pub async fn login(&self, email: &str, password: &str) -> DomainResult<AuthResult> {
        let Some(account) = self.repos.accounts().find_by_email(email.trim()).await? else {
            return Err(DomainError::InvalidCredential(INVALID_LOGIN.into()));
        };

        if !self.verify(password.to_string(), account.password_hash.clone()).await? {
            debug!(account_id = account.id, "Login rejected");
            return Err(DomainError::InvalidCredential(INVALID_LOGIN.into()));
        }

        info!(account_id = account.id, "Account logged in");
        self.issue(account)
    }

    /// Resolve the caller's account id from an `Authorization` header value.
    pub fn authenticate(&self, authorization: Option<&str>) -> DomainResult<AccountId> {
        resolve_account(authorization, &self.jwt_config)
    }

    // ── Helpers ─────────────────────────────────────────────────

    fn issue(&self, account: Account) -> DomainResult<AuthResult> {
        let token = create_token(account.id, &self.jwt_config)
            .map_err(|e| DomainError::Internal(format!("Failed to generate token: {}", e)))?;

        Ok(AuthResult { token, account })
    }

    async fn hash(&self, password: String) -> DomainResult<String> {
        let cost = self.bcrypt_cost;
        tokio::task::spawn_blocking(move || hash_password(&password, cost))
            .await
            .map_err(|e| DomainError::Internal(format!("Hashing task failed: {}", e)))?
            .map_err(|e| DomainError::Internal(format!("Failed to hash password: {}", e)))
    }

    /// An unreadable stored hash counts as a mismatch.
    async fn verify(&self, password: String, hash: String) -> DomainResult<bool> {
        let outcome = tokio::task::spawn_blocking(move || verify_password(&password, &hash))
            .await
            .map_err(|e| DomainError::Internal(format!("Verification task failed: {}", e)))?;

        Ok(outcome.unwrap_or_else(|e| {
            debug!(error = %e, "Stored password hash could not be verified");
            false
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::storage::InMemoryRepositoryProvider;

    fn service() -> AccountService {
        AccountService::new(
            Arc::new(InMemoryRepositoryProvider::new()),
            Arc::new(JwtConfig::default()),
            4,
        )
    }

    #[tokio::test]
    async fn register_issues_token_for_new_account() {
        let svc = service();
        let auth = svc.register("Ana", "ana@example.com", "secret").await.unwrap();

        assert_eq!(auth.account.email, "ana@example.com");
        assert_ne!(auth.account.password_hash, "secret");

        let header = format!("Bearer {}", auth.token);
        assert_eq!(svc.authenticate(Some(&header)).unwrap(), auth.account.id);
    }

    #[tokio::test]
    async fn register_requires_every_field() {
        let svc = service();
        for (name, email, password) in [
            ("", "ana@example.com", "secret"),
            ("Ana", "  ", "secret"),
            ("Ana", "ana@example.com", ""),
        ] {
            let err = svc.register(name, email, password).await.unwrap_err();
            assert!(matches!(err, DomainError::MalformedInput(_)));
        }
    }

    #[tokio::test]
    async fn register_rejects_duplicate_email() {
        let svc = service();
        svc.register("Ana", "ana@example.com", "secret").await.unwrap();

        let err = svc.register("Other", "ana@example.com", "x").await.unwrap_err();
        assert!(matches!(err, DomainError::DuplicateEmail(_)));
        assert_eq!(err.to_string(), "email already in use");
    }

    #[tokio::test]
    async fn login_with_correct_password() {
        let svc = service();
        let registered = svc.register("Ana", "ana@example.com", "secret").await.unwrap();

        let auth = svc.login("ana@example.com", "secret").await.unwrap();
        assert_eq!(auth.account.id, registered.account.id);
    }

    #[tokio::test]
    async fn login_failures_are_indistinguishable() {
        let svc = service();
        svc.register("Ana", "ana@example.com", "secret").await.unwrap();

        let wrong_password = svc.login("ana@example.com", "nope").await.unwrap_err();
        let unknown_email = svc.login("bob@example.com", "secret").await.unwrap_err();

        assert!(matches!(wrong_password, DomainError::InvalidCredential(_)));
        assert_eq!(wrong_password.to_string(), unknown_email.to_string());
    }

    #[tokio::test]
    async fn corrupt_stored_hash_is_a_plain_login_failure() {
        let repos: Arc<dyn RepositoryProvider> = Arc::new(InMemoryRepositoryProvider::new());
        repos
            .accounts()
            .create(NewAccount {
                name: "Ana".into(),
                email: "ana@example.com".into(),
                password_hash: "not-a-bcrypt-hash".into(),
            })
            .await
            .unwrap();
        let svc = AccountService::new(repos, Arc::new(JwtConfig::default()), 4);

        let err = svc.login("ana@example.com", "secret").await.unwrap_err();
        assert!(matches!(err, DomainError::InvalidCredential(_)));
        assert_eq!(err.to_string(), svc.login("bob@example.com", "x").await.unwrap_err().to_string());
    }

    #[tokio::test]
    async fn unrepresentable_token_lifetime_is_an_internal_error() {
        let svc = AccountService::new(
            Arc::new(InMemoryRepositoryProvider::new()),
            Arc::new(JwtConfig {
                expiration_hours: 3_000_000_000,
                ..JwtConfig::default()
            }),
            4,
        );

        let err = svc.register("Ana", "ana@example.com", "secret").await.unwrap_err();
        assert!(matches!(err, DomainError::Internal(_)));
    }
}
