//! Configuration module
//!
//! Settings are read once at start-up from the process environment (after
//! loading `.env`, if present) and handed to every component explicitly.

use std::str::FromStr;

use thiserror::Error;

use crate::domain::BusinessHours;
use crate::infrastructure::crypto::jwt::{JwtConfig, INSECURE_DEFAULT_SECRET, MAX_EXPIRATION_HOURS};
use crate::infrastructure::crypto::password::DEFAULT_COST;
use crate::infrastructure::DatabaseConfig;

/// `DB_URL` value selecting the in-memory store
pub const MEMORY_BACKEND: &str = "memory";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{key} must be a valid {expected}, got {value:?}")]
    InvalidValue {
        key: &'static str,
        expected: &'static str,
        value: String,
    },

    #[error("{key} is out of range: {reason}")]
    OutOfRange { key: &'static str, reason: String },
}

/// HTTP listener settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Seconds allowed for in-flight requests after a shutdown signal
    pub shutdown_timeout: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            shutdown_timeout: 30,
        }
    }
}

impl ServerConfig {
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Where accounts and reservations live
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageBackend {
    Database(DatabaseConfig),
    Memory,
}

/// Full application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub storage: StorageBackend,
    pub jwt: JwtConfig,
    pub bcrypt_cost: u32,
    /// Default tracing filter; `RUST_LOG` overrides it
    pub log_level: String,
    pub business_hours: BusinessHours,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            storage: StorageBackend::Database(DatabaseConfig::default()),
            jwt: JwtConfig::default(),
            bcrypt_cost: DEFAULT_COST,
            log_level: "info".to_string(),
            business_hours: BusinessHours::default(),
        }
    }
}

impl AppConfig {
    /// Load `.env` (if any) and read the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup.
    ///
    /// Unset or blank keys fall back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut cfg = Self::default();

        if let Some(host) = get("HOST") {
            cfg.server.host = host.trim().to_string();
        }
        if let Some(port) = get("PORT") {
            cfg.server.port = parse("PORT", "port number", &port)?;
        }
        if let Some(timeout) = get("SHUTDOWN_TIMEOUT_SECS") {
            cfg.server.shutdown_timeout = parse("SHUTDOWN_TIMEOUT_SECS", "number of seconds", &timeout)?;
        }

        let max_connections = match get("DB_MAX_CONNECTIONS") {
            Some(raw) => {
                let n: u32 = parse("DB_MAX_CONNECTIONS", "positive integer", &raw)?;
                if n == 0 {
                    return Err(ConfigError::OutOfRange {
                        key: "DB_MAX_CONNECTIONS",
                        reason: "must be at least 1".into(),
                    });
                }
                Some(n)
            }
            None => None,
        };
        if let Some(url) = get("DB_URL") {
            cfg.storage = if url.trim().eq_ignore_ascii_case(MEMORY_BACKEND) {
                StorageBackend::Memory
            } else {
                StorageBackend::Database(DatabaseConfig::from_db_url(&url))
            };
        }
        if let (StorageBackend::Database(db), Some(n)) = (&mut cfg.storage, max_connections) {
            *db = db.clone().with_max_connections(n);
        }

        if let Some(secret) = lookup("JWT_SECRET").filter(|v| !v.is_empty()) {
            cfg.jwt.secret = secret;
        }
        if let Some(hours) = get("JWT_EXPIRATION_HOURS") {
            let hours: i64 = parse("JWT_EXPIRATION_HOURS", "number of hours", &hours)?;
            if !(1..=MAX_EXPIRATION_HOURS).contains(&hours) {
                return Err(ConfigError::OutOfRange {
                    key: "JWT_EXPIRATION_HOURS",
                    reason: format!("{} not in 1..={}", hours, MAX_EXPIRATION_HOURS),
                });
            }
            cfg.jwt.expiration_hours = hours;
        }

        if let Some(cost) = get("BCRYPT_COST") {
            let cost: u32 = parse("BCRYPT_COST", "integer", &cost)?;
            if !(4..=31).contains(&cost) {
                return Err(ConfigError::OutOfRange {
                    key: "BCRYPT_COST",
                    reason: format!("{} not in 4..=31", cost),
                });
            }
            cfg.bcrypt_cost = cost;
        }

        if let Some(level) = get("LOG_LEVEL") {
            cfg.log_level = level.trim().to_string();
        }

        Ok(cfg)
    }

    /// True when tokens are signed with the built-in development secret
    pub fn uses_default_secret(&self) -> bool {
        self.jwt.secret == INSECURE_DEFAULT_SECRET
    }
}

fn parse<T: FromStr>(key: &'static str, expected: &'static str, raw: &str) -> Result<T, ConfigError> {
    raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
        key,
        expected,
        value: raw.to_string(),
    })
}
