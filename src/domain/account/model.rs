//! Account domain entity

use chrono::{DateTime, Utc};

/// Numeric account identifier, carried in issued credentials
pub type AccountId = i32;

/// Registered identity capable of owning reservations
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    pub id: AccountId,
    pub name: String,
    /// Unique across all accounts
    pub email: String,
    /// bcrypt hash, never the plain credential
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Account about to be persisted; the store assigns the id
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub name: String,
    pub email: String,
    pub password_hash: String,
}
