//! Identity: registration, login and credential resolution

pub mod credentials;
pub mod service;

pub use credentials::{bearer_token, resolve_account};
pub use service::{AccountService, AuthResult};
