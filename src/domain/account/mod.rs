//! Account aggregate
//!
//! Contains the Account entity and its repository interface.

pub mod model;
pub mod repository;

pub use model::{Account, AccountId, NewAccount};
pub use repository::AccountRepository;
