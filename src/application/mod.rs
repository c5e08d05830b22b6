//! Application layer: use cases orchestrating the domain and its stores
pub mod booking;
pub mod identity;

pub use booking::{DateLocks, ReservationService};
pub use identity::{AccountService, AuthResult};
