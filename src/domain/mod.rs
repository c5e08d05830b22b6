//! Domain layer
//!
//! Entities, business rules and repository interfaces. Nothing in here
//! knows about HTTP or about the concrete store.

pub mod account;
pub mod error;
pub mod repositories;
pub mod reservation;

pub use account::{Account, AccountId, AccountRepository, NewAccount};
pub use error::{DomainError, DomainResult};
pub use repositories::RepositoryProvider;
pub use reservation::{
    BusinessHours, NewReservation, Reservation, ReservationId, ReservationRepository, TimeWindow,
    WindowRejection,
};
