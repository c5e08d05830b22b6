//! Database entities module

pub mod account;
pub mod reservation;

pub use account::Entity as Account;
pub use reservation::Entity as Reservation;
