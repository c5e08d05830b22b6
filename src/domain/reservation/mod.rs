//! Reservation aggregate
//!
//! Contains the Reservation entity, the time-window rules, the overlap
//! scan and the repository interface.

pub mod conflict;
pub mod model;
pub mod repository;
pub mod window;

pub use conflict::{find_overlapping, has_conflict};
pub use model::{NewReservation, Reservation, ReservationId};
pub use repository::ReservationRepository;
pub use window::{BusinessHours, TimeWindow, WindowRejection, CLOCK_FORMAT, DATE_FORMAT};
