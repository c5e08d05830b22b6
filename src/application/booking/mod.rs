//! Reservation lifecycle: validation, conflict detection, persistence and
//! per-date reads

pub mod locks;
pub mod service;

pub use locks::{DateGuard, DateLocks};
pub use service::ReservationService;
