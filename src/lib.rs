//! # Booking Service
//!
//! Reservation API: accounts register and log in, then book time windows on
//! a date inside business hours. Overlapping bookings on the same date are
//! refused, including when the competing requests arrive concurrently.
//!
//! ## Architecture
//!
//! The project follows Clean Architecture principles:
//!
//! - **domain**: Entities, window rules, overlap predicate, repository traits
//! - **application**: Use cases (accounts, reservation lifecycle and queries)
//! - **infrastructure**: SeaORM store, in-memory store, JWT and bcrypt
//! - **interfaces**: REST API with Swagger documentation
//! - **config**: Environment-driven settings
//! - **shared**: Graceful shutdown

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;
pub mod shared;

pub use config::{AppConfig, ConfigError, StorageBackend};

// Re-export database types for easy access
pub use infrastructure::{init_database, DatabaseConfig, InMemoryRepositoryProvider, SeaOrmRepositoryProvider};

// Re-export API router
pub use interfaces::http::{create_api_router, AppState};
