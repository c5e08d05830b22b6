//! Reservation module: create and list per date

pub mod dto;
pub mod handlers;

pub use dto::*;
pub use handlers::*;
