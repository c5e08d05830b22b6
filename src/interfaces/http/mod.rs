//! HTTP REST API interfaces
//!
//! - `common`: error rendering and the validating JSON extractor
//! - `middleware`: bearer authentication
//! - `modules`: handlers and DTOs per resource
//! - `router`: API router with Swagger documentation

pub mod common;
pub mod middleware;
pub mod modules;
pub mod router;

pub use router::{create_api_router, ApiDoc, AppState};
