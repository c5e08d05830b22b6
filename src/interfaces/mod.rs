//! Inbound adapters
pub mod http;
