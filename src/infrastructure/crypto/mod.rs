//! Credential primitives: JWT issuance/verification and password hashing

pub mod jwt;
pub mod password;
