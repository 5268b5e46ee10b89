//! Authentication primitives.
//!
//! Token issuance and session management live outside this service; this
//! module only validates HS256 access tokens minted by the identity
//! provider (and mints them itself in tests).

pub mod jwt;
