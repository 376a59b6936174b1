//! Identity provider integration
//!
//! The hosted provider owns accounts, sessions, and profile data. This
//! module holds the HTTP client for its profile directory and the verifier
//! for the session tokens it mints. Nothing here writes to the provider.

pub mod client;
pub mod session;

pub use client::{IdentityClient, ProfileProvider};
pub use session::{SessionClaims, SessionVerifier};
