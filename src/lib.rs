/// Chirp Service Library
///
/// A minimal status-update service: authenticated users post short text
/// messages, anyone can read the chronological feed and user profiles.
/// Accounts, sessions, and avatars are owned by an external identity
/// provider; posts are the only locally persisted entity.
///
/// # Modules
///
/// - `handlers`: HTTP request handlers (JSON API and HTML pages)
/// - `models`: Data structures for posts, authors, and sessions
/// - `services`: Business logic layer
/// - `db`: Database access layer and repositories
/// - `cache`: Query caching and invalidation events
/// - `identity`: Identity provider client and session verification
/// - `middleware`: Session extraction for HTTP requests
/// - `views`: Server-rendered HTML
/// - `error`: Error types and handling
/// - `config`: Configuration management
/// - `state`: Application state wiring
pub mod cache;
pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod identity;
pub mod middleware;
pub mod models;
pub mod services;
pub mod state;
pub mod views;

pub use config::Config;
pub use error::{AppError, Result};
pub use state::AppState;
