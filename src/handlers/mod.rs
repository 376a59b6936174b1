/// HTTP handlers
///
/// This module contains handlers for:
/// - Posts: JSON feed and create endpoints
/// - Profile: JSON profile lookup
/// - Pages: the server-rendered HTML surface
/// - Health: database-backed health probe
pub mod health;
pub mod pages;
pub mod posts;
pub mod profile;

// Re-export handler functions at module level
pub use health::health_check;
pub use pages::{home, post_page, profile_page, submit_post};
pub use posts::{create_post, get_posts};
pub use profile::get_profile;
