/// Business logic layer
///
/// This module provides high-level operations:
/// - Post service: validated, rate-limited post creation
/// - Feed service: cached reads of the feed, single posts, and profiles
pub mod feed;
pub mod posts;

// Re-export commonly used services
pub use feed::FeedService;
pub use posts::PostService;
