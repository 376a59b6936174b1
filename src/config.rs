/// Configuration management for Chirp
///
/// This module handles loading and managing configuration from environment
/// variables.
use serde::{Deserialize, Serialize};

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Application settings
    pub app: AppConfig,
    /// CORS configuration
    pub cors: CorsConfig,
    /// Database configuration
    pub database: DatabaseConfig,
    /// Identity provider configuration
    pub identity: IdentityConfig,
    /// Session verification configuration
    pub session: SessionConfig,
    /// Query cache configuration
    pub cache: CacheConfig,
    /// Posting rate limit configuration
    pub rate_limit: RateLimitConfig,
}

/// Application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Application environment (dev, staging, prod)
    pub env: String,
    /// Server host to bind to
    pub host: String,
    /// Server port to bind to
    pub port: u16,
}

/// CORS configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorsConfig {
    /// Comma-separated list of allowed origins
    pub allowed_origins: String,
}

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Database URL
    pub url: String,
    /// Max connections in pool
    pub max_connections: u32,
}

/// Identity provider configuration
///
/// The provider owns accounts, sign-in/sign-out pages, and profile data.
/// This service only reads profiles and links to the hosted pages.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdentityConfig {
    /// Base URL of the provider's profile directory API
    pub base_url: String,
    /// Bearer key for the profile directory API
    pub api_key: String,
    /// Request timeout for provider calls
    pub timeout_secs: u64,
    /// Hosted sign-in page users are sent to
    pub sign_in_url: String,
    /// Hosted sign-out page users are sent to
    pub sign_out_url: String,
}

/// Session verification configuration
///
/// Sessions are minted by the identity provider as HS256 JWTs in a cookie;
/// this service only verifies them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Shared secret the provider signs session tokens with
    pub secret: String,
    /// Name of the session cookie
    pub cookie_name: String,
}

/// Query cache configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// TTL for the feed query
    pub feed_ttl_secs: u64,
    /// TTL for profile and single-post queries
    pub lookup_ttl_secs: u64,
}

/// Posting rate limit configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateLimitConfig {
    /// Posts allowed per user per minute
    pub posts_per_minute: u32,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, String> {
        let app_env = std::env::var("APP_ENV").unwrap_or_else(|_| "development".to_string());

        Ok(Config {
            app: AppConfig {
                env: app_env.clone(),
                host: std::env::var("CHIRP_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
                port: std::env::var("CHIRP_PORT")
                    .ok()
                    .and_then(|p| p.parse().ok())
                    .unwrap_or(8080),
            },
            cors: {
                let allowed_origins = match std::env::var("CORS_ALLOWED_ORIGINS") {
                    Ok(value) => value,
                    Err(_) if app_env.eq_ignore_ascii_case("production") => {
                        return Err("CORS_ALLOWED_ORIGINS must be set in production".to_string())
                    }
                    Err(_) => "http://localhost:3000".to_string(),
                };

                if app_env.eq_ignore_ascii_case("production") && allowed_origins.trim() == "*" {
                    return Err("CORS_ALLOWED_ORIGINS cannot be '*' in production".to_string());
                }

                CorsConfig { allowed_origins }
            },
            database: DatabaseConfig {
                url: std::env::var("DATABASE_URL")
                    .unwrap_or_else(|_| "postgresql://localhost/chirp".to_string()),
                max_connections: std::env::var("DATABASE_MAX_CONNECTIONS")
                    .ok()
                    .and_then(|c| c.parse().ok())
                    .unwrap_or(10),
            },
            identity: IdentityConfig {
                base_url: std::env::var("IDENTITY_BASE_URL")
                    .unwrap_or_else(|_| "http://localhost:9100".to_string()),
                api_key: {
                    let api_key =
                        std::env::var("IDENTITY_API_KEY").unwrap_or_else(|_| "".to_string());
                    if app_env.eq_ignore_ascii_case("production") && api_key.trim().is_empty() {
                        return Err("IDENTITY_API_KEY must be set in production".to_string());
                    }
                    api_key
                },
                timeout_secs: std::env::var("IDENTITY_TIMEOUT_SECS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(5),
                sign_in_url: std::env::var("IDENTITY_SIGN_IN_URL")
                    .unwrap_or_else(|_| "/sign-in".to_string()),
                sign_out_url: std::env::var("IDENTITY_SIGN_OUT_URL")
                    .unwrap_or_else(|_| "/sign-out".to_string()),
            },
            session: {
                let secret = match std::env::var("SESSION_SECRET") {
                    Ok(value) => value,
                    Err(_) if app_env.eq_ignore_ascii_case("production") => {
                        return Err("SESSION_SECRET must be set in production".to_string())
                    }
                    Err(_) => "dev-session-secret".to_string(),
                };

                SessionConfig {
                    secret,
                    cookie_name: std::env::var("SESSION_COOKIE_NAME")
                        .unwrap_or_else(|_| "__session".to_string()),
                }
            },
            cache: CacheConfig {
                feed_ttl_secs: std::env::var("FEED_CACHE_TTL_SECS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(30),
                lookup_ttl_secs: std::env::var("LOOKUP_CACHE_TTL_SECS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(300),
            },
            rate_limit: RateLimitConfig {
                posts_per_minute: std::env::var("POSTS_PER_MINUTE")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(3),
            },
        })
    }
}
