/// Data models for Chirp
///
/// This module defines structures for:
/// - Post: the only locally persisted entity
/// - Author: public profile data owned by the identity provider
/// - PostWithAuthor: the feed's join shape
/// - SessionUser: the signed-in user decoded from the provider session
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

/// Maximum post length in characters.
pub const MAX_POST_CHARS: usize = 280;

/// A status post. Immutable once created; never deleted here.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: Uuid,
    pub content: String,
    pub created_at: DateTime<Utc>,
    /// Provider user id of the author; opaque to this service.
    pub author_id: String,
}

/// Public profile data, read-only from this service's perspective.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Author {
    pub id: String,
    pub username: String,
    pub profile_picture: String,
}

/// Denormalized feed row; a transient response shape, never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostWithAuthor {
    pub post: Post,
    pub author: Author,
}

/// The signed-in user as decoded from the provider session token.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionUser {
    pub id: String,
    pub username: String,
    pub full_name: Option<String>,
    pub profile_image_url: Option<String>,
}

impl SessionUser {
    /// Display name for greetings; falls back to the username.
    pub fn display_name(&self) -> &str {
        self.full_name.as_deref().unwrap_or(&self.username)
    }
}

/// Create-post input, shared by the JSON and form surfaces.
///
/// The non-empty check happens after trimming at the service boundary,
/// so only the upper bound lives here.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreatePostRequest {
    #[validate(length(max = 280, message = "Content must be 280 characters or fewer"))]
    pub content: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_post_serializes_with_camel_case_keys() {
        let post = Post {
            id: Uuid::nil(),
            content: "hello".to_string(),
            created_at: DateTime::parse_from_rfc3339("2024-01-01T00:00:00Z")
                .unwrap()
                .with_timezone(&Utc),
            author_id: "user_1".to_string(),
        };

        let json = serde_json::to_value(&post).unwrap();
        assert_eq!(json["authorId"], "user_1");
        assert!(json["createdAt"].is_string());
        assert!(json.get("author_id").is_none());
    }

    #[test]
    fn test_author_serializes_with_camel_case_keys() {
        let author = Author {
            id: "user_1".to_string(),
            username: "addania".to_string(),
            profile_picture: "https://img.example/1.png".to_string(),
        };

        let json = serde_json::to_value(&author).unwrap();
        assert_eq!(json["profilePicture"], "https://img.example/1.png");
    }

    #[test]
    fn test_display_name_falls_back_to_username() {
        let mut user = SessionUser {
            id: "user_1".to_string(),
            username: "addania".to_string(),
            full_name: Some("Addania Q".to_string()),
            profile_image_url: None,
        };
        assert_eq!(user.display_name(), "Addania Q");

        user.full_name = None;
        assert_eq!(user.display_name(), "addania");
    }

    #[test]
    fn test_create_post_request_rejects_overlong_content() {
        use validator::Validate;

        let request = CreatePostRequest {
            content: "x".repeat(281),
        };
        assert!(request.validate().is_err());

        let request = CreatePostRequest {
            content: "x".repeat(280),
        };
        assert!(request.validate().is_ok());

        let request = CreatePostRequest {
            content: "x".to_string(),
        };
        assert!(request.validate().is_ok());
    }
}
