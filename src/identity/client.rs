/// Profile directory client
///
/// Reads public profiles from the identity provider's directory API:
///
/// - Batch lookup by user id: GET /v1/profiles?user_id={id}&user_id={id}
/// - Single lookup by username: GET /v1/profiles/by-username/{username}
///
/// Both endpoints are authenticated with a bearer API key. Profiles are
/// read-only here; account lifecycle stays with the provider.
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use tracing::{debug, error};

use crate::config::IdentityConfig;
use crate::error::{AppError, Result};
use crate::models::Author;

/// Read access to the provider's profile directory.
///
/// Abstracted so tests can substitute an in-memory directory.
#[async_trait]
pub trait ProfileProvider: Send + Sync {
    /// Batch-fetch profiles by provider user id. Ids the provider does not
    /// know are simply absent from the result.
    async fn profiles_by_ids(&self, ids: &[String]) -> Result<Vec<Author>>;

    /// Look up a single profile by username.
    async fn profile_by_username(&self, username: &str) -> Result<Option<Author>>;
}

/// HTTP implementation backed by the hosted provider.
#[derive(Clone)]
pub struct IdentityClient {
    config: IdentityConfig,
    http: Client,
}

impl IdentityClient {
    pub fn new(config: IdentityConfig) -> Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { config, http })
    }
}

/// Wire shape of a directory profile.
#[derive(Debug, Deserialize)]
struct ProfileRecord {
    user_id: String,
    username: String,
    #[serde(default)]
    profile_picture: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ProfileListResponse {
    profiles: Vec<ProfileRecord>,
}

impl From<ProfileRecord> for Author {
    fn from(record: ProfileRecord) -> Self {
        Author {
            id: record.user_id,
            username: record.username,
            profile_picture: record.profile_picture.unwrap_or_default(),
        }
    }
}

#[async_trait]
impl ProfileProvider for IdentityClient {
    async fn profiles_by_ids(&self, ids: &[String]) -> Result<Vec<Author>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let url = format!("{}/v1/profiles", self.config.base_url);
        let query: Vec<(&str, &str)> = ids.iter().map(|id| ("user_id", id.as_str())).collect();

        debug!(count = ids.len(), "Fetching profiles from identity provider");

        let response = self
            .http
            .get(&url)
            .header("Authorization", format!("Bearer {}", self.config.api_key))
            .query(&query)
            .send()
            .await
            .map_err(|e| AppError::Provider(format!("HTTP request failed: {}", e)))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "Failed to read response body".to_string());

        if !status.is_success() {
            error!(
                status = %status,
                body = %body,
                "Profile batch lookup failed"
            );
            return Err(AppError::Provider(format!(
                "Profile lookup failed ({}): {}",
                status, body
            )));
        }

        let list: ProfileListResponse = serde_json::from_str(&body)
            .map_err(|e| AppError::Provider(format!("Failed to parse profile response: {}", e)))?;

        Ok(list.profiles.into_iter().map(Author::from).collect())
    }

    async fn profile_by_username(&self, username: &str) -> Result<Option<Author>> {
        let url = format!(
            "{}/v1/profiles/by-username/{}",
            self.config.base_url, username
        );

        debug!(username = %username, "Fetching profile from identity provider");

        let response = self
            .http
            .get(&url)
            .header("Authorization", format!("Bearer {}", self.config.api_key))
            .send()
            .await
            .map_err(|e| AppError::Provider(format!("HTTP request failed: {}", e)))?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        let status = response.status();
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "Failed to read response body".to_string());

        if !status.is_success() {
            error!(
                status = %status,
                body = %body,
                username = %username,
                "Profile username lookup failed"
            );
            return Err(AppError::Provider(format!(
                "Profile lookup failed ({}): {}",
                status, body
            )));
        }

        let record: ProfileRecord = serde_json::from_str(&body)
            .map_err(|e| AppError::Provider(format!("Failed to parse profile response: {}", e)))?;

        Ok(Some(record.into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_record_maps_to_author() {
        let record = ProfileRecord {
            user_id: "user_1".to_string(),
            username: "addania".to_string(),
            profile_picture: Some("https://img.example/a.png".to_string()),
        };

        let author: Author = record.into();
        assert_eq!(author.id, "user_1");
        assert_eq!(author.username, "addania");
        assert_eq!(author.profile_picture, "https://img.example/a.png");
    }

    #[test]
    fn test_missing_picture_maps_to_empty_url() {
        let record = ProfileRecord {
            user_id: "user_1".to_string(),
            username: "addania".to_string(),
            profile_picture: None,
        };

        let author: Author = record.into();
        assert_eq!(author.profile_picture, "");
    }

    #[test]
    fn test_profile_list_response_parses() {
        let json = r#"{"profiles":[{"user_id":"u1","username":"a","profile_picture":"p"},{"user_id":"u2","username":"b"}]}"#;
        let list: ProfileListResponse = serde_json::from_str(json).unwrap();
        assert_eq!(list.profiles.len(), 2);
        assert!(list.profiles[1].profile_picture.is_none());
    }
}
