/// Session token verification
///
/// The identity provider mints HS256 session tokens and sets them in the
/// `__session` cookie. This service never issues tokens; it only verifies
/// the signature and expiry with the shared secret and reads the claims.
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};

use crate::config::SessionConfig;
use crate::error::{AppError, Result};
use crate::models::SessionUser;

/// Claims carried in a provider session token
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SessionClaims {
    pub sub: String,                // Subject (provider user ID)
    pub exp: usize,                 // Expiration time
    pub iat: usize,                 // Issued at
    pub preferred_username: String, // Public handle
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>, // Display name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub picture: Option<String>, // Avatar URL
}

/// Verifies provider-issued session tokens.
#[derive(Clone)]
pub struct SessionVerifier {
    decoding_key: DecodingKey,
    validation: Validation,
    cookie_name: String,
}

impl SessionVerifier {
    pub fn new(config: &SessionConfig) -> Self {
        Self {
            decoding_key: DecodingKey::from_secret(config.secret.as_bytes()),
            validation: Validation::new(Algorithm::HS256),
            cookie_name: config.cookie_name.clone(),
        }
    }

    /// Name of the cookie the provider stores the session token in.
    pub fn cookie_name(&self) -> &str {
        &self.cookie_name
    }

    /// Verify a session token and produce the signed-in user.
    pub fn verify(&self, token: &str) -> Result<SessionUser> {
        let data = decode::<SessionClaims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| AppError::Authentication(format!("Invalid session token: {}", e)))?;

        let claims = data.claims;
        Ok(SessionUser {
            id: claims.sub,
            username: claims.preferred_username,
            full_name: claims.name,
            profile_image_url: claims.picture,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{encode, EncodingKey, Header};

    fn test_config() -> SessionConfig {
        SessionConfig {
            secret: "test-secret".to_string(),
            cookie_name: "__session".to_string(),
        }
    }

    fn mint(secret: &str, exp_offset_secs: i64) -> String {
        let now = chrono::Utc::now().timestamp();
        let claims = SessionClaims {
            sub: "user_1".to_string(),
            exp: (now + exp_offset_secs) as usize,
            iat: now as usize,
            preferred_username: "addania".to_string(),
            name: Some("Addania Q".to_string()),
            picture: Some("https://img.example/a.png".to_string()),
        };
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    #[test]
    fn test_valid_token_yields_session_user() {
        let verifier = SessionVerifier::new(&test_config());
        let token = mint("test-secret", 3600);

        let user = verifier.verify(&token).unwrap();
        assert_eq!(user.id, "user_1");
        assert_eq!(user.username, "addania");
        assert_eq!(user.full_name.as_deref(), Some("Addania Q"));
    }

    #[test]
    fn test_wrong_secret_is_rejected() {
        let verifier = SessionVerifier::new(&test_config());
        let token = mint("other-secret", 3600);

        let err = verifier.verify(&token).unwrap_err();
        assert!(matches!(err, AppError::Authentication(_)));
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let verifier = SessionVerifier::new(&test_config());
        let token = mint("test-secret", -3600);

        assert!(verifier.verify(&token).is_err());
    }

    #[test]
    fn test_garbage_token_is_rejected() {
        let verifier = SessionVerifier::new(&test_config());
        assert!(verifier.verify("not-a-token").is_err());
    }
}
