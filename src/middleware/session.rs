/// Session cookie extractors
///
/// The identity provider issues an HS256 JWT in a cookie; these extractors
/// verify it per request and hand handlers a typed `SessionUser`.
use actix_web::{dev::Payload, web, Error, FromRequest, HttpRequest};
use futures_util::future::{ready, Ready};
use tracing::debug;

use crate::error::{AppError, Result};
use crate::identity::SessionVerifier;
use crate::models::SessionUser;

/// The signed-in user. Extraction fails with 401 when the session cookie
/// is missing, malformed, or expired.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub SessionUser);

/// The signed-in user, if any. Extraction never fails; an unusable cookie
/// renders the request signed-out.
#[derive(Debug, Clone)]
pub struct MaybeUser(pub Option<SessionUser>);

fn session_from_request(req: &HttpRequest) -> Result<SessionUser> {
    let verifier = req
        .app_data::<web::Data<SessionVerifier>>()
        .ok_or_else(|| AppError::Internal("Session verifier not configured".to_string()))?;

    let cookie = req
        .cookie(verifier.cookie_name())
        .ok_or_else(|| AppError::Authentication("Missing session cookie".to_string()))?;

    verifier.verify(cookie.value())
}

impl FromRequest for CurrentUser {
    type Error = Error;
    type Future = Ready<std::result::Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(
            session_from_request(req)
                .map(CurrentUser)
                .map_err(Error::from),
        )
    }
}

impl FromRequest for MaybeUser {
    type Error = Error;
    type Future = Ready<std::result::Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let user = match session_from_request(req) {
            Ok(user) => Some(user),
            Err(err) => {
                debug!("No usable session on request: {}", err);
                None
            }
        };
        ready(Ok(MaybeUser(user)))
    }
}

#[cfg(test)]
mod tests {
    use actix_web::cookie::Cookie;
    use actix_web::test::TestRequest;
    use chrono::Utc;
    use jsonwebtoken::{encode, EncodingKey, Header};

    use super::*;
    use crate::config::SessionConfig;
    use crate::identity::SessionClaims;

    const SECRET: &str = "test-session-secret";

    fn verifier() -> SessionVerifier {
        SessionVerifier::new(&SessionConfig {
            secret: SECRET.to_string(),
            cookie_name: "__session".to_string(),
        })
    }

    fn mint(secret: &str, exp_offset_secs: i64) -> String {
        let now = Utc::now().timestamp();
        let claims = SessionClaims {
            sub: "user_1".to_string(),
            exp: (now + exp_offset_secs) as usize,
            iat: now as usize,
            preferred_username: "addania".to_string(),
            name: Some("Addania Q".to_string()),
            picture: None,
        };
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    #[actix_web::test]
    async fn test_current_user_extracts_valid_session() {
        let (req, mut payload) = TestRequest::default()
            .app_data(web::Data::new(verifier()))
            .cookie(Cookie::new("__session", mint(SECRET, 3600)))
            .to_http_parts();

        let user = CurrentUser::from_request(&req, &mut payload)
            .await
            .unwrap();
        assert_eq!(user.0.id, "user_1");
        assert_eq!(user.0.username, "addania");
    }

    #[actix_web::test]
    async fn test_current_user_rejects_missing_cookie() {
        let (req, mut payload) = TestRequest::default()
            .app_data(web::Data::new(verifier()))
            .to_http_parts();

        let err = CurrentUser::from_request(&req, &mut payload)
            .await
            .unwrap_err();
        assert_eq!(
            err.as_response_error().status_code(),
            actix_web::http::StatusCode::UNAUTHORIZED
        );
    }

    #[actix_web::test]
    async fn test_current_user_rejects_token_signed_with_other_secret() {
        let (req, mut payload) = TestRequest::default()
            .app_data(web::Data::new(verifier()))
            .cookie(Cookie::new("__session", mint("other-secret", 3600)))
            .to_http_parts();

        let err = CurrentUser::from_request(&req, &mut payload)
            .await
            .unwrap_err();
        assert_eq!(
            err.as_response_error().status_code(),
            actix_web::http::StatusCode::UNAUTHORIZED
        );
    }

    #[actix_web::test]
    async fn test_maybe_user_is_none_without_valid_session() {
        let (req, mut payload) = TestRequest::default()
            .app_data(web::Data::new(verifier()))
            .cookie(Cookie::new("__session", "not-a-jwt"))
            .to_http_parts();

        let user = MaybeUser::from_request(&req, &mut payload).await.unwrap();
        assert!(user.0.is_none());
    }

    #[actix_web::test]
    async fn test_maybe_user_present_for_valid_session() {
        let (req, mut payload) = TestRequest::default()
            .app_data(web::Data::new(verifier()))
            .cookie(Cookie::new("__session", mint(SECRET, 3600)))
            .to_http_parts();

        let user = MaybeUser::from_request(&req, &mut payload).await.unwrap();
        assert_eq!(user.0.unwrap().username, "addania");
    }
}
