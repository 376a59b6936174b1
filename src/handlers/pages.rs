/// Page handlers - the server-rendered HTML surface
use actix_web::http::StatusCode;
use actix_web::{web, HttpResponse, ResponseError};
use chrono::Utc;
use serde::Deserialize;
use tracing::error;
use uuid::Uuid;

use crate::error::AppError;
use crate::middleware::{CurrentUser, MaybeUser};
use crate::models::SessionUser;
use crate::state::AppState;
use crate::views::{self, ComposerState};

fn html_response(status: StatusCode, body: String) -> HttpResponse {
    HttpResponse::build(status)
        .content_type("text/html; charset=utf-8")
        .body(body)
}

fn not_found_response() -> HttpResponse {
    html_response(StatusCode::NOT_FOUND, views::not_found_page())
}

/// Render the home page around the given composer state. The feed query
/// failing renders the inline error notice rather than failing the page.
async fn render_home(
    state: &AppState,
    user: Option<&SessionUser>,
    composer: &ComposerState,
    status: StatusCode,
) -> HttpResponse {
    let feed = match state.feed.feed().await {
        Ok(rows) => Some(rows),
        Err(err) => {
            error!("Feed query failed: {}", err);
            None
        }
    };

    html_response(
        status,
        views::home_page(
            user,
            feed.as_deref(),
            composer,
            &state.config.identity,
            Utc::now(),
        ),
    )
}

/// GET / - the feed plus, when signed in, the composer
pub async fn home(state: web::Data<AppState>, user: MaybeUser) -> HttpResponse {
    render_home(
        &state,
        user.0.as_ref(),
        &ComposerState::default(),
        StatusCode::OK,
    )
    .await
}

/// GET /@{username} - profile page
pub async fn profile_page(
    state: web::Data<AppState>,
    username: web::Path<String>,
) -> HttpResponse {
    match state.feed.profile(&username).await {
        Ok(author) => html_response(StatusCode::OK, views::profile_page(&author)),
        Err(AppError::NotFound(_)) => not_found_response(),
        Err(err) => {
            error!("Profile query failed: {}", err);
            html_response(err.status_code(), views::error_page())
        }
    }
}

/// GET /post/{id} - permalink page for a single post
pub async fn post_page(state: web::Data<AppState>, id: web::Path<String>) -> HttpResponse {
    // A non-UUID id is an unknown post, not a client error
    let id = match Uuid::parse_str(&id) {
        Ok(id) => id,
        Err(_) => return not_found_response(),
    };

    match state.feed.post(id).await {
        Ok(row) => html_response(StatusCode::OK, views::permalink_page(&row, Utc::now())),
        Err(AppError::NotFound(_)) => not_found_response(),
        Err(err) => {
            error!("Post query failed: {}", err);
            html_response(err.status_code(), views::error_page())
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct PostForm {
    pub content: String,
}

/// POST /posts - composer form submission.
///
/// Success redirects back to the feed (303), which re-renders with an
/// empty input; the create already invalidated the feed key so the
/// redirected read refetches. Failure re-renders the page with the input
/// preserved and the first content-field message, or the generic failure
/// line when the error carries no field details.
pub async fn submit_post(
    state: web::Data<AppState>,
    user: CurrentUser,
    form: web::Form<PostForm>,
) -> HttpResponse {
    match state.posts.create_post(&user.0.id, &form.content).await {
        Ok(_) => HttpResponse::SeeOther()
            .insert_header(("Location", "/"))
            .finish(),
        Err(err) => {
            let message = err
                .first_field_message("content")
                .unwrap_or("Failed to post! Please try again later.")
                .to_string();
            let composer = ComposerState {
                input: form.content.clone(),
                error: Some(message),
            };
            render_home(&state, Some(&user.0), &composer, err.status_code()).await
        }
    }
}
