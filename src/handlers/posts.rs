/// Post handlers - JSON endpoints for the feed and post creation
use actix_web::{web, HttpResponse};

use crate::error::Result;
use crate::middleware::CurrentUser;
use crate::models::CreatePostRequest;
use crate::state::AppState;

/// GET /api/v1/posts - the feed, newest first, authors attached
pub async fn get_posts(state: web::Data<AppState>) -> Result<HttpResponse> {
    let feed = state.feed.feed().await?;
    Ok(HttpResponse::Ok().json(feed))
}

/// POST /api/v1/posts - create a post as the signed-in user
pub async fn create_post(
    state: web::Data<AppState>,
    user: CurrentUser,
    req: web::Json<CreatePostRequest>,
) -> Result<HttpResponse> {
    let post = state.posts.create_post(&user.0.id, &req.content).await?;
    Ok(HttpResponse::Created().json(post))
}
