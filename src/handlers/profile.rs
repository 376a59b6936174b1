/// Profile handler - JSON profile lookup by username
use actix_web::{web, HttpResponse};

use crate::error::Result;
use crate::state::AppState;

/// GET /api/v1/profile/{username}
pub async fn get_profile(
    state: web::Data<AppState>,
    username: web::Path<String>,
) -> Result<HttpResponse> {
    let author = state.feed.profile(&username).await?;
    Ok(HttpResponse::Ok().json(author))
}
