/// Post repository - handles all database operations for posts
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::Post;

/// Insert a new post and return the stored row
pub async fn insert_post(
    pool: &PgPool,
    author_id: &str,
    content: &str,
) -> Result<Post, sqlx::Error> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    sqlx::query_as::<_, Post>(
        r#"
        INSERT INTO posts (id, author_id, content, created_at)
        VALUES ($1, $2, $3, $4)
        RETURNING id, author_id, content, created_at
        "#,
    )
    .bind(id)
    .bind(author_id)
    .bind(content)
    .bind(now)
    .fetch_one(pool)
    .await
}

/// List posts newest-first. Feed order is whatever this returns.
pub async fn list_posts(pool: &PgPool, limit: i64) -> Result<Vec<Post>, sqlx::Error> {
    sqlx::query_as::<_, Post>(
        r#"
        SELECT id, author_id, content, created_at
        FROM posts
        ORDER BY created_at DESC, id DESC
        LIMIT $1
        "#,
    )
    .bind(limit)
    .fetch_all(pool)
    .await
}

/// Find a post by id
pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Post>, sqlx::Error> {
    sqlx::query_as::<_, Post>(
        r#"
        SELECT id, author_id, content, created_at
        FROM posts
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await
}
