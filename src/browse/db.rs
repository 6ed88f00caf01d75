use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::PgPool;
use uuid::Uuid;

#[derive(Debug, Serialize, sqlx::FromRow)]
pub struct BrowsePostRow {
    pub title: String,
    pub url: String,
    pub published_at: Option<DateTime<Utc>>,
    pub feed_name: String,
}

pub async fn recent_posts(pool: &PgPool, user_id: Uuid, limit: i64) -> Result<Vec<BrowsePostRow>> {
    let rows = sqlx::query_as::<_, BrowsePostRow>(
        r#"
        SELECT p.title, p.url, p.published_at, f.name AS feed_name
        FROM posts p
        JOIN feeds f ON f.id = p.feed_id
        JOIN feed_follows ff ON ff.feed_id = p.feed_id
        WHERE ff.user_id = $1
        ORDER BY p.published_at DESC NULLS LAST
        LIMIT $2
        "#,
    )
    .bind(user_id)
    .bind(limit)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}
