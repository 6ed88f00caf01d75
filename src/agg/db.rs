use anyhow::Result;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

#[derive(Debug, sqlx::FromRow)]
pub struct NextFeedRow {
    pub id: Uuid,
    pub name: String,
    pub url: String,
}

/// The globally-stalest feed: never-fetched feeds (NULL) sort first, then the
/// oldest `last_fetched_at`. Exactly one feed per tick.
pub async fn next_feed_to_fetch(pool: &PgPool) -> Result<Option<NextFeedRow>> {
    let row = sqlx::query_as::<_, NextFeedRow>(
        r#"
        SELECT id, name, url
        FROM feeds
        ORDER BY last_fetched_at ASC NULLS FIRST
        LIMIT 1
        "#,
    )
    .fetch_optional(pool)
    .await?;
    Ok(row)
}

/// Stamp the feed as fetched. Runs before the network call, so "fetched"
/// means "attempted"; a slow or failing fetch cannot re-win the next tick.
pub async fn mark_feed_fetched(pool: &PgPool, feed_id: Uuid) -> Result<()> {
    sqlx::query(
        r#"
        UPDATE feeds
        SET last_fetched_at = now(), updated_at = now()
        WHERE id = $1
        "#,
    )
    .bind(feed_id)
    .execute(pool)
    .await?;
    Ok(())
}

/// Insert one post; returns false when the (feed_id, url) pair already
/// exists. Live feeds legitimately re-serve items, so conflicts are expected.
pub async fn insert_post(
    pool: &PgPool,
    title: &str,
    url: &str,
    published_at: Option<DateTime<Utc>>,
    feed_id: Uuid,
) -> Result<bool> {
    let res = sqlx::query(
        r#"
        INSERT INTO posts (id, created_at, updated_at, title, url, published_at, feed_id)
        VALUES ($1, now(), now(), $2, $3, $4, $5)
        ON CONFLICT (feed_id, url) DO NOTHING
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(title)
    .bind(url)
    .bind(published_at)
    .bind(feed_id)
    .execute(pool)
    .await?;
    Ok(res.rows_affected() == 1)
}
