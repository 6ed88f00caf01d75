use anyhow::Result;
use serde::Serialize;
use sqlx::PgPool;
use uuid::Uuid;

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct FeedRow {
    pub id: Uuid,
    pub name: String,
    pub url: String,
}

#[derive(Debug, Serialize, sqlx::FromRow)]
pub struct FeedWithCreatorRow {
    pub name: String,
    pub url: String,
    pub user_name: String,
}

pub async fn create_feed(pool: &PgPool, name: &str, url: &str, user_id: Uuid) -> Result<FeedRow> {
    // duplicate URLs surface as the store's uniqueness error
    let row = sqlx::query_as::<_, FeedRow>(
        r#"
        INSERT INTO feeds (id, created_at, updated_at, name, url, user_id)
        VALUES ($1, now(), now(), $2, $3, $4)
        RETURNING id, name, url
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(name)
    .bind(url)
    .bind(user_id)
    .fetch_one(pool)
    .await?;
    Ok(row)
}

pub async fn get_feed_by_url(pool: &PgPool, url: &str) -> Result<Option<FeedRow>> {
    let row = sqlx::query_as::<_, FeedRow>(
        r#"
        SELECT id, name, url
        FROM feeds
        WHERE url = $1
        "#,
    )
    .bind(url)
    .fetch_optional(pool)
    .await?;
    Ok(row)
}

pub async fn list_feeds_with_creator(pool: &PgPool) -> Result<Vec<FeedWithCreatorRow>> {
    let rows = sqlx::query_as::<_, FeedWithCreatorRow>(
        r#"
        SELECT f.name, f.url, u.name AS user_name
        FROM feeds f
        JOIN users u ON u.id = f.user_id
        ORDER BY f.created_at
        "#,
    )
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

pub async fn create_feed_follow(pool: &PgPool, user_id: Uuid, feed_id: Uuid) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO feed_follows (id, created_at, updated_at, user_id, feed_id)
        VALUES ($1, now(), now(), $2, $3)
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(user_id)
    .bind(feed_id)
    .execute(pool)
    .await?;
    Ok(())
}

pub async fn list_following(pool: &PgPool, user_id: Uuid) -> Result<Vec<String>> {
    let names = sqlx::query_scalar::<_, String>(
        r#"
        SELECT f.name
        FROM feed_follows ff
        JOIN feeds f ON f.id = ff.feed_id
        WHERE ff.user_id = $1
        ORDER BY f.name
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;
    Ok(names)
}

/// Returns true when a follow row was actually removed.
pub async fn delete_feed_follow(pool: &PgPool, user_id: Uuid, url: &str) -> Result<bool> {
    let res = sqlx::query(
        r#"
        DELETE FROM feed_follows ff
        USING feeds f
        WHERE ff.feed_id = f.id AND ff.user_id = $1 AND f.url = $2
        "#,
    )
    .bind(user_id)
    .bind(url)
    .execute(pool)
    .await?;
    Ok(res.rows_affected() > 0)
}
