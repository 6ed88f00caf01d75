use anyhow::{bail, Result};
use clap::Args;
use sqlx::PgPool;
use url::Url;

use crate::config::Config;
use crate::telemetry::{self};
use crate::telemetry::ops::feed::Phase as FeedPhase;
use crate::users;

pub mod db;
pub mod types;

/// egret addfeed <name> <url>
#[derive(Args)]
pub struct AddFeedCmd {
    pub name: String,
    pub url: String,
}

/// egret follow <url>
#[derive(Args)]
pub struct FollowCmd {
    pub url: String,
}

/// egret unfollow <url>
#[derive(Args)]
pub struct UnfollowCmd {
    pub url: String,
}

pub async fn add(pool: &PgPool, cfg: &Config, args: AddFeedCmd) -> Result<()> {
    let log = telemetry::feed();
    let _g = log.root_span_kv([
        ("name", args.name.clone()),
        ("url", args.url.clone()),
    ]).entered();

    // URL validation (friendly error before DB I/O)
    validate_feed_url(&args.url)?;

    let user = users::require_current(pool, cfg).await?;

    let _s = log.span(&FeedPhase::Add).entered();
    let feed = db::create_feed(pool, &args.name, &args.url, user.id).await?;
    // the creator follows their own feed
    db::create_feed_follow(pool, user.id, feed.id).await?;

    log.info(format!("➕ feed {} added, followed by {}", feed.name, user.name));
    if telemetry::config::json_mode() {
        let result = types::FeedAddResult {
            id: feed.id,
            name: feed.name,
            url: feed.url,
            followed_by: user.name,
        };
        log.result(&result)?;
    }
    Ok(())
}

pub async fn list(pool: &PgPool) -> Result<()> {
    let log = telemetry::feed();
    let _g = log.root_span().entered();
    let _s = log.span(&FeedPhase::List).entered();

    let feeds = db::list_feeds_with_creator(pool).await?;
    log.info("📡 Feeds:");
    for row in &feeds {
        log.info(format!("{} ({}) added by {}", row.name, row.url, row.user_name));
    }
    if telemetry::config::json_mode() {
        let list = types::FeedList { feeds };
        log.result(&list)?;
    }
    Ok(())
}

pub async fn follow(pool: &PgPool, cfg: &Config, args: FollowCmd) -> Result<()> {
    let log = telemetry::feed();
    let _g = log.root_span_kv([("url", args.url.clone())]).entered();

    let user = users::require_current(pool, cfg).await?;

    let _s = log.span(&FeedPhase::Follow).entered();
    let Some(feed) = db::get_feed_by_url(pool, &args.url).await? else {
        bail!("no feed with URL {}; add it first with `egret addfeed`", args.url);
    };
    db::create_feed_follow(pool, user.id, feed.id).await?;

    log.info(format!("📡 {} now follows {}", user.name, feed.name));
    if telemetry::config::json_mode() {
        let result = types::FollowResult { feed: feed.name, user: user.name };
        log.result(&result)?;
    }
    Ok(())
}

pub async fn following(pool: &PgPool, cfg: &Config) -> Result<()> {
    let log = telemetry::feed();
    let _g = log.root_span().entered();

    let user = users::require_current(pool, cfg).await?;

    let _s = log.span(&FeedPhase::Following).entered();
    let names = db::list_following(pool, user.id).await?;
    log.info(format!("📡 {} follows {} feed(s):", user.name, names.len()));
    for name in &names {
        log.info(format!("* {}", name));
    }
    if telemetry::config::json_mode() {
        let list = types::FollowingList { feeds: names };
        log.result(&list)?;
    }
    Ok(())
}

pub async fn unfollow(pool: &PgPool, cfg: &Config, args: UnfollowCmd) -> Result<()> {
    let log = telemetry::feed();
    let _g = log.root_span_kv([("url", args.url.clone())]).entered();

    let user = users::require_current(pool, cfg).await?;

    let _s = log.span(&FeedPhase::Unfollow).entered();
    let removed = db::delete_feed_follow(pool, user.id, &args.url).await?;
    if removed {
        log.info(format!("➖ {} unfollowed {}", user.name, args.url));
    } else {
        log.warn(format!("{} was not following {}", user.name, args.url));
    }
    if telemetry::config::json_mode() {
        let result = types::UnfollowResult { url: args.url, removed };
        log.result(&result)?;
    }
    Ok(())
}

fn validate_feed_url(url: &str) -> Result<()> {
    if Url::parse(url).is_err() {
        bail!("Invalid URL: {}", url);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_absolute_urls() {
        assert!(validate_feed_url("https://blog.example.com/index.xml").is_ok());
    }

    #[test]
    fn rejects_relative_or_garbage_urls() {
        assert!(validate_feed_url("not a url").is_err());
        assert!(validate_feed_url("/index.xml").is_err());
    }
}
