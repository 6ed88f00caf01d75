use anyhow::Result;
use clap::Args;
use serde::Serialize;
use sqlx::PgPool;

use crate::config::Config;
use crate::telemetry::{self};
use crate::telemetry::ops::browse::Phase as BrowsePhase;
use crate::users;

mod db;

/// egret browse [--limit N]
#[derive(Args)]
pub struct BrowseCmd {
    /// Max number of posts to show
    #[arg(long, default_value_t = 2)]
    pub limit: i64,
}

#[derive(Serialize)]
struct BrowseList {
    posts: Vec<db::BrowsePostRow>,
}

pub async fn run(pool: &PgPool, cfg: &Config, args: BrowseCmd) -> Result<()> {
    let log = telemetry::browse();
    let _g = log.root_span_kv([("limit", args.limit.to_string())]).entered();

    let user = users::require_current(pool, cfg).await?;

    let _s = log.span(&BrowsePhase::List).entered();
    let posts = db::recent_posts(pool, user.id, args.limit).await?;
    log.info(format!("📰 {} post(s) for {}:", posts.len(), user.name));
    for p in &posts {
        let when = p
            .published_at
            .map(|d| d.to_rfc2822())
            .unwrap_or_else(|| "unknown date".to_string());
        log.info(format!("[{}] {} — {} ({})", p.feed_name, p.title, p.url, when));
    }
    if telemetry::config::json_mode() {
        let list = BrowseList { posts };
        log.result(&list)?;
    }
    Ok(())
}
