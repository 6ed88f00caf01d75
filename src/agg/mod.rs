use std::time::{Duration, Instant};

use anyhow::Result;
use clap::Args;
use reqwest::Client;
use sqlx::PgPool;
use tokio_util::sync::CancellationToken;

use crate::ingestion;
use crate::telemetry::{self, emit};
use crate::telemetry::ctx::LogCtx;
use crate::telemetry::ops::agg::{Agg, Phase as AggPhase};

mod db;
mod interval;
pub mod types;

/// egret agg <interval>
#[derive(Args)]
pub struct AggCmd {
    /// Time between fetches, e.g. "30s", "5m", "1h" (minimum 1s)
    pub interval: String,
}

/// The polling loop. One feed per tick, oldest first; runs until Ctrl-C.
pub async fn run(pool: &PgPool, args: AggCmd) -> Result<()> {
    let log = telemetry::agg();
    let every = interval::parse_interval(&args.interval)?;
    let _g = log.root_span_kv([("interval", args.interval.clone())]).entered();

    let client = ingestion::build_client()?;

    let token = CancellationToken::new();
    let ctrl = token.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            ctrl.cancel();
        }
    });

    log.info(format!("🕑 collecting feeds every {}", args.interval));
    // first tick completes immediately, so the first fetch happens right away
    let mut ticker = poll_ticker(every);
    loop {
        tokio::select! {
            _ = token.cancelled() => {
                log.info("👋 aggregation stopped");
                return Ok(());
            }
            _ = ticker.tick() => {}
        }
        // fetch/parse failures end the cycle, never the loop
        if let Err(err) = scrape_once(pool, &client, &token, &log).await {
            log.warn_kv("⚠️ cycle aborted", [("error", format!("{:#}", err))]);
        }
    }
}

/// A cycle that overruns the interval must not be followed by back-to-back
/// catch-up ticks; missed ticks are skipped so consecutive cycles always get
/// a full interval between them.
fn poll_ticker(every: Duration) -> tokio::time::Interval {
    let mut ticker = tokio::time::interval(every);
    ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
    ticker
}

/// One fetch cycle: select the stalest feed, stamp it, fetch, insert posts.
/// The stamp runs before the fetch and is never rolled back; a crash between
/// stamp and inserts leaves a fetched feed with no new posts, which is fine.
async fn scrape_once(
    pool: &PgPool,
    client: &Client,
    token: &CancellationToken,
    log: &LogCtx<Agg>,
) -> Result<()> {
    let t0 = Instant::now();
    let next = {
        let _s = log.span(&AggPhase::Select).entered();
        db::next_feed_to_fetch(pool).await?
    };
    let Some(feed) = next else {
        log.info("no feeds to fetch");
        return Ok(());
    };

    {
        let _s = log.span_kv(&AggPhase::Stamp, [("feed_id", feed.id.to_string())]).entered();
        db::mark_feed_fetched(pool, feed.id).await?;
    }

    let doc = {
        let _s = log.span_kv(&AggPhase::Fetch, [("url", feed.url.clone())]).entered();
        let fetched = tokio::select! {
            _ = token.cancelled() => return Ok(()),
            res = ingestion::fetch_feed(client, &feed.url) => res,
        };
        match fetched {
            Ok(doc) => doc,
            Err(err) => {
                // no rollback of the stamp; the next tick moves on to another feed
                log.warn_kv(
                    "⚠️ fetch failed",
                    [("feed", feed.name.clone()), ("url", feed.url.clone()), ("error", err.to_string())],
                );
                return Ok(());
            }
        }
    };

    let mut inserted = 0usize;
    let mut skipped = 0usize;
    for item in &doc.items {
        // unparseable dates are defaulted, never fatal
        let published_at = ingestion::parse::parse_pub_date(&item.pub_date);
        let _s = log.span_kv(&AggPhase::WritePost, [("url", item.link.clone())]).entered();
        if db::insert_post(pool, &item.title, &item.link, published_at, feed.id).await? {
            inserted += 1;
            log.info_kv("➕ post", [("title", item.title.clone())]);
        } else {
            skipped += 1;
        }
    }

    log.tick_summary(&feed.name, doc.items.len(), inserted, skipped);
    if telemetry::config::json_mode() {
        let summary = types::TickSummary {
            feed_id: feed.id,
            feed: feed.name,
            items: doc.items.len(),
            inserted,
            skipped,
        };
        let meta = emit::Meta { duration_ms: Some(t0.elapsed().as_millis()) };
        log.result_with_meta(&summary, meta)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn slow_cycle_does_not_burst_catch_up_ticks() {
        let mut ticker = poll_ticker(Duration::from_millis(100));
        ticker.tick().await; // first tick is immediate

        // a cycle that overruns several intervals
        tokio::time::sleep(Duration::from_millis(350)).await;

        let before = tokio::time::Instant::now();
        ticker.tick().await;
        let first = before.elapsed();
        ticker.tick().await;
        let second = before.elapsed();

        // the missed ticks must not fire back-to-back: the two cycles after
        // the stall are separated by a full interval
        assert!(second - first >= Duration::from_millis(100));
    }
}
