use reqwest::Client;
use thiserror::Error;

mod fetch;
pub mod parse;
pub mod types;

pub use types::{FeedDocument, FeedItem};

/// Identifying header sent on every outbound request, per polite-crawling convention.
pub const USER_AGENT: &str = "egret";

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("invalid rss document: {0}")]
    Parse(#[from] rss::Error),
}

pub fn build_client() -> Result<Client, FetchError> {
    let client = Client::builder().user_agent(USER_AGENT).build()?;
    Ok(client)
}

/// Download and parse one RSS feed. No retry, no conditional GET; every call
/// re-downloads the full document.
pub async fn fetch_feed(client: &Client, url: &str) -> Result<FeedDocument, FetchError> {
    let xml = fetch::fetch_rss(client, url).await?;
    parse::parse_document(&xml)
}
