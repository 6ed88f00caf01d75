use bytes::Bytes;
use reqwest::Client;

use super::FetchError;

pub async fn fetch_rss(client: &Client, url: &str) -> Result<Bytes, FetchError> {
    let bytes = client.get(url).send().await?.bytes().await?;
    Ok(bytes)
}
