//! HTTP loading of remote datasets.

mod basic;
mod client;

pub use basic::BasicClient;
pub use client::HttpClient;

use anyhow::{Context, Result};
use tracing::debug;

/// Downloads `url` and returns the response body. Non-success statuses are
/// errors.
pub async fn fetch_bytes<C: HttpClient>(client: &C, url: &str) -> Result<Vec<u8>> {
    let req = reqwest::Request::new(
        reqwest::Method::GET,
        url.parse::<reqwest::Url>().with_context(|| format!("invalid URL '{url}'"))?,
    );

    let resp = client.execute(req).await?.error_for_status()?;
    let bytes = resp.bytes().await?.to_vec();
    debug!(url, bytes = bytes.len(), "Dataset downloaded");
    Ok(bytes)
}

/// Reads a dataset from a local path, or fetches it when `source` is an
/// HTTP(S) URL.
#[tracing::instrument(skip_all, fields(source = %source))]
pub async fn load_source(source: &str) -> Result<Vec<u8>> {
    if source.starts_with("http://") || source.starts_with("https://") {
        let client = BasicClient::new()?;
        fetch_bytes(&client, source).await
    } else {
        std::fs::read(source).with_context(|| format!("failed to read {source}"))
    }
}
