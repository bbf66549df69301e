use super::client::HttpClient;
use anyhow::{Context, Result};
use async_trait::async_trait;
use std::time::Duration;

/// Plain `reqwest` client with connect and request timeouts.
pub struct BasicClient(reqwest::Client);

impl BasicClient {
    pub fn new() -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .build()
            .context("failed to build HTTP client")?;
        Ok(Self(client))
    }
}

#[async_trait]
impl HttpClient for BasicClient {
    async fn execute(&self, req: reqwest::Request) -> reqwest::Result<reqwest::Response> {
        self.0.execute(req).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_builds_client() {
        assert!(BasicClient::new().is_ok());
    }
}
