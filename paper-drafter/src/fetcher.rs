use crate::config::DrafterConfig;
use crate::types::{DrafterError, Result};
use reqwest::Client;
use std::time::{Duration, Instant};
use tracing::{debug, info};
use url::Url;

/// Thin HTTP GET wrapper for the listing API. One attempt per call.
pub struct Fetcher {
    client: Client,
}

impl Fetcher {
    pub fn new(config: &DrafterConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(&config.user_agent)
            .timeout(Duration::from_secs(config.listing_timeout_seconds))
            .gzip(true)
            .deflate(true)
            .brotli(true)
            .build()?;

        Ok(Self { client })
    }

    /// Build the listing query for one category, newest submissions first
    pub fn listing_url(base: &str, category: &str, max_results: usize) -> Result<Url> {
        let mut url = Url::parse(base)?;
        url.query_pairs_mut()
            .append_pair("search_query", &format!("cat:{}", category))
            .append_pair("sortBy", "submittedDate")
            .append_pair("sortOrder", "descending")
            .append_pair("max_results", &max_results.to_string());
        Ok(url)
    }

    pub async fn fetch_text(&self, url: &Url) -> Result<String> {
        let start_time = Instant::now();
        debug!("Fetching listing: {}", url);

        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();

        if !status.is_success() {
            return Err(DrafterError::SourceFetch(format!(
                "HTTP {}: {}",
                status.as_u16(),
                status.canonical_reason().unwrap_or("Unknown")
            )));
        }

        let content = response.text().await?;
        info!(
            "Fetched listing ({} bytes in {} ms)",
            content.len(),
            start_time.elapsed().as_millis()
        );
        Ok(content)
    }
}
