use crate::config::DrafterConfig;
use crate::fetcher::Fetcher;
use crate::parser::PaperParser;
use crate::traits::PaperSource;
use crate::types::{Paper, Result};
use async_trait::async_trait;
use tracing::{error, info};

/// arXiv Atom listing API
pub struct ArxivSource {
    pub listing_url: String,
    fetcher: Fetcher,
}

impl ArxivSource {
    pub fn new(config: &DrafterConfig) -> Result<Self> {
        Ok(Self {
            listing_url: config.listing_url.clone(),
            fetcher: Fetcher::new(config)?,
        })
    }
}

#[async_trait]
impl PaperSource for ArxivSource {
    fn source_name(&self) -> String {
        url::Url::parse(&self.listing_url)
            .ok()
            .and_then(|parsed| parsed.domain().map(|d| format!("arXiv ({})", d)))
            .unwrap_or_else(|| "arXiv".to_string())
    }

    async fn fetch(&self, category: &str, max_results: usize) -> Result<Vec<Paper>> {
        info!("Fetching up to {} papers in {} from {}", max_results, category, self.source_name());

        let url = Fetcher::listing_url(&self.listing_url, category, max_results)?;
        let content = self.fetcher.fetch_text(&url).await.map_err(|e| {
            error!("Failed to fetch listing for {}: {}", category, e);
            e
        })?;

        PaperParser::parse_listing(&content, max_results)
    }
}
