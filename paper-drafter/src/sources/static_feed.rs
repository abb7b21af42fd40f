use crate::traits::PaperSource;
use crate::types::{Paper, Result};
use async_trait::async_trait;
use tracing::debug;

/// Fixed in-memory source for dry runs and tests
pub struct StaticPaperSource {
    papers: Vec<Paper>,
}

impl StaticPaperSource {
    pub fn new(papers: Vec<Paper>) -> Self {
        Self { papers }
    }
}

#[async_trait]
impl PaperSource for StaticPaperSource {
    fn source_name(&self) -> String {
        format!("Static source ({} papers)", self.papers.len())
    }

    async fn fetch(&self, category: &str, max_results: usize) -> Result<Vec<Paper>> {
        debug!("Serving static papers for {}", category);
        Ok(self
            .papers
            .iter()
            .filter(|p| p.categories.is_empty() || p.categories.iter().any(|c| c == category))
            .take(max_results)
            .cloned()
            .collect())
    }
}
