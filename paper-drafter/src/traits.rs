use crate::types::{Paper, Result};
use async_trait::async_trait;

/// Trait for pulling candidate papers from a listing service
#[async_trait]
pub trait PaperSource: Send + Sync {
    /// Human-readable name for this source
    fn source_name(&self) -> String;

    /// Fetch at most `max_results` papers in `category`, newest submission first
    async fn fetch(&self, category: &str, max_results: usize) -> Result<Vec<Paper>>;
}

/// Trait for a text-in, text-out language model endpoint
#[async_trait]
pub trait LanguageModel: Send + Sync {
    /// Get the name of this adapter
    fn adapter_name(&self) -> String;

    /// Send a single user message and return the concatenated text reply
    async fn complete(&self, model: &str, user_message: &str, max_tokens: u32) -> Result<String>;
}
