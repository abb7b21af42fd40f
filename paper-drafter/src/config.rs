use crate::types::{DrafterError, Result};
use std::env;

pub const API_KEY_VAR: &str = "ANTHROPIC_API_KEY";

#[derive(Debug, Clone)]
pub struct DrafterConfig {
    pub api_key: String,
    pub listing_url: String,
    pub messages_url: String,
    pub api_version: String,
    pub drafting_model: String,
    pub scoring_model: String,
    pub drafting_max_tokens: u32,
    pub scoring_max_tokens: u32,
    pub user_agent: String,
    pub listing_timeout_seconds: u64,
    pub generation_timeout_seconds: u64,
    pub fetch_count: usize,
}

impl Default for DrafterConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            listing_url: "https://export.arxiv.org/api/query".to_string(),
            messages_url: "https://api.anthropic.com/v1/messages".to_string(),
            api_version: "2023-06-01".to_string(),
            drafting_model: "claude-sonnet-4-5-20250929".to_string(),
            scoring_model: "claude-haiku-4-5-20251001".to_string(),
            drafting_max_tokens: 8192,
            scoring_max_tokens: 4096,
            user_agent: "paper-drafter/0.1".to_string(),
            listing_timeout_seconds: 30,
            generation_timeout_seconds: 120,
            fetch_count: 20,
        }
    }
}

impl DrafterConfig {
    /// Load from the process environment. Fails when the API key is missing or blank.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as `from_env` with an explicit lookup, so callers never have to touch the real environment
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup(API_KEY_VAR)
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| DrafterError::MissingCredential {
                var: API_KEY_VAR.to_string(),
            })?;

        let mut config = Self {
            api_key,
            ..Self::default()
        };

        if let Some(url) = lookup("ARXIV_API_URL") {
            config.listing_url = url;
        }
        if let Some(url) = lookup("ANTHROPIC_API_URL") {
            config.messages_url = url;
        }
        if let Some(model) = lookup("DRAFTING_MODEL") {
            config.drafting_model = model;
        }
        if let Some(model) = lookup("SCORING_MODEL") {
            config.scoring_model = model;
        }

        Ok(config)
    }
}
