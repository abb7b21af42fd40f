use crate::scorer::truncate_chars;
use crate::traits::LanguageModel;
use crate::types::{DrafterError, Paper, Result};
use std::sync::Arc;
use tracing::info;

pub const RELATED_ABSTRACT_CHARS: usize = 200;
pub const RELATED_CATEGORY_LIMIT: usize = 3;

/// Asks the language model for the review article itself
pub struct Drafter {
    model: Arc<dyn LanguageModel>,
    model_name: String,
    max_tokens: u32,
}

impl Drafter {
    pub fn new(model: Arc<dyn LanguageModel>, model_name: String, max_tokens: u32) -> Self {
        Self {
            model,
            model_name,
            max_tokens,
        }
    }

    /// Returns the model's reply unmodified. An empty reply is `EmptyGeneration`,
    /// anything else that goes wrong is `Generation`.
    pub async fn draft(&self, paper: &Paper, prompt_template: &str, related: &[Paper]) -> Result<String> {
        info!(
            "Generating article with {} related papers as context...",
            related.len()
        );

        let request = build_draft_request(paper, prompt_template, related);
        self.model
            .complete(&self.model_name, &request, self.max_tokens)
            .await
            .map_err(|e| match e {
                DrafterError::EmptyGeneration => e,
                other => DrafterError::Generation(Box::new(other)),
            })
    }
}

pub fn build_draft_request(paper: &Paper, prompt_template: &str, related: &[Paper]) -> String {
    format!(
        "{}\n{}{}",
        prompt_template,
        render_paper_info(paper),
        render_related_section(related)
    )
}

fn render_paper_info(paper: &Paper) -> String {
    format!(
        "**Title**: {}\n\
         **Authors**: {}\n\
         **arXiv ID**: {}\n\
         **Categories**: {}\n\
         **Published**: {}\n\
         **URL**: {}\n\
         **PDF**: {}\n\n\
         **Abstract**:\n{}",
        paper.title,
        paper.authors.join(", "),
        paper.arxiv_id,
        paper.categories.join(", "),
        paper.published,
        paper.url,
        paper.pdf_url,
        paper.abstract_text
    )
}

fn render_related_section(related: &[Paper]) -> String {
    if related.is_empty() {
        return String::new();
    }

    let mut lines = vec!["\n\n# Related Papers (use these for comparison table)".to_string()];
    for rp in related {
        let categories: Vec<&str> = rp
            .categories
            .iter()
            .take(RELATED_CATEGORY_LIMIT)
            .map(String::as_str)
            .collect();
        lines.push(format!(
            "- [{}]({}) ({}): {}...",
            rp.title,
            rp.url,
            categories.join(", "),
            truncate_chars(&rp.abstract_text, RELATED_ABSTRACT_CHARS)
        ));
    }
    lines.join("\n")
}
