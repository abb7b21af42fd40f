use crate::category::{category_label, resolve_category};
use crate::config::DrafterConfig;
use crate::coverage::{filter_uncovered, CoverageIndex};
use crate::drafter::Drafter;
use crate::llm_adapter::AnthropicClient;
use crate::scorer::Scorer;
use crate::selector::Selector;
use crate::sources::ArxivSource;
use crate::traits::{LanguageModel, PaperSource};
use crate::types::{DrafterError, OutputDocument, Result, SelectionResult};
use chrono::{DateTime, Utc};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

/// Inputs for one run
#[derive(Debug, Clone)]
pub struct PipelineRequest {
    pub category_override: Option<String>,
    pub prompt_template: String,
    /// Published and draft article directories scanned for already-covered papers
    pub coverage_dirs: Vec<PathBuf>,
    pub now: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct PipelineOutcome {
    pub category: String,
    pub category_label: String,
    pub selection: SelectionResult,
    pub document: OutputDocument,
}

/// fetch -> dedup -> score -> select -> draft -> assemble, strictly in sequence
pub struct ArticlePipeline {
    source: Box<dyn PaperSource>,
    selector: Selector,
    drafter: Drafter,
    fetch_count: usize,
}

impl ArticlePipeline {
    pub fn new(source: Box<dyn PaperSource>, model: Arc<dyn LanguageModel>, config: &DrafterConfig) -> Self {
        info!(
            "Pipeline using {} and {}",
            source.source_name(),
            model.adapter_name()
        );

        let scorer = Scorer::new(
            model.clone(),
            config.scoring_model.clone(),
            config.scoring_max_tokens,
        );
        let drafter = Drafter::new(
            model,
            config.drafting_model.clone(),
            config.drafting_max_tokens,
        );

        Self {
            source,
            selector: Selector::new(scorer),
            drafter,
            fetch_count: config.fetch_count,
        }
    }

    /// Wire the real arXiv listing and Anthropic clients
    pub fn from_config(config: &DrafterConfig) -> Result<Self> {
        let source = Box::new(ArxivSource::new(config)?);
        let model = Arc::new(AnthropicClient::new(config)?);
        Ok(Self::new(source, model, config))
    }

    pub async fn run(&self, request: &PipelineRequest) -> Result<PipelineOutcome> {
        let category = resolve_category(
            request.category_override.as_deref(),
            request.now,
            &mut rand::thread_rng(),
        );
        let label = category_label(&category);
        info!("Category: {} ({})", category, label);

        info!("Fetching papers...");
        let papers = self.source.fetch(&category, self.fetch_count).await?;
        if papers.is_empty() {
            return Err(DrafterError::NoPapersFound { category });
        }
        info!("Found {} papers", papers.len());

        let covered = CoverageIndex::build(&request.coverage_dirs)?;
        if !covered.is_empty() {
            info!("Excluding {} already-covered papers", covered.len());
        }

        let candidates = filter_uncovered(papers, &covered);
        if candidates.is_empty() {
            return Err(DrafterError::AllCovered {
                covered: covered.len(),
            });
        }

        let selection = self.selector.select(&candidates).await?;

        let drafted = self
            .drafter
            .draft(&selection.paper, &request.prompt_template, &selection.related)
            .await?;

        let document = OutputDocument::assemble(&drafted, &selection, &category, &label);

        Ok(PipelineOutcome {
            category,
            category_label: label,
            selection,
            document,
        })
    }
}
