use crate::traits::LanguageModel;
use crate::types::{DrafterError, Paper, Result, Score, ScoringOutcome};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Abstracts are cut to this many characters in the scoring request
pub const SCORING_ABSTRACT_CHARS: usize = 500;

const SCORING_PROMPT: &str = "\
You are an expert tech blog editor at an AI/CV startup.
Score each paper on how suitable it is for an engaging, insightful tech blog post.

Scoring criteria (each 1-10):
- **novelty**: How novel and groundbreaking is the approach?
- **practical**: How useful is this for engineers in production? (edge deployment, real datasets, etc.)
- **excitement**: How likely are engineers to share this and say \"this is cool\"?

Return ONLY a JSON array (no markdown fences) with objects containing:
- \"index\": the paper's index number (0-based)
- \"arxiv_id\": the paper's arXiv ID exactly as listed
- \"novelty\": score 1-10
- \"practical\": score 1-10
- \"excitement\": score 1-10
- \"total\": sum of the three scores
- \"reason\": one-sentence explanation in Japanese

Papers:
";

/// Ranks candidates by editorial appeal using a language model
pub struct Scorer {
    model: Arc<dyn LanguageModel>,
    model_name: String,
    max_tokens: u32,
}

impl Scorer {
    pub fn new(model: Arc<dyn LanguageModel>, model_name: String, max_tokens: u32) -> Self {
        Self {
            model,
            model_name,
            max_tokens,
        }
    }

    /// Scores sorted by `total` descending; ties keep the order of the reply.
    /// Every failure is reported as `DrafterError::Scoring`.
    pub async fn score(&self, candidates: &[Paper]) -> Result<Vec<Score>> {
        info!("Scoring {} papers with {}...", candidates.len(), self.model_name);

        let request = build_scoring_request(candidates);
        let raw = self
            .model
            .complete(&self.model_name, &request, self.max_tokens)
            .await
            .map_err(|e| DrafterError::Scoring(Box::new(e)))?;

        let scores = parse_scores(&raw).map_err(|e| DrafterError::Scoring(Box::new(e)))?;
        debug!("Received {} score records", scores.len());
        Ok(scores)
    }

    /// Like `score`, but a failure becomes a degraded outcome instead of an error
    pub async fn evaluate(&self, candidates: &[Paper]) -> ScoringOutcome {
        match self.score(candidates).await {
            Ok(scores) => ScoringOutcome::Ranked(scores),
            Err(cause) => {
                warn!("Scoring failed, falling back to latest paper: {}", cause);
                ScoringOutcome::Degraded { cause }
            }
        }
    }
}

pub fn build_scoring_request(candidates: &[Paper]) -> String {
    let summaries: Vec<String> = candidates
        .iter()
        .enumerate()
        .map(|(i, p)| {
            format!(
                "[{}] {}\n    arXiv ID: {}\n    Categories: {}\n    Abstract: {}",
                i,
                p.title,
                p.arxiv_id,
                p.categories.join(", "),
                truncate_chars(&p.abstract_text, SCORING_ABSTRACT_CHARS)
            )
        })
        .collect();

    format!("{}{}", SCORING_PROMPT, summaries.join("\n\n"))
}

/// Parse a JSON array of scores, tolerating a surrounding ``` fence, and rank it
pub fn parse_scores(raw: &str) -> Result<Vec<Score>> {
    let cleaned = strip_code_fence(raw);
    let mut scores: Vec<Score> = serde_json::from_str(cleaned)?;

    for score in scores.iter().filter(|s| !s.is_consistent()) {
        debug!(
            "Score total {} differs from component sum for index {:?}; using reported total",
            score.total, score.index
        );
    }

    // stable: equal totals stay in reply order
    scores.sort_by(|a, b| b.total.cmp(&a.total));
    Ok(scores)
}

/// Drop an opening fence line and everything from the last closing fence
pub fn strip_code_fence(raw: &str) -> &str {
    let cleaned = raw.trim();
    if !cleaned.starts_with("```") {
        return cleaned;
    }

    let without_opening = cleaned.split_once('\n').map(|(_, rest)| rest).unwrap_or("");
    without_opening
        .rsplit_once("```")
        .map(|(inner, _)| inner)
        .unwrap_or(without_opening)
}

pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}
