use crate::scorer::Scorer;
use crate::types::{DrafterError, Paper, Result, ScoringOutcome, SelectionResult};
use tracing::{info, warn};

/// Picks exactly one candidate, degrading to the newest one when scoring fails
pub struct Selector {
    scorer: Scorer,
}

impl Selector {
    pub fn new(scorer: Scorer) -> Self {
        Self { scorer }
    }

    pub async fn select(&self, candidates: &[Paper]) -> Result<SelectionResult> {
        if candidates.is_empty() {
            return Err(DrafterError::NoCandidates);
        }

        let outcome = self.scorer.evaluate(candidates).await;
        choose(candidates, &outcome)
    }
}

/// Resolve a scoring outcome against the exact candidate list that was scored
pub fn choose(candidates: &[Paper], outcome: &ScoringOutcome) -> Result<SelectionResult> {
    if candidates.is_empty() {
        return Err(DrafterError::NoCandidates);
    }

    let best = outcome.best();
    let position = resolve_position(candidates, best.arxiv_id.as_deref(), best.index);
    let paper = candidates[position].clone();

    info!(
        "Selected (score={}): {} ({})",
        best.total, paper.title, paper.arxiv_id
    );
    if !best.reason.is_empty() {
        info!("  Reason: {}", best.reason);
    }

    // matched by id, not position, so a clamped index cannot drop the wrong paper
    let related = candidates
        .iter()
        .filter(|p| p.arxiv_id != paper.arxiv_id)
        .cloned()
        .collect();

    Ok(SelectionResult {
        paper,
        related,
        score: best,
        degraded: outcome.is_degraded(),
    })
}

fn resolve_position(candidates: &[Paper], arxiv_id: Option<&str>, index: Option<i64>) -> usize {
    if let Some(id) = arxiv_id {
        if let Some(pos) = candidates.iter().position(|p| p.arxiv_id == id) {
            return pos;
        }
        warn!("Scored arXiv ID {} is not among the candidates, using index", id);
    }

    let index = index.unwrap_or(0);
    if index < 0 || index as usize >= candidates.len() {
        warn!(
            "Scored index {} is out of range for {} candidates, clamping to 0",
            index,
            candidates.len()
        );
        return 0;
    }
    index as usize
}
