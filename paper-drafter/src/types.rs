use serde::{Deserialize, Deserializer, Serialize};

/// One arXiv submission as returned by the listing API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paper {
    pub arxiv_id: String,
    pub title: String,
    pub authors: Vec<String>,
    pub abstract_text: String,
    pub categories: Vec<String>,
    pub published: String, // ISO-8601, e.g. 2024-01-15T18:59:59Z
    pub url: String,
    pub pdf_url: String,
}

/// Editorial score the language model assigns to one candidate
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score {
    /// Position in the candidate list that was sent for scoring
    #[serde(default, deserialize_with = "lenient_opt_int")]
    pub index: Option<i64>,
    /// Echoed identifier, preferred over `index` when it names a candidate
    #[serde(default)]
    pub arxiv_id: Option<String>,
    #[serde(default, deserialize_with = "lenient_int")]
    pub novelty: i64,
    #[serde(default, deserialize_with = "lenient_int")]
    pub practical: i64,
    #[serde(default, deserialize_with = "lenient_int")]
    pub excitement: i64,
    #[serde(default, deserialize_with = "lenient_int")]
    pub total: i64,
    #[serde(default)]
    pub reason: String,
}

impl Score {
    /// Synthetic record used when scoring is unavailable: picks the newest candidate
    pub fn fallback() -> Self {
        Self {
            index: Some(0),
            arxiv_id: None,
            novelty: 0,
            practical: 0,
            excitement: 0,
            total: 0,
            reason: "fallback".to_string(),
        }
    }

    pub fn is_consistent(&self) -> bool {
        self.total == self.novelty + self.practical + self.excitement
    }
}

/// Models sometimes quote numbers ("index": "1") or emit 7.0
#[derive(Deserialize)]
#[serde(untagged)]
enum LenientInt {
    Int(i64),
    Float(f64),
    Text(String),
}

impl LenientInt {
    fn into_i64<E: serde::de::Error>(self) -> std::result::Result<i64, E> {
        match self {
            LenientInt::Int(n) => Ok(n),
            LenientInt::Float(f) if f.is_finite() => Ok(f.trunc() as i64),
            LenientInt::Float(f) => Err(E::custom(format!("invalid integer: {}", f))),
            LenientInt::Text(text) => text
                .trim()
                .parse()
                .map_err(|_| E::custom(format!("invalid integer: {:?}", text))),
        }
    }
}

fn lenient_int<'de, D>(deserializer: D) -> std::result::Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    LenientInt::deserialize(deserializer)?.into_i64()
}

fn lenient_opt_int<'de, D>(deserializer: D) -> std::result::Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<LenientInt>::deserialize(deserializer)?
        .map(LenientInt::into_i64)
        .transpose()
}

/// Result of the scoring step. Degraded carries the reason scoring was skipped.
#[derive(Debug)]
pub enum ScoringOutcome {
    Ranked(Vec<Score>),
    Degraded { cause: DrafterError },
}

impl ScoringOutcome {
    pub fn is_degraded(&self) -> bool {
        matches!(self, ScoringOutcome::Degraded { .. })
    }

    /// Highest-ranked record, or the fallback record when nothing usable came back
    pub fn best(&self) -> Score {
        match self {
            ScoringOutcome::Ranked(scores) => scores.first().cloned().unwrap_or_else(Score::fallback),
            ScoringOutcome::Degraded { .. } => Score::fallback(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct SelectionResult {
    pub paper: Paper,
    /// Every other candidate of the batch, in fetch order
    pub related: Vec<Paper>,
    pub score: Score,
    pub degraded: bool,
}

/// key=value sidecar consumed by CI
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleMetadata {
    pub arxiv_id: String,
    pub title: String,
    pub category: String,
    /// Reported total of the winning record; 0 after a fallback
    pub score: i64,
}

impl ArticleMetadata {
    pub fn render(&self) -> String {
        format!(
            "arxiv_id={}\ntitle={}\ncategory={}\nscore={}\n",
            self.arxiv_id, self.title, self.category, self.score
        )
    }
}

/// Final article in both renderings
#[derive(Debug, Clone)]
pub struct OutputDocument {
    /// Article without frontmatter
    pub body: String,
    /// Frontmatter, blank line, body
    pub full: String,
    pub metadata: ArticleMetadata,
}

#[derive(Debug, thiserror::Error)]
pub enum DrafterError {
    #[error("{var} is required")]
    MissingCredential { var: String },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Error fetching from arXiv: {0}")]
    SourceFetch(String),

    #[error("Feed parse error: {0}")]
    FeedParse(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("No papers found for {category}")]
    NoPapersFound { category: String },

    #[error("All recent papers have already been covered ({covered} known ids)")]
    AllCovered { covered: usize },

    #[error("No candidates to select from")]
    NoCandidates,

    #[error("Scoring failed: {0}")]
    Scoring(#[source] Box<DrafterError>),

    #[error("Claude API error: {message}")]
    Api { message: String },

    #[error("Claude API returned empty content")]
    EmptyGeneration,

    #[error("Error calling Claude API: {0}")]
    Generation(#[source] Box<DrafterError>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Directory walk error: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl DrafterError {
    /// True for errors the pipeline treats as "nothing to write about"
    pub fn is_no_candidates(&self) -> bool {
        matches!(
            self,
            DrafterError::NoCandidates
                | DrafterError::NoPapersFound { .. }
                | DrafterError::AllCovered { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, DrafterError>;
