use crate::types::{DrafterError, Paper, Result};
use chrono::{DateTime, Utc};
use feed_rs::parser;
use tracing::{debug, info};

/// Marker separating the service prefix from the paper id in entry ids and links
pub const ABS_MARKER: &str = "/abs/";
pub const ABS_URL_PREFIX: &str = "https://arxiv.org/abs/";
pub const PDF_URL_PREFIX: &str = "https://arxiv.org/pdf/";

pub struct PaperParser;

impl PaperParser {
    /// Parse an arXiv Atom listing into papers, keeping feed order
    pub fn parse_listing(content: &str, max_results: usize) -> Result<Vec<Paper>> {
        debug!("Parsing listing content ({} bytes)", content.len());

        let feed = parser::parse(content.as_bytes())
            .map_err(|e| DrafterError::FeedParse(format!("Failed to parse feed: {}", e)))?;

        let papers: Vec<Paper> = feed
            .entries
            .into_iter()
            .map(Self::parse_entry)
            .take(max_results)
            .collect();

        info!("Parsed listing with {} papers", papers.len());
        Ok(papers)
    }

    fn parse_entry(entry: feed_rs::model::Entry) -> Paper {
        let arxiv_id = strip_id_prefix(&entry.id);

        let title = entry
            .title
            .map(|t| collapse_whitespace(&t.content))
            .unwrap_or_default();

        let abstract_text = entry
            .summary
            .map(|s| collapse_whitespace(&s.content))
            .unwrap_or_default();

        let authors = entry.authors.into_iter().map(|a| a.name).collect();

        let categories = entry.categories.into_iter().map(|c| c.term).collect();

        let published = entry
            .published
            .or(entry.updated)
            .map(format_timestamp)
            .unwrap_or_default();

        // The downloadable form is the link titled "pdf"; the last one wins if repeated
        let pdf_url = entry
            .links
            .iter()
            .filter(|link| link.title.as_deref() == Some("pdf"))
            .map(|link| link.href.clone())
            .last()
            .filter(|href| !href.is_empty())
            .unwrap_or_else(|| format!("{}{}", PDF_URL_PREFIX, arxiv_id));

        Paper {
            url: format!("{}{}", ABS_URL_PREFIX, arxiv_id),
            pdf_url,
            arxiv_id,
            title,
            authors,
            abstract_text,
            categories,
            published,
        }
    }
}

/// `http://arxiv.org/abs/2401.12345v1` -> `2401.12345v1`; ids without the marker pass through
pub fn strip_id_prefix(raw_id: &str) -> String {
    match raw_id.rfind(ABS_MARKER) {
        Some(pos) => raw_id[pos + ABS_MARKER.len()..].to_string(),
        None => raw_id.to_string(),
    }
}

pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn format_timestamp(dt: DateTime<Utc>) -> String {
    dt.format("%Y-%m-%dT%H:%M:%SZ").to_string()
}
