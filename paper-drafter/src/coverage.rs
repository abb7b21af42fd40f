use crate::types::{Paper, Result};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use walkdir::WalkDir;

/// Substring that marks a reference to an already-covered paper
pub const COVERAGE_MARKER: &str = "arxiv.org/abs/";

/// Ids of papers already turned into published or drafted articles
pub struct CoverageIndex;

impl CoverageIndex {
    /// Scan every markdown file under `dirs`. Missing directories are skipped;
    /// unreadable files inside an existing directory are errors.
    pub fn build<P: AsRef<Path>>(dirs: &[P]) -> Result<HashSet<String>> {
        let mut covered = HashSet::new();

        for dir in dirs {
            let dir = dir.as_ref();
            if !dir.exists() {
                debug!("Skipping missing directory: {}", dir.display());
                continue;
            }

            for path in markdown_files(dir)? {
                let content = fs::read_to_string(&path)?;
                let before = covered.len();
                covered.extend(content.lines().filter_map(extract_arxiv_id));
                if covered.len() > before {
                    debug!("{}: {} new ids", path.display(), covered.len() - before);
                }
            }
        }

        info!("Coverage index holds {} ids", covered.len());
        Ok(covered)
    }
}

fn markdown_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    // linked articles count as covered too
    for entry in WalkDir::new(dir).follow_links(true) {
        let entry = entry?;
        let is_markdown = entry.path().extension().map_or(false, |ext| ext == "md");
        if entry.file_type().is_file() && is_markdown {
            files.push(entry.into_path());
        }
    }
    files.sort();
    Ok(files)
}

pub fn extract_arxiv_id(line: &str) -> Option<String> {
    extract_id_after(line, COVERAGE_MARKER)
}

/// Pull the id that follows the first `marker` on a line.
/// The id ends at the first `)`, `]` or whitespace.
pub fn extract_id_after(line: &str, marker: &str) -> Option<String> {
    let start = line.find(marker)? + marker.len();
    let rest = &line[start..];
    let end = rest
        .find(|c: char| c == ')' || c == ']' || c.is_whitespace())
        .unwrap_or(rest.len());
    let id = rest[..end].trim();

    if id.is_empty() {
        None
    } else {
        Some(id.to_string())
    }
}

/// Papers not yet covered, in their original order
pub fn filter_uncovered(papers: Vec<Paper>, covered: &HashSet<String>) -> Vec<Paper> {
    papers
        .into_iter()
        .filter(|p| !covered.contains(&p.arxiv_id))
        .collect()
}
