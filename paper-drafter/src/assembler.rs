use crate::types::{ArticleMetadata, OutputDocument, Paper, SelectionResult};

/// Prefix for the generated post title and the first blog category
pub const SERIES_TAG: &str = "論文読み";

pub fn footer(paper: &Paper) -> String {
    format!("\n---\n> **原論文**: [{}]({})\n", paper.title, paper.url)
}

pub fn frontmatter(paper: &Paper, category_label: &str) -> String {
    let title = format!("【{}】{}", SERIES_TAG, paper.title);
    let categories = [SERIES_TAG, category_label];
    let category_lines = categories
        .iter()
        .map(|c| format!("- {}", c))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "---\nTitle: \"{}\"\nCategory:\n{}\nDraft: true\n---",
        title, category_lines
    )
}

/// Drafted text followed by the citation footer
pub fn assemble_body(drafted: &str, footer: &str) -> String {
    format!("{}\n{}", drafted, footer)
}

/// Frontmatter, one blank line, body
pub fn assemble_full(frontmatter: &str, body: &str) -> String {
    format!("{}\n\n{}", frontmatter, body)
}

impl OutputDocument {
    pub fn assemble(
        drafted: &str,
        selection: &SelectionResult,
        category: &str,
        category_label: &str,
    ) -> Self {
        let paper = &selection.paper;
        let body = assemble_body(drafted, &footer(paper));
        let full = assemble_full(&frontmatter(paper, category_label), &body);

        Self {
            body,
            full,
            metadata: ArticleMetadata {
                arxiv_id: paper.arxiv_id.clone(),
                title: paper.title.clone(),
                category: category.to_string(),
                score: selection.score.total,
            },
        }
    }
}
