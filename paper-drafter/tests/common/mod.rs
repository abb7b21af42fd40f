#![allow(dead_code)]

use paper_drafter::Paper;
use std::sync::Once;

static INIT: Once = Once::new();

pub fn init_tracing() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_test_writer()
            .try_init()
            .ok();
    });
}

pub fn paper(id: &str, title: &str) -> Paper {
    Paper {
        arxiv_id: id.to_string(),
        title: title.to_string(),
        authors: vec!["Alice Smith".to_string(), "Bob Jones".to_string()],
        abstract_text: format!("Abstract of {}. We propose a method and evaluate it.", title),
        categories: vec!["cs.CV".to_string(), "cs.LG".to_string()],
        published: "2024-01-15T18:59:59Z".to_string(),
        url: format!("https://arxiv.org/abs/{}", id),
        pdf_url: format!("https://arxiv.org/pdf/{}", id),
    }
}

pub fn papers(ids: &[&str]) -> Vec<Paper> {
    ids.iter()
        .map(|id| paper(id, &format!("Paper {}", id)))
        .collect()
}

pub fn ids(papers: &[Paper]) -> Vec<&str> {
    papers.iter().map(|p| p.arxiv_id.as_str()).collect()
}
