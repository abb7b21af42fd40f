mod common;

use chrono::{TimeZone, Utc};
use common::{ids, init_tracing, papers};
use paper_drafter::writer::{full_document_path, write_document};
use paper_drafter::{
    ArticlePipeline, DrafterConfig, DrafterError, MockLanguageModel, PipelineRequest, Result,
    StaticPaperSource,
};
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use tempfile::TempDir;
use tracing::info;

const TEMPLATE: &str = "Write a review of the following paper.";

fn request(dirs: Vec<PathBuf>) -> PipelineRequest {
    PipelineRequest {
        category_override: Some("cs.CV".to_string()),
        prompt_template: TEMPLATE.to_string(),
        coverage_dirs: dirs,
        now: Utc.with_ymd_and_hms(2024, 1, 15, 9, 0, 0).unwrap(),
    }
}

fn test_config() -> DrafterConfig {
    DrafterConfig {
        api_key: "sk-test".to_string(),
        scoring_model: "scoring-model".to_string(),
        drafting_model: "drafting-model".to_string(),
        ..DrafterConfig::default()
    }
}

#[tokio::test]
async fn test_end_to_end_scores_the_filtered_list() -> Result<()> {
    init_tracing();
    let entries = TempDir::new()?;
    fs::write(
        entries.path().join("old.md"),
        "body\n---\n> **原論文**: [Paper B](https://arxiv.org/abs/B)\n",
    )?;

    // index 1 refers to the filtered list [A, C]
    let model = Arc::new(
        MockLanguageModel::new("pipeline".to_string())
            .with_reply(r#"[{"index":0,"total":5,"reason":"ok"},{"index":1,"total":9,"reason":"best"}]"#)
            .with_reply("## Review\n\nA very good paper."),
    );
    let source = Box::new(StaticPaperSource::new(papers(&["A", "B", "C"])));
    let pipeline = ArticlePipeline::new(source, model.clone(), &test_config());

    let outcome = pipeline
        .run(&request(vec![entries.path().to_path_buf(), entries.path().join("missing")]))
        .await?;
    info!("Pipeline chose {}", outcome.selection.paper.arxiv_id);

    assert_eq!(outcome.category, "cs.CV");
    assert_eq!(outcome.category_label, "Computer Vision");
    assert_eq!(outcome.selection.paper.arxiv_id, "C");
    assert_eq!(ids(&outcome.selection.related), vec!["A"]);

    let prompts = model.prompts().await;
    assert_eq!(prompts.len(), 2);
    assert_eq!(prompts[0].0, "scoring-model");
    assert!(prompts[0].1.contains("[0] Paper A"));
    assert!(prompts[0].1.contains("[1] Paper C"));
    assert!(!prompts[0].1.contains("Paper B"));
    assert_eq!(prompts[1].0, "drafting-model");
    assert!(prompts[1].1.starts_with(TEMPLATE));
    assert!(prompts[1].1.contains("**arXiv ID**: C"));
    assert!(prompts[1].1.contains("- [Paper A](https://arxiv.org/abs/A)"));

    let document = &outcome.document;
    assert!(document.body.starts_with("## Review\n\nA very good paper.\n"));
    assert!(document.body.ends_with("> **原論文**: [Paper C](https://arxiv.org/abs/C)\n"));
    assert!(document.full.starts_with("---\nTitle: \"【論文読み】Paper C\""));
    assert_eq!(document.metadata.score, 9);
    Ok(())
}

#[tokio::test]
async fn test_rerun_excludes_previous_choice() -> Result<()> {
    init_tracing();
    let entries = TempDir::new()?;
    let drafts = TempDir::new()?;
    let dirs = vec![entries.path().to_path_buf(), drafts.path().to_path_buf()];

    let first_model = Arc::new(
        MockLanguageModel::new("first".to_string())
            .with_failure("scoring unavailable")
            .with_reply("First article."),
    );
    let first = ArticlePipeline::new(
        Box::new(StaticPaperSource::new(papers(&["A", "B", "C"]))),
        first_model,
        &test_config(),
    );
    let outcome = first.run(&request(dirs.clone())).await?;
    assert_eq!(outcome.selection.paper.arxiv_id, "A");
    assert!(outcome.selection.degraded);
    assert_eq!(outcome.document.metadata.score, 0);

    let output = drafts.path().join("2024-01-15.md");
    let written = write_document(&outcome.document, &output, None).await?;
    assert_eq!(written.full, full_document_path(&output));

    let second_model = Arc::new(
        MockLanguageModel::new("second".to_string())
            .with_failure("scoring unavailable")
            .with_reply("Second article."),
    );
    let second = ArticlePipeline::new(
        Box::new(StaticPaperSource::new(papers(&["A", "B", "C"]))),
        second_model,
        &test_config(),
    );
    let outcome = second.run(&request(dirs)).await?;
    assert_eq!(outcome.selection.paper.arxiv_id, "B");
    assert_eq!(ids(&outcome.selection.related), vec!["C"]);
    Ok(())
}

#[tokio::test]
async fn test_no_papers_and_all_covered_are_fatal() -> Result<()> {
    init_tracing();
    let entries = TempDir::new()?;

    let empty = ArticlePipeline::new(
        Box::new(StaticPaperSource::new(Vec::new())),
        Arc::new(MockLanguageModel::new("unused".to_string())),
        &test_config(),
    );
    let err = empty.run(&request(vec![])).await.unwrap_err();
    assert!(matches!(err, DrafterError::NoPapersFound { .. }));
    assert!(err.is_no_candidates());

    fs::write(
        entries.path().join("all.md"),
        "https://arxiv.org/abs/A\nhttps://arxiv.org/abs/B\n",
    )?;
    let model = Arc::new(MockLanguageModel::new("unused".to_string()));
    let covered = ArticlePipeline::new(
        Box::new(StaticPaperSource::new(papers(&["A", "B"]))),
        model.clone(),
        &test_config(),
    );
    let err = covered
        .run(&request(vec![entries.path().to_path_buf()]))
        .await
        .unwrap_err();
    assert!(matches!(err, DrafterError::AllCovered { covered: 2 }));
    assert!(model.prompts().await.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_drafting_failures_are_fatal() -> Result<()> {
    init_tracing();
    let scoring = r#"[{"index":0,"total":20}]"#;

    let failing = ArticlePipeline::new(
        Box::new(StaticPaperSource::new(papers(&["A"]))),
        Arc::new(
            MockLanguageModel::new("flaky".to_string())
                .with_reply(scoring)
                .with_failure("connection reset"),
        ),
        &test_config(),
    );
    let err = failing.run(&request(vec![])).await.unwrap_err();
    assert!(matches!(err, DrafterError::Generation(_)));
    assert!(err.to_string().contains("connection reset"));

    let empty = ArticlePipeline::new(
        Box::new(StaticPaperSource::new(papers(&["A"]))),
        Arc::new(
            MockLanguageModel::new("silent".to_string())
                .with_reply(scoring)
                .with_reply(""),
        ),
        &test_config(),
    );
    let err = empty.run(&request(vec![])).await.unwrap_err();
    assert!(matches!(err, DrafterError::EmptyGeneration));
    Ok(())
}
