use anyhow::Context;
use chrono::Utc;
use clap::Parser;
use paper_drafter::{writer, ArticlePipeline, DrafterConfig, PipelineRequest};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Generate a blog article from a recent arXiv paper
#[derive(Debug, Parser)]
#[command(name = "paper-drafter", version)]
struct Cli {
    /// arXiv category (default: picked by weekday)
    #[arg(long)]
    category: Option<String>,

    /// Output markdown file path (body only); the full article goes next to it
    #[arg(long)]
    output: PathBuf,

    /// Path to prompt template file
    #[arg(long, default_value = "prompts/arxiv-review.md")]
    prompt_file: PathBuf,

    /// Published entries directory
    #[arg(long, default_value = "entries")]
    entries_dir: PathBuf,

    /// Draft entries directory
    #[arg(long, default_value = "draft_entries")]
    drafts_dir: PathBuf,

    /// Write metadata (arxiv_id, title, category, score) for CI
    #[arg(long)]
    metadata_file: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    // credential first: nothing touches the network without it
    let config = DrafterConfig::from_env()?;

    let prompt_template = tokio::fs::read_to_string(&cli.prompt_file)
        .await
        .with_context(|| format!("Failed to read prompt template {}", cli.prompt_file.display()))?;

    let pipeline = ArticlePipeline::from_config(&config)?;
    let request = PipelineRequest {
        category_override: cli.category.clone(),
        prompt_template,
        coverage_dirs: vec![cli.entries_dir.clone(), cli.drafts_dir.clone()],
        now: Utc::now(),
    };

    let outcome = pipeline.run(&request).await?;

    let written = writer::write_document(
        &outcome.document,
        &cli.output,
        cli.metadata_file.as_deref(),
    )
    .await?;

    info!(
        "Done: {} ({}) -> {}",
        outcome.selection.paper.title,
        outcome.selection.paper.arxiv_id,
        written.full.display()
    );
    Ok(())
}
