use crate::types::{OutputDocument, Result};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::info;

/// Suffix that replaces the output extension for the frontmatter version
pub const FULL_SUFFIX: &str = "full.md";

#[derive(Debug, Clone)]
pub struct WrittenPaths {
    pub body: PathBuf,
    pub full: PathBuf,
    pub metadata: Option<PathBuf>,
}

/// `out/article.md` -> `out/article.full.md`
pub fn full_document_path(output: &Path) -> PathBuf {
    output.with_extension(FULL_SUFFIX)
}

/// Write body, full document and optional sidecar. Not transactional.
pub async fn write_document(
    document: &OutputDocument,
    output: &Path,
    metadata_path: Option<&Path>,
) -> Result<WrittenPaths> {
    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).await?;
    }

    fs::write(output, &document.body).await?;
    info!("Body written to: {}", output.display());

    let full = full_document_path(output);
    fs::write(&full, &document.full).await?;
    info!("Full article written to: {}", full.display());

    let metadata = match metadata_path {
        Some(path) => {
            fs::write(path, document.metadata.render()).await?;
            info!("Metadata written to: {}", path.display());
            Some(path.to_path_buf())
        }
        None => None,
    };

    Ok(WrittenPaths {
        body: output.to_path_buf(),
        full,
        metadata,
    })
}
