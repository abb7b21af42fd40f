mod common;

use common::{ids, init_tracing, papers};
use paper_drafter::coverage::{extract_arxiv_id, extract_id_after, filter_uncovered};
use paper_drafter::{CoverageIndex, DrafterError, Result};
use std::collections::HashSet;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

#[test]
fn test_extract_stops_at_closing_paren_bracket_or_space() {
    assert_eq!(
        extract_id_after("> see https://service/abs/2401.12345) more text", "service/abs/").as_deref(),
        Some("2401.12345")
    );
    assert_eq!(extract_arxiv_id("> see https://service/abs/2401.12345) more text"), None);
    assert_eq!(
        extract_arxiv_id("> see https://arxiv.org/abs/2401.12345) more text").as_deref(),
        Some("2401.12345")
    );
    assert_eq!(
        extract_arxiv_id("[link](https://arxiv.org/abs/2401.12345]").as_deref(),
        Some("2401.12345")
    );
    assert_eq!(
        extract_arxiv_id("https://arxiv.org/abs/2401.12345 trailing").as_deref(),
        Some("2401.12345")
    );
    assert_eq!(
        extract_arxiv_id("https://arxiv.org/abs/2401.12345v2\tcolumn").as_deref(),
        Some("2401.12345v2")
    );
    assert_eq!(
        extract_arxiv_id("ends here https://arxiv.org/abs/2401.12345").as_deref(),
        Some("2401.12345")
    );
}

#[test]
fn test_extract_ignores_lines_without_an_id() {
    assert_eq!(extract_arxiv_id("no links here"), None);
    assert_eq!(extract_arxiv_id("https://arxiv.org/abs/ and nothing"), None);
    assert_eq!(extract_arxiv_id("https://arxiv.org/abs/)"), None);
}

#[test]
fn test_extract_takes_first_reference_on_a_line() {
    let line = "[a](https://arxiv.org/abs/2401.00001) vs [b](https://arxiv.org/abs/2401.00002)";
    assert_eq!(extract_arxiv_id(line).as_deref(), Some("2401.00001"));
}

#[test]
fn test_build_scans_markdown_recursively() -> Result<()> {
    init_tracing();
    let entries = TempDir::new()?;
    let drafts = TempDir::new()?;

    fs::create_dir_all(entries.path().join("2024/01"))?;
    fs::write(
        entries.path().join("2024/01/post.md"),
        "# Review\n\n---\n> **原論文**: [Paper](https://arxiv.org/abs/2401.11111)\n",
    )?;
    fs::write(
        entries.path().join("top.md"),
        "intro\nhttps://arxiv.org/abs/2401.22222 is great\n",
    )?;
    fs::write(
        entries.path().join("notes.txt"),
        "https://arxiv.org/abs/2401.99999\n",
    )?;
    fs::write(
        drafts.path().join("draft.md"),
        "[x](https://arxiv.org/abs/2401.33333)\n[y](https://arxiv.org/abs/2401.11111)\n",
    )?;

    let covered = CoverageIndex::build(&[entries.path(), drafts.path()])?;

    let expected: HashSet<String> = ["2401.11111", "2401.22222", "2401.33333"]
        .iter()
        .map(|s| s.to_string())
        .collect();
    assert_eq!(covered, expected);
    Ok(())
}

#[test]
fn test_missing_directories_are_skipped() -> Result<()> {
    let existing = TempDir::new()?;
    fs::write(
        existing.path().join("a.md"),
        "https://arxiv.org/abs/2401.44444\n",
    )?;

    let missing = existing.path().join("does-not-exist");
    let covered = CoverageIndex::build(&[missing.clone(), existing.path().to_path_buf()])?;
    assert_eq!(covered.len(), 1);
    assert!(covered.contains("2401.44444"));

    let none: Vec<PathBuf> = vec![missing];
    assert!(CoverageIndex::build(&none)?.is_empty());
    Ok(())
}

#[cfg(unix)]
#[test]
fn test_build_follows_linked_articles() -> Result<()> {
    use std::os::unix::fs::symlink;

    init_tracing();
    let archive = TempDir::new()?;
    let entries = TempDir::new()?;
    fs::write(
        archive.path().join("a.md"),
        "https://arxiv.org/abs/2401.55555\n",
    )?;
    fs::create_dir_all(archive.path().join("older"))?;
    fs::write(
        archive.path().join("older/b.md"),
        "https://arxiv.org/abs/2401.66666\n",
    )?;

    symlink(archive.path().join("a.md"), entries.path().join("a.md"))?;
    symlink(archive.path().join("older"), entries.path().join("older"))?;

    let covered = CoverageIndex::build(&[entries.path()])?;

    assert!(covered.contains("2401.55555"));
    assert!(covered.contains("2401.66666"));
    assert_eq!(covered.len(), 2);
    Ok(())
}

#[test]
fn test_unreadable_markdown_is_an_error() -> Result<()> {
    let dir = TempDir::new()?;
    // not valid UTF-8
    fs::write(dir.path().join("broken.md"), [0xff, 0xfe, 0xfd])?;

    let result = CoverageIndex::build(&[dir.path()]);
    assert!(matches!(result, Err(DrafterError::Io(_))));
    Ok(())
}

#[test]
fn test_filter_uncovered_keeps_fetch_order() {
    let covered: HashSet<String> = ["B", "D"].iter().map(|s| s.to_string()).collect();
    let remaining = filter_uncovered(papers(&["A", "B", "C", "D", "E"]), &covered);
    assert_eq!(ids(&remaining), vec!["A", "C", "E"]);
}
