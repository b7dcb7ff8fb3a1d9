//! On-disk tabular store: one folder per repository holding
//! `<repo>_commits.json`, `<repo>_analysis.json` and `<repo>_authors.json`.
//!
//! Readers never fail the batch; they return a `RepoOutcome` whose skip
//! reason says why a repository contributed nothing.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::analysis::{self, AuthorImpact};
use crate::config::Config;
use crate::error::EngineError;
use crate::normalize::normalize_table;
use crate::types::*;

pub const COMMITS_SUFFIX: &str = "_commits.json";
pub const ANALYSIS_SUFFIX: &str = "_analysis.json";
pub const AUTHORS_SUFFIX: &str = "_authors.json";
pub const SCORES_FILE: &str = "repository_quality_scores.json";

/// Repository identifier for a store folder: its final path component.
pub fn repository_name(dir: &Path) -> String {
  dir
    .file_name()
    .map(|n| n.to_string_lossy().into_owned())
    .unwrap_or_else(|| dir.display().to_string())
}

pub fn commits_path(dir: &Path) -> PathBuf {
  dir.join(format!("{}{}", repository_name(dir), COMMITS_SUFFIX))
}

pub fn analysis_path(dir: &Path) -> PathBuf {
  dir.join(format!("{}{}", repository_name(dir), ANALYSIS_SUFFIX))
}

pub fn authors_path(dir: &Path) -> PathBuf {
  dir.join(format!("{}{}", repository_name(dir), AUTHORS_SUFFIX))
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, SkipReason> {
  let content = match fs::read_to_string(path) {
    Ok(c) => c,
    Err(e) if e.kind() == ErrorKind::NotFound => return Err(SkipReason::Missing),
    Err(e) => return Err(SkipReason::Unparsable(e.to_string())),
  };
  if content.trim().is_empty() {
    return Err(SkipReason::Empty);
  }
  serde_json::from_str(&content).map_err(|e| SkipReason::Unparsable(e.to_string()))
}

/// Read and normalize a commit table.
pub fn read_commit_table(path: &Path, repository: &str) -> RepoOutcome<CommitTable> {
  let rows: Vec<InboundCommit> = match read_json(path) {
    Ok(rows) => rows,
    Err(reason) => return RepoOutcome::skipped(repository, reason),
  };
  if rows.is_empty() {
    return RepoOutcome::skipped(repository, SkipReason::Empty);
  }
  RepoOutcome::Analyzed(normalize_table(repository, rows))
}

/// Read one per-repository summary row.
pub fn read_analysis(path: &Path, repository: &str) -> RepoOutcome<AnalysisRecord> {
  match read_json(path) {
    Ok(record) => RepoOutcome::Analyzed(record),
    Err(reason) => RepoOutcome::skipped(repository, reason),
  }
}

/// Analyze an already loaded table, turning a failure into a skip.
pub fn analyze_table(table: &CommitTable, config: &Config) -> RepoOutcome<AnalysisRecord> {
  match analysis::analyze(table, config) {
    Ok(record) => RepoOutcome::Analyzed(record),
    Err(EngineError::EmptyTable { repository }) => {
      RepoOutcome::skipped(repository, SkipReason::NoValidCommits)
    }
    Err(e) => RepoOutcome::skipped(table.repository.as_str(), SkipReason::Unparsable(e.to_string())),
  }
}

/// Analyze the commit table stored in a repository folder.
pub fn analyze_repository(dir: &Path, config: &Config) -> RepoOutcome<AnalysisRecord> {
  match read_commit_table(&commits_path(dir), &repository_name(dir)) {
    RepoOutcome::Analyzed(table) => analyze_table(&table, config),
    RepoOutcome::Skipped { repository, reason } => RepoOutcome::Skipped { repository, reason },
  }
}

/// Load the summary row stored in a repository folder.
pub fn load_summary(dir: &Path) -> RepoOutcome<AnalysisRecord> {
  read_analysis(&analysis_path(dir), &repository_name(dir))
}

fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<(), EngineError> {
  let json = serde_json::to_vec_pretty(value)?;
  fs::write(path, json).map_err(|e| EngineError::io(path, e))
}

pub fn write_analysis(path: &Path, record: &AnalysisRecord) -> Result<(), EngineError> {
  write_json(path, record)
}

pub fn write_commit_table(path: &Path, rows: &[InboundCommit]) -> Result<(), EngineError> {
  write_json(path, rows)
}

pub fn write_authors(path: &Path, authors: &[AuthorImpact]) -> Result<(), EngineError> {
  write_json(path, authors)
}

pub fn write_scores(path: &Path, scores: &[QualityScore]) -> Result<(), EngineError> {
  write_json(path, scores)
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::testutil::inbound;
  use tempfile::TempDir;

  fn repo_dir(root: &TempDir, name: &str) -> PathBuf {
    let dir = root.path().join(name);
    fs::create_dir_all(&dir).unwrap();
    dir
  }

  #[test]
  fn paths_follow_folder_name() {
    let dir = Path::new("/data/acme-widgets");
    assert_eq!(
      commits_path(dir),
      PathBuf::from("/data/acme-widgets/acme-widgets_commits.json")
    );
    assert_eq!(
      analysis_path(dir),
      PathBuf::from("/data/acme-widgets/acme-widgets_analysis.json")
    );
  }

  #[test]
  fn missing_empty_and_garbage_are_skips() {
    let root = TempDir::new().unwrap();
    let missing = repo_dir(&root, "missing");
    let empty = repo_dir(&root, "empty");
    let garbage = repo_dir(&root, "garbage");
    fs::write(analysis_path(&empty), "").unwrap();
    fs::write(analysis_path(&garbage), "{ not json").unwrap();

    assert_eq!(
      load_summary(&missing),
      RepoOutcome::skipped("missing", SkipReason::Missing)
    );
    assert_eq!(
      load_summary(&empty),
      RepoOutcome::skipped("empty", SkipReason::Empty)
    );
    assert!(matches!(
      load_summary(&garbage),
      RepoOutcome::Skipped { reason: SkipReason::Unparsable(_), .. }
    ));
  }

  #[test]
  fn empty_commit_list_is_skipped() {
    let root = TempDir::new().unwrap();
    let dir = repo_dir(&root, "nothing");
    fs::write(commits_path(&dir), "[]").unwrap();
    assert_eq!(
      analyze_repository(&dir, &Config::default()),
      RepoOutcome::skipped("nothing", SkipReason::Empty)
    );
  }

  #[test]
  fn all_dates_unparsable_still_analyzes() {
    let root = TempDir::new().unwrap();
    let dir = repo_dir(&root, "undated");
    write_commit_table(&commits_path(&dir), &[inbound("a", "alice", "??")]).unwrap();
    match analyze_repository(&dir, &Config::default()) {
      RepoOutcome::Analyzed(record) => {
        assert_eq!(record.repository, "undated");
        assert_eq!(record.contributors, 1);
        assert_eq!(record.commits_per_day, 0.0);
        assert_eq!(record.duration, "0 years and 0 months");
      }
      other => panic!("unexpected {:?}", other),
    }
  }

  #[test]
  fn empty_table_maps_to_no_valid_commits() {
    let table = normalize_table("bare", vec![]);
    assert_eq!(
      analyze_table(&table, &Config::default()),
      RepoOutcome::skipped("bare", SkipReason::NoValidCommits)
    );
  }

  #[test]
  fn writes_author_breakdown() {
    let root = TempDir::new().unwrap();
    let dir = repo_dir(&root, "acme");
    let table = normalize_table("acme", vec![inbound("a", "alice", "2024-01-01T00:00:00Z")]);
    let authors = analysis::top_authors(&table, analysis::TOP_AUTHORS);
    write_authors(&authors_path(&dir), &authors).unwrap();

    let json: serde_json::Value =
      serde_json::from_str(&fs::read_to_string(authors_path(&dir)).unwrap()).unwrap();
    assert_eq!(json[0]["Author Name"], "alice");
    assert_eq!(json[0]["Insertions"], 3);
    assert_eq!(json[0]["Deletions"], 1);
  }

  #[test]
  fn analysis_round_trips_through_disk() {
    let root = TempDir::new().unwrap();
    let dir = repo_dir(&root, "acme");
    let rows = vec![
      inbound("a", "alice", "2022-01-01T00:00:00Z"),
      inbound("b", "bob", "2023-02-01T00:00:00Z"),
    ];
    write_commit_table(&commits_path(&dir), &rows).unwrap();

    let record = match analyze_repository(&dir, &Config::default()) {
      RepoOutcome::Analyzed(r) => r,
      other => panic!("unexpected {:?}", other),
    };
    assert_eq!(record.repository, "acme");
    assert_eq!(record.duration, "1 years and 1 months");

    write_analysis(&analysis_path(&dir), &record).unwrap();
    let loaded = match load_summary(&dir) {
      RepoOutcome::Analyzed(r) => r,
      other => panic!("unexpected {:?}", other),
    };
    assert_eq!(loaded.repository, record.repository);
    assert_eq!(loaded.duration, record.duration);
    assert_eq!(loaded.contributors, 2);
    assert!((loaded.commits_per_day - record.commits_per_day).abs() < 1e-12);
  }
}
