//! Corpus-wide summary over every loaded commit table.

use std::collections::HashMap;
use std::path::Path;

use serde::Serialize;

use crate::types::CommitTable;

/// How many extensions the summary ranks.
pub const TOP_EXTENSIONS: usize = 5;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorpusSummary {
  pub repositories: usize,
  pub total_commits: usize,
  /// Most frequently modified file extensions with their counts.
  pub top_extensions: Vec<(String, usize)>,
}

/// Lowercased extension with whitespace and non-word characters other than
/// `.` removed.
pub fn clean_extension(ext: &str) -> String {
  ext
    .chars()
    .filter(|c| c.is_alphanumeric() || *c == '_' || *c == '.')
    .flat_map(char::to_lowercase)
    .collect()
}

fn extension_of(file: &str) -> Option<String> {
  let ext = Path::new(file).extension()?.to_string_lossy();
  let cleaned = clean_extension(&format!(".{}", ext));
  (!cleaned.is_empty() && cleaned != ".").then_some(cleaned)
}

pub fn summarize<'a>(tables: impl IntoIterator<Item = &'a CommitTable>) -> CorpusSummary {
  let mut repositories = 0;
  let mut total_commits = 0;
  let mut extensions: HashMap<String, usize> = HashMap::new();

  for table in tables {
    repositories += 1;
    total_commits += table.len();
    for commit in &table.commits {
      for file in &commit.modified_files {
        if let Some(ext) = extension_of(file) {
          *extensions.entry(ext).or_insert(0) += 1;
        }
      }
    }
  }

  let mut top_extensions: Vec<(String, usize)> = extensions.into_iter().collect();
  top_extensions.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
  top_extensions.truncate(TOP_EXTENSIONS);

  CorpusSummary {
    repositories,
    total_commits,
    top_extensions,
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::normalize::normalize_table;
  use crate::testutil::inbound;

  #[test]
  fn cleans_extensions() {
    assert_eq!(clean_extension(".RS"), ".rs");
    assert_eq!(clean_extension(". p y\u{200b}"), ".py");
    assert_eq!(clean_extension(".tar-gz"), ".targz");
  }

  #[test]
  fn files_without_extension_are_ignored() {
    assert_eq!(extension_of("Makefile"), None);
    assert_eq!(extension_of("src/main.rs"), Some(".rs".into()));
    assert_eq!(extension_of("docs/README.MD"), Some(".md".into()));
  }

  #[test]
  fn summarizes_tables() {
    let mut a = inbound("a", "alice", "2024-01-01T00:00:00Z");
    a.modified_files = vec!["lib.rs".into(), "main.rs".into(), "README.md".into()];
    let mut b = inbound("b", "bob", "2024-01-02T00:00:00Z");
    b.modified_files = vec!["Cargo.toml".into(), "x.rs".into()];
    let t1 = normalize_table("one", vec![a]);
    let t2 = normalize_table("two", vec![b]);

    let summary = summarize([&t1, &t2]);
    assert_eq!(summary.repositories, 2);
    assert_eq!(summary.total_commits, 2);
    assert_eq!(summary.top_extensions[0], (".rs".to_string(), 3));
    assert_eq!(summary.top_extensions.len(), 3);
  }

  #[test]
  fn keeps_top_five() {
    let mut c = inbound("a", "alice", "2024-01-01T00:00:00Z");
    c.modified_files = ["a.a", "b.b", "c.c", "d.d", "e.e", "f.f", "a2.a"]
      .iter()
      .map(|s| s.to_string())
      .collect();
    let t = normalize_table("one", vec![c]);
    let summary = summarize([&t]);
    assert_eq!(summary.top_extensions.len(), TOP_EXTENSIONS);
    assert_eq!(summary.top_extensions[0], (".a".to_string(), 2));
  }
}
