//! Core types for the quality engine (on-disk contracts + internal models).

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

// ---------------------------------------------------------------------------
// Inbound types (commit table contract: what the extractor writes)
// ---------------------------------------------------------------------------

/// One commit row as produced by the history extractor. Unknown fields are
/// silently ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InboundCommit {
  pub hash: String,
  #[serde(alias = "msg")]
  pub message: String,
  pub author_name: String,
  #[serde(default)]
  pub author_email: String,
  #[serde(default)]
  pub committer_name: String,
  #[serde(default)]
  pub committer_email: String,
  pub author_date: String,
  /// Offset in seconds, as recorded by the extractor.
  #[serde(default)]
  pub author_timezone: i32,
  #[serde(default)]
  pub committer_date: String,
  #[serde(default)]
  pub committer_timezone: i32,
  #[serde(default = "default_true")]
  pub in_main_branch: bool,
  #[serde(default)]
  pub merge: bool,
  #[serde(default)]
  pub modified_files: Vec<String>,
  #[serde(default)]
  pub parents: Vec<String>,
  #[serde(default)]
  pub insertions: u64,
  #[serde(default)]
  pub deletions: u64,
  /// Total changed lines (insertions + deletions).
  #[serde(default)]
  pub lines: u64,
}

fn default_true() -> bool {
  true
}

/// One JSON line for the engine binary: a full commit log for one repository.
#[derive(Debug, Clone, Deserialize)]
pub struct RepositoryCommits {
  pub repository: String,
  pub commits: Vec<InboundCommit>,
}

// ---------------------------------------------------------------------------
// Internal normalized types
// ---------------------------------------------------------------------------

/// Canonical commit after timestamp parsing and title extraction.
#[derive(Debug, Clone)]
pub struct Commit {
  pub hash: String,
  pub author_name: String,
  pub author_email: String,
  pub committer_name: String,
  pub committer_email: String,
  /// `None` when the author timestamp could not be parsed. The row still
  /// counts for every metric that does not need a date.
  pub author_date: Option<DateTime<FixedOffset>>,
  pub author_timezone: i32,
  /// `None` when the committer timestamp was absent or unparsable.
  pub committer_date: Option<DateTime<FixedOffset>>,
  pub committer_timezone: i32,
  pub message: String,
  /// First line of the message.
  pub title: String,
  pub modified_files: Vec<String>,
  pub parents: Vec<String>,
  pub insertions: u64,
  pub deletions: u64,
  pub lines: u64,
}

/// One repository's closed commit log. Rows are not assumed to be in time order.
#[derive(Debug, Clone)]
pub struct CommitTable {
  pub repository: String,
  pub commits: Vec<Commit>,
  /// Rows whose author date could not be parsed.
  pub undated: usize,
}

impl CommitTable {
  pub fn len(&self) -> usize {
    self.commits.len()
  }

  pub fn is_empty(&self) -> bool {
    self.commits.is_empty()
  }

  /// Parsed author timestamps, skipping undated rows.
  pub fn author_dates(&self) -> Vec<DateTime<FixedOffset>> {
    self.commits.iter().filter_map(|c| c.author_date).collect()
  }

  /// Commit count per distinct author name.
  pub fn author_commit_counts(&self) -> BTreeMap<String, u64> {
    let mut counts = BTreeMap::new();
    for c in &self.commits {
      *counts.entry(c.author_name.clone()).or_insert(0) += 1;
    }
    counts
  }
}

// ---------------------------------------------------------------------------
// Per-repository analysis record
// ---------------------------------------------------------------------------

/// One row describing a single repository's history. Keys match the column
/// headers of the summary table so existing stores stay readable.
///
/// `gini` uses the engine's polarity: 1.0 means commits are spread perfectly
/// evenly, values near 0 mean a few authors dominate. Display the textbook
/// coefficient as `1.0 - gini`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisRecord {
  #[serde(rename = "Project Name")]
  pub repository: String,
  #[serde(rename = "Project Duration (Years and Months)")]
  pub duration: String,
  #[serde(rename = "Gini Coefficient")]
  pub gini: f64,
  #[serde(rename = "Number of Contributors")]
  pub contributors: u64,
  #[serde(rename = "Average Commits per Day")]
  pub commits_per_day: f64,
  #[serde(rename = "Average Commits per Week", default)]
  pub commits_per_week: f64,
  #[serde(rename = "Average Commits per Month", default)]
  pub commits_per_month: f64,
  #[serde(rename = "Percentage with >= 5 Commits", default)]
  pub percentage_active: f64,
  #[serde(rename = "Average Commit Size")]
  pub average_commit_size: f64,
  #[serde(rename = "Number of Unique Timezones", default)]
  pub unique_timezones: u64,
  #[serde(rename = "Average Title Length", default)]
  pub title_length_score: f64,
  #[serde(rename = "Average Title Ends with Fullstop", default)]
  pub title_fullstop_score: f64,
  #[serde(rename = "Average Title First Character Capital", default)]
  pub title_capital_score: f64,
  #[serde(rename = "Average Score")]
  pub message_score: f64,
}

// ---------------------------------------------------------------------------
// Sub-scores and quality score record
// ---------------------------------------------------------------------------

/// Normalized per-repository sub-scores, in output column order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SubScore {
  Gini,
  ProjectDuration,
  CommitsPerDay,
  AverageScore,
  Committers,
  CommitSize,
  GiniCommitters,
}

impl SubScore {
  pub const ALL: [SubScore; 7] = [
    SubScore::Gini,
    SubScore::ProjectDuration,
    SubScore::CommitsPerDay,
    SubScore::AverageScore,
    SubScore::Committers,
    SubScore::CommitSize,
    SubScore::GiniCommitters,
  ];

  /// Column header in the quality score table.
  pub fn column(self) -> &'static str {
    match self {
      Self::Gini => "Gini Coefficient",
      Self::ProjectDuration => "Project Duration Score",
      Self::CommitsPerDay => "Normalized Avg Commits/Day",
      Self::AverageScore => "Average Score",
      Self::Committers => "Total Committers",
      Self::CommitSize => "Average Commit Size",
      Self::GiniCommitters => "Gini-Committers Score",
    }
  }

  pub fn from_column(name: &str) -> Option<Self> {
    Self::ALL.iter().copied().find(|s| s.column() == name)
  }

  /// Header of the weighted contribution column.
  pub fn weighted_column(self) -> String {
    format!("{} Weighted", self.column())
  }
}

impl fmt::Display for SubScore {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.column())
  }
}

/// Final scored row for one repository.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualityScore {
  #[serde(rename = "Folder Name")]
  pub repository: String,
  #[serde(rename = "Gini Coefficient")]
  pub gini: f64,
  #[serde(rename = "Project Duration Score")]
  pub project_duration: f64,
  #[serde(rename = "Normalized Avg Commits/Day")]
  pub commits_per_day: f64,
  #[serde(rename = "Average Score")]
  pub average_score: f64,
  #[serde(rename = "Total Committers")]
  pub committers: f64,
  #[serde(rename = "Average Commit Size")]
  pub commit_size: f64,
  #[serde(rename = "Gini-Committers Score")]
  pub gini_committers: f64,
  #[serde(rename = "Overall Quality Score")]
  pub overall: f64,
  /// "<column> Weighted" -> sub-score x weight, for weighted columns only.
  #[serde(flatten)]
  pub weighted: BTreeMap<String, f64>,
}

impl QualityScore {
  pub fn sub_score(&self, s: SubScore) -> f64 {
    match s {
      SubScore::Gini => self.gini,
      SubScore::ProjectDuration => self.project_duration,
      SubScore::CommitsPerDay => self.commits_per_day,
      SubScore::AverageScore => self.average_score,
      SubScore::Committers => self.committers,
      SubScore::CommitSize => self.commit_size,
      SubScore::GiniCommitters => self.gini_committers,
    }
  }
}

// ---------------------------------------------------------------------------
// Batch outcomes
// ---------------------------------------------------------------------------

/// Why a repository contributed no record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "detail")]
pub enum SkipReason {
  Missing,
  Empty,
  Unparsable(String),
  NoValidCommits,
}

impl fmt::Display for SkipReason {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::Missing => f.write_str("file not found"),
      Self::Empty => f.write_str("file is empty"),
      Self::Unparsable(e) => write!(f, "unparsable: {}", e),
      Self::NoValidCommits => f.write_str("no commits to analyze"),
    }
  }
}

/// Per-repository result of a batch step: a record, or an explicit skip.
#[derive(Debug, Clone, PartialEq)]
pub enum RepoOutcome<T> {
  Analyzed(T),
  Skipped { repository: String, reason: SkipReason },
}

impl<T> RepoOutcome<T> {
  pub fn skipped(repository: impl Into<String>, reason: SkipReason) -> Self {
    Self::Skipped {
      repository: repository.into(),
      reason,
    }
  }

  pub fn is_skipped(&self) -> bool {
    matches!(self, Self::Skipped { .. })
  }
}

// ---------------------------------------------------------------------------
// CLI stream wrappers
// ---------------------------------------------------------------------------

/// Structured error output for invalid input lines.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorOutput {
  pub error: bool,
  pub message: String,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub field: Option<String>,
}

impl ErrorOutput {
  pub fn new(message: impl Into<String>) -> Self {
    Self {
      error: true,
      message: message.into(),
      field: None,
    }
  }

  pub fn with_field(mut self, field: impl Into<String>) -> Self {
    self.field = Some(field.into());
    self
  }
}
