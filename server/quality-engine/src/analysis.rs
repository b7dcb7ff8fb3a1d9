//! Per-repository analysis: runs every metric over one CommitTable and
//! assembles the AnalysisRecord.

use std::collections::{BTreeMap, HashSet};

use log::debug;
use serde::{Deserialize, Serialize};

use crate::cadence;
use crate::config::Config;
use crate::duration::ProjectDuration;
use crate::error::EngineError;
use crate::inequality;
use crate::message;
use crate::participation;
use crate::types::*;

/// Compute the analysis record for a complete commit log.
///
/// Fails with `EmptyTable` only when the table has no rows. Without any
/// dated commit, cadence is zero and the duration is "0 years and 0 months".
pub fn analyze(table: &CommitTable, config: &Config) -> Result<AnalysisRecord, EngineError> {
  if table.is_empty() {
    return Err(EngineError::EmptyTable {
      repository: table.repository.clone(),
    });
  }

  let counts: Vec<u64> = table.author_commit_counts().into_values().collect();
  let gini = inequality::gini(&counts);
  let percentage_active =
    participation::percentage_active(&counts, config.active_contributor_min_commits);

  // Undated rows only drop out of the time-based metrics.
  let stamps = table.author_dates();
  let cadence = cadence::cadence(&stamps).unwrap_or_default();
  let duration = match (stamps.iter().min(), stamps.iter().max()) {
    (Some(first), Some(last)) => ProjectDuration::between(first, last),
    _ => ProjectDuration::default(),
  };

  let total_lines: u64 = table.commits.iter().map(|c| c.lines).sum();
  let average_commit_size = total_lines as f64 / table.len() as f64;

  let unique_timezones = table
    .commits
    .iter()
    .map(|c| c.author_timezone)
    .collect::<HashSet<_>>()
    .len() as u64;

  let quality = message::message_quality(table.commits.iter().map(|c| c.title.as_str()));

  let record = AnalysisRecord {
    repository: table.repository.clone(),
    duration: duration.to_string(),
    gini,
    contributors: counts.len() as u64,
    commits_per_day: cadence.per_day,
    commits_per_week: cadence.per_week,
    commits_per_month: cadence.per_month,
    percentage_active,
    average_commit_size,
    unique_timezones,
    title_length_score: quality.length,
    title_fullstop_score: quality.fullstop,
    title_capital_score: quality.capital,
    message_score: quality.average,
  };

  debug!(
    "{}: {} commits, {} authors, gini {:.3}, {:.3} commits/day, {}",
    record.repository,
    table.len(),
    record.contributors,
    record.gini,
    record.commits_per_day,
    record.duration
  );

  Ok(record)
}

/// Number of authors in the per-repository author breakdown.
pub const TOP_AUTHORS: usize = 10;

/// One author's share of a repository's history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorImpact {
  #[serde(rename = "Author Name")]
  pub author: String,
  #[serde(rename = "Commits")]
  pub commits: u64,
  #[serde(rename = "Insertions")]
  pub insertions: u64,
  #[serde(rename = "Deletions")]
  pub deletions: u64,
}

/// The `n` most active authors by commit count, descending, ties broken by
/// name, with their summed insertions and deletions.
pub fn top_authors(table: &CommitTable, n: usize) -> Vec<AuthorImpact> {
  let mut by_author: BTreeMap<&str, AuthorImpact> = BTreeMap::new();
  for c in &table.commits {
    let entry = by_author
      .entry(c.author_name.as_str())
      .or_insert_with(|| AuthorImpact {
        author: c.author_name.clone(),
        commits: 0,
        insertions: 0,
        deletions: 0,
      });
    entry.commits += 1;
    entry.insertions += c.insertions;
    entry.deletions += c.deletions;
  }

  let mut ranked: Vec<AuthorImpact> = by_author.into_values().collect();
  ranked.sort_by(|a, b| b.commits.cmp(&a.commits).then_with(|| a.author.cmp(&b.author)));
  ranked.truncate(n);
  ranked
}
