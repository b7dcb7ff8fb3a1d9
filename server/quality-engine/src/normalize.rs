//! Normalize inbound commit rows into a canonical CommitTable.

use chrono::{DateTime, FixedOffset};
use log::{debug, warn};

use crate::error::EngineError;
use crate::types::*;

/// Tabular exports write timestamps as `2021-03-04 10:20:30+01:00`.
const TABULAR_FORMAT: &str = "%Y-%m-%d %H:%M:%S%:z";

/// Parse a commit timestamp, keeping its original offset.
pub fn parse_timestamp(s: &str) -> Result<DateTime<FixedOffset>, EngineError> {
  let s = s.trim();
  DateTime::parse_from_rfc3339(s)
    .or_else(|_| DateTime::parse_from_str(s, TABULAR_FORMAT))
    .map_err(|e| EngineError::parse(format!("timestamp {:?}: {}", s, e)))
}

/// Text up to the first line break (the whole message if there is none).
pub fn title_of(message: &str) -> &str {
  let first = message.split('\n').next().unwrap_or_default();
  first.strip_suffix('\r').unwrap_or(first)
}

/// Build a CommitTable from extractor rows, keeping input order.
///
/// Every row is kept. A row whose author date cannot be parsed is logged and
/// left undated, so it still counts for authorship, size and message metrics
/// but not for cadence or duration. Merge and branch flags are trusted as-is;
/// the extractor only hands over non-merge main-branch commits.
pub fn normalize_table(repository: &str, rows: Vec<InboundCommit>) -> CommitTable {
  let mut undated = 0;
  let commits = rows
    .into_iter()
    .map(|row| {
      let commit = normalize_commit(row);
      if commit.author_date.is_none() {
        undated += 1;
      }
      commit
    })
    .collect::<Vec<_>>();

  if undated > 0 {
    warn!(
      "{}: {} of {} commits have an unparsable author date",
      repository,
      undated,
      commits.len()
    );
  }

  CommitTable {
    repository: repository.to_string(),
    commits,
    undated,
  }
}

fn normalize_commit(row: InboundCommit) -> Commit {
  let author_date = match parse_timestamp(&row.author_date) {
    Ok(d) => Some(d),
    Err(e) => {
      debug!("commit {}: author_date: {}", row.hash, e);
      None
    }
  };
  let committer_date = parse_timestamp(&row.committer_date).ok();
  let title = title_of(&row.message).to_string();

  Commit {
    hash: row.hash,
    author_name: row.author_name,
    author_email: row.author_email,
    committer_name: row.committer_name,
    committer_email: row.committer_email,
    author_date,
    author_timezone: row.author_timezone,
    committer_date,
    committer_timezone: row.committer_timezone,
    message: row.message,
    title,
    modified_files: row.modified_files,
    parents: row.parents,
    insertions: row.insertions,
    deletions: row.deletions,
    lines: row.lines,
  }
}
