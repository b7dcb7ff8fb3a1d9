//! Cross-repository aggregation: ordered concatenation of per-repository
//! records, with skipped repositories kept on the side.

use log::info;

use crate::types::{AnalysisRecord, RepoOutcome, SkipReason};

/// Records for every successfully processed repository, in input order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CrossRepositoryTable {
  records: Vec<AnalysisRecord>,
  skipped: Vec<(String, SkipReason)>,
}

impl CrossRepositoryTable {
  pub fn new() -> Self {
    Self::default()
  }

  /// Concatenate outcomes. Skips are logged and never fail the batch.
  pub fn from_outcomes(outcomes: impl IntoIterator<Item = RepoOutcome<AnalysisRecord>>) -> Self {
    let mut table = Self::new();
    for outcome in outcomes {
      table.push(outcome);
    }
    table
  }

  pub fn push(&mut self, outcome: RepoOutcome<AnalysisRecord>) {
    match outcome {
      RepoOutcome::Analyzed(record) => self.records.push(record),
      RepoOutcome::Skipped { repository, reason } => {
        info!("skipping {}: {}", repository, reason);
        self.skipped.push((repository, reason));
      }
    }
  }

  pub fn records(&self) -> &[AnalysisRecord] {
    &self.records
  }

  pub fn skipped(&self) -> &[(String, SkipReason)] {
    &self.skipped
  }

  pub fn len(&self) -> usize {
    self.records.len()
  }

  pub fn is_empty(&self) -> bool {
    self.records.is_empty()
  }

  pub fn into_records(self) -> Vec<AnalysisRecord> {
    self.records
  }
}

impl FromIterator<RepoOutcome<AnalysisRecord>> for CrossRepositoryTable {
  fn from_iter<I: IntoIterator<Item = RepoOutcome<AnalysisRecord>>>(iter: I) -> Self {
    Self::from_outcomes(iter)
  }
}
