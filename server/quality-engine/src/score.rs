//! Score normalizer and weighting model.
//!
//! Maps each analysis record onto bounded sub-scores, weights the columns
//! named in the weight table and sums them into the Overall Quality Score.

use std::collections::BTreeMap;

use log::warn;

use crate::config::Config;
use crate::duration;
use crate::error::EngineError;
use crate::participation;
use crate::types::*;

/// Resolved weight table, in output column order.
#[derive(Debug, Clone, PartialEq)]
pub struct WeightTable {
  entries: Vec<(SubScore, f64)>,
}

impl WeightTable {
  /// Resolve column names to sub-scores. An unknown column or a non-finite
  /// weight is a configuration defect.
  pub fn resolve(weights: &BTreeMap<String, f64>) -> Result<Self, EngineError> {
    let mut entries = Vec::with_capacity(weights.len());
    for (column, &weight) in weights {
      let sub = SubScore::from_column(column)
        .ok_or_else(|| EngineError::UnknownColumn(column.clone()))?;
      if !weight.is_finite() {
        return Err(EngineError::Config(format!(
          "weight for {:?} is not a finite number",
          column
        )));
      }
      entries.push((sub, weight));
    }
    entries.sort_by_key(|(s, _)| *s);
    Ok(Self { entries })
  }

  pub fn entries(&self) -> &[(SubScore, f64)] {
    &self.entries
  }

  pub fn weight(&self, sub: SubScore) -> Option<f64> {
    self.entries.iter().find(|(s, _)| *s == sub).map(|(_, w)| *w)
  }

  /// Sum of all weights; 1.0 keeps the overall score on [0, 1].
  pub fn total(&self) -> f64 {
    self.entries.iter().map(|(_, w)| w).sum()
  }
}

/// Round half away from zero to 3 decimal places.
fn round3(x: f64) -> f64 {
  (x * 1000.0).round() / 1000.0
}

/// Score one repository with an already resolved weight table.
pub fn score_record(record: &AnalysisRecord, config: &Config, weights: &WeightTable) -> QualityScore {
  let bands = &config.bands;
  let committers = participation::committer_scale(record.contributors, &bands.committers);

  let mut score = QualityScore {
    repository: record.repository.clone(),
    gini: record.gini,
    project_duration: duration::duration_score(&record.duration, &bands.duration),
    commits_per_day: bands.commits_per_day.evaluate(record.commits_per_day),
    average_score: record.message_score / config.message_score_divisor,
    committers,
    commit_size: bands.commit_size.evaluate(record.average_commit_size),
    gini_committers: record.gini * committers,
    overall: 0.0,
    weighted: BTreeMap::new(),
  };

  let mut total = 0.0;
  for &(sub, weight) in weights.entries() {
    let contribution = score.sub_score(sub) * weight;
    score.weighted.insert(sub.weighted_column(), contribution);
    total += contribution;
  }
  score.overall = round3(total);
  score
}

/// Score every record of a cross-repository table, preserving order.
///
/// Only a defective weight table fails the run.
pub fn score_table(records: &[AnalysisRecord], config: &Config) -> Result<Vec<QualityScore>, EngineError> {
  let weights = WeightTable::resolve(&config.weights)?;
  if (weights.total() - 1.0).abs() > 1e-9 {
    warn!(
      "weights sum to {:.6}; overall scores will not span [0, 1]",
      weights.total()
    );
  }
  Ok(records.iter().map(|r| score_record(r, config, &weights)).collect())
}
