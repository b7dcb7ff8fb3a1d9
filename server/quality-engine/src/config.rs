//! Scoring model configuration with sane defaults.
//!
//! Every threshold and weight the normalizer uses lives here. A `Config` is
//! built once per scoring run and passed down explicitly.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::types::SubScore;

/// How a value is compared against a band threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Comparison {
  /// `value >= threshold`
  AtLeast,
  /// `value > threshold`
  Above,
}

/// One step of a banding function.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Band {
  pub threshold: f64,
  pub score: f64,
}

/// A step function: the highest qualifying threshold wins, `floor` otherwise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BandTable {
  pub comparison: Comparison,
  pub steps: Vec<Band>,
  #[serde(default)]
  pub floor: f64,
}

impl BandTable {
  pub fn new(comparison: Comparison, steps: &[(f64, f64)]) -> Self {
    let mut steps: Vec<Band> = steps
      .iter()
      .map(|&(threshold, score)| Band { threshold, score })
      .collect();
    steps.sort_by(|a, b| b.threshold.total_cmp(&a.threshold));
    Self {
      comparison,
      steps,
      floor: 0.0,
    }
  }

  pub fn at_least(steps: &[(f64, f64)]) -> Self {
    Self::new(Comparison::AtLeast, steps)
  }

  pub fn above(steps: &[(f64, f64)]) -> Self {
    Self::new(Comparison::Above, steps)
  }

  fn qualifies(&self, value: f64, threshold: f64) -> bool {
    match self.comparison {
      Comparison::AtLeast => value >= threshold,
      Comparison::Above => value > threshold,
    }
  }

  /// Map `value` onto its band score. NaN never qualifies and lands on `floor`.
  pub fn evaluate(&self, value: f64) -> f64 {
    self
      .steps
      .iter()
      .filter(|b| self.qualifies(value, b.threshold))
      .max_by(|a, b| a.threshold.total_cmp(&b.threshold))
      .map(|b| b.score)
      .unwrap_or(self.floor)
  }
}

/// Banding functions for each discretized sub-score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Bands {
  /// Fractional project age in years.
  pub duration: BandTable,
  pub commits_per_day: BandTable,
  /// Distinct author count.
  pub committers: BandTable,
  /// Mean changed lines per commit.
  pub commit_size: BandTable,
}

impl Default for Bands {
  fn default() -> Self {
    Self {
      duration: BandTable::at_least(&[(4.0, 1.0), (3.0, 0.75), (2.0, 0.5), (1.0, 0.25)]),
      commits_per_day: BandTable::above(&[(1.0, 1.0), (0.75, 0.75), (0.5, 0.5), (0.25, 0.25)]),
      committers: BandTable::at_least(&[(100.0, 1.0), (50.0, 0.75), (25.0, 0.5), (10.0, 0.25)]),
      commit_size: BandTable::at_least(&[(100.0, 1.0), (75.0, 0.75), (50.0, 0.5), (25.0, 0.25)]),
    }
  }
}

/// Tunable thresholds and weights for the scoring model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
  /// Commits an author needs to count as an active contributor.
  pub active_contributor_min_commits: u64,
  /// Fixed divisor applied to the raw average message score.
  pub message_score_divisor: f64,
  pub bands: Bands,
  /// Output column name -> weight. Columns not listed are reported but not summed.
  pub weights: BTreeMap<String, f64>,
}

impl Default for Config {
  fn default() -> Self {
    let weights = [
      (SubScore::ProjectDuration, 0.2),
      (SubScore::CommitsPerDay, 0.2),
      (SubScore::AverageScore, 0.1),
      (SubScore::CommitSize, 0.1),
      (SubScore::GiniCommitters, 0.4),
    ]
    .into_iter()
    .map(|(s, w)| (s.column().to_string(), w))
    .collect();

    Self {
      active_contributor_min_commits: 5,
      message_score_divisor: 7.0,
      bands: Bands::default(),
      weights,
    }
  }
}

impl Config {
  /// Parse a TOML document; keys left out keep their defaults.
  pub fn from_toml_str(s: &str) -> Result<Self, EngineError> {
    let config: Config = toml::from_str(s).map_err(|e| EngineError::Config(e.to_string()))?;
    if !(config.message_score_divisor.is_finite() && config.message_score_divisor > 0.0) {
      return Err(EngineError::Config(format!(
        "message_score_divisor must be a positive number, got {}",
        config.message_score_divisor
      )));
    }
    Ok(config)
  }

  pub fn load(path: &Path) -> Result<Self, EngineError> {
    let content = std::fs::read_to_string(path).map_err(|e| EngineError::io(path, e))?;
    Self::from_toml_str(&content)
  }
}
