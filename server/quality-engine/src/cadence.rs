//! Commit cadence: commits per day, week and month over the observed span.

use chrono::{DateTime, FixedOffset};
use serde::Serialize;

/// Average commit frequency for one repository. The default (all zeros) is
/// the fallback for a log with no dated commits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Cadence {
  /// Whole days between the earliest and latest commit, at least 1.
  pub span_days: i64,
  pub per_day: f64,
  pub per_week: f64,
  /// Uses a flat 30-day month.
  pub per_month: f64,
}

/// Compute cadence from author timestamps in any order.
///
/// A log spanning less than one whole day is treated as a single day.
/// Returns `None` for an empty slice.
pub fn cadence(timestamps: &[DateTime<FixedOffset>]) -> Option<Cadence> {
  let first = timestamps.iter().min()?;
  let last = timestamps.iter().max()?;

  let span_days = match (*last - *first).num_days() {
    0 => 1,
    d => d,
  };
  let commits = timestamps.len() as f64;
  let days = span_days as f64;

  Some(Cadence {
    span_days,
    per_day: commits / days,
    per_week: commits / (days / 7.0),
    per_month: commits / (days / 30.0),
  })
}

#[cfg(test)]
mod tests {
  use super::*;

  fn ts(s: &str) -> DateTime<FixedOffset> {
    DateTime::parse_from_rfc3339(s).unwrap()
  }

  #[test]
  fn same_day_log_uses_one_day() {
    let stamps = vec![
      ts("2024-05-01T09:00:00Z"),
      ts("2024-05-01T12:00:00Z"),
      ts("2024-05-01T18:00:00Z"),
    ];
    let c = cadence(&stamps).unwrap();
    assert_eq!(c.span_days, 1);
    assert_eq!(c.per_day, 3.0);
    assert!(c.per_day.is_finite());
  }

  #[test]
  fn single_commit_is_one_per_day() {
    let c = cadence(&[ts("2024-05-01T09:00:00Z")]).unwrap();
    assert_eq!(c.per_day, 1.0);
    assert_eq!(c.per_week, 7.0);
    assert_eq!(c.per_month, 30.0);
  }

  #[test]
  fn tolerates_out_of_order_entries() {
    let stamps = vec![
      ts("2024-01-31T00:00:00Z"),
      ts("2024-01-01T00:00:00Z"),
      ts("2024-01-11T00:00:00Z"),
    ];
    let c = cadence(&stamps).unwrap();
    assert_eq!(c.span_days, 30);
    assert!((c.per_day - 0.1).abs() < 1e-12);
    assert!((c.per_week - 0.7).abs() < 1e-12);
    assert!((c.per_month - 3.0).abs() < 1e-12);
  }

  #[test]
  fn partial_days_are_truncated() {
    let stamps = vec![ts("2024-01-01T00:00:00Z"), ts("2024-01-03T23:00:00Z")];
    assert_eq!(cadence(&stamps).unwrap().span_days, 2);
  }

  #[test]
  fn span_is_measured_across_offsets() {
    // Same instant written in two zones.
    let stamps = vec![ts("2024-01-01T10:00:00+02:00"), ts("2024-01-01T08:00:00Z")];
    assert_eq!(cadence(&stamps).unwrap().span_days, 1);
  }

  #[test]
  fn empty_has_no_cadence() {
    assert!(cadence(&[]).is_none());
    let fallback = Cadence::default();
    assert_eq!(fallback.per_day, 0.0);
    assert_eq!(fallback.span_days, 0);
  }
}
