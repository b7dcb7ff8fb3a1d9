//! Contributor participation: share of active authors and committer scale.

use crate::config::BandTable;

/// Percentage (0-100) of authors with at least `min_commits` commits.
///
/// # Panics
///
/// Panics when `counts` is empty; callers must have at least one author.
pub fn percentage_active(counts: &[u64], min_commits: u64) -> f64 {
  assert!(
    !counts.is_empty(),
    "percentage_active requires at least one author"
  );
  let active = counts.iter().filter(|&&c| c >= min_commits).count();
  100.0 * active as f64 / counts.len() as f64
}

/// Discretized score for the number of distinct authors.
pub fn committer_scale(authors: u64, bands: &BandTable) -> f64 {
  bands.evaluate(authors as f64)
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::config::Bands;

  #[test]
  fn active_share() {
    assert_eq!(percentage_active(&[8, 2], 5), 50.0);
    assert_eq!(percentage_active(&[5, 5, 5], 5), 100.0);
    assert_eq!(percentage_active(&[1, 4], 5), 0.0);
  }

  #[test]
  #[should_panic(expected = "at least one author")]
  fn zero_authors_is_a_programming_error() {
    percentage_active(&[], 5);
  }

  #[test]
  fn committer_bands() {
    let bands = Bands::default().committers;
    assert_eq!(committer_scale(2, &bands), 0.0);
    assert_eq!(committer_scale(9, &bands), 0.0);
    assert_eq!(committer_scale(10, &bands), 0.25);
    assert_eq!(committer_scale(25, &bands), 0.5);
    assert_eq!(committer_scale(49, &bands), 0.5);
    assert_eq!(committer_scale(50, &bands), 0.75);
    assert_eq!(committer_scale(100, &bands), 1.0);
    assert_eq!(committer_scale(5000, &bands), 1.0);
  }
}
