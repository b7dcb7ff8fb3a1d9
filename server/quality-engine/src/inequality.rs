//! Gini-style inequality over per-author commit counts.
//!
//! Polarity is inverted relative to the economic Gini coefficient: 1.0 means
//! every author committed the same amount, and the value falls toward 0 as
//! commits concentrate in fewer hands. Consumers wanting the textbook reading
//! should display `1.0 - gini`.

/// Equality score in [0, 1] for a multiset of commit counts.
///
/// Empty or all-zero input has no defined distribution and returns 0.0.
pub fn gini(counts: &[u64]) -> f64 {
  let total: u64 = counts.iter().sum();
  if counts.is_empty() || total == 0 {
    return 0.0;
  }

  let mut sorted = counts.to_vec();
  sorted.sort_unstable();

  let n = sorted.len() as f64;
  let total = total as f64;
  let mut cumulative = 0u64;
  let mut gap = 0.0;
  for (i, &c) in sorted.iter().enumerate() {
    cumulative += c;
    let population_share = (i + 1) as f64 / n;
    let commit_share = cumulative as f64 / total;
    gap += population_share - commit_share;
  }

  (1.0 - (2.0 / n) * gap).clamp(0.0, 1.0)
}
