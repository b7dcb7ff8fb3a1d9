//! Commit message hygiene heuristics, scored on the title line.

use serde::Serialize;

/// Titles longer than this are penalized like empty ones.
pub const MAX_TITLE_LEN: usize = 72;

/// Ordinal sub-scores for one commit title.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TitleScores {
  pub length: u8,
  pub fullstop: u8,
  pub capital: u8,
}

impl TitleScores {
  pub fn average(&self) -> f64 {
    (self.length as f64 + self.fullstop as f64 + self.capital as f64) / 3.0
  }
}

/// Mean sub-scores across every commit of a repository.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct MessageQuality {
  pub length: f64,
  pub fullstop: f64,
  pub capital: f64,
  /// Mean of per-commit averages.
  pub average: f64,
}

/// Banded title length: 0 or >72 -> 1, <=10 -> 2, <=30 -> 3, <=50 -> 4, else 5.
pub fn length_score(title: &str) -> u8 {
  match title.chars().count() {
    0 => 1,
    n if n > MAX_TITLE_LEN => 1,
    n if n <= 10 => 2,
    n if n <= 30 => 3,
    n if n <= 50 => 4,
    _ => 5,
  }
}

pub fn fullstop_score(title: &str) -> u8 {
  if title.ends_with('.') {
    2
  } else {
    1
  }
}

pub fn capital_score(title: &str) -> u8 {
  match title.chars().next() {
    Some(c) if c.is_uppercase() => 2,
    _ => 1,
  }
}

pub fn score_title(title: &str) -> TitleScores {
  TitleScores {
    length: length_score(title),
    fullstop: fullstop_score(title),
    capital: capital_score(title),
  }
}

/// Average the title scores of a repository. Empty input yields all zeros.
pub fn message_quality<'a>(titles: impl IntoIterator<Item = &'a str>) -> MessageQuality {
  let mut sum = MessageQuality::default();
  let mut n = 0usize;

  for title in titles {
    let s = score_title(title);
    sum.length += s.length as f64;
    sum.fullstop += s.fullstop as f64;
    sum.capital += s.capital as f64;
    sum.average += s.average();
    n += 1;
  }

  if n == 0 {
    return sum;
  }
  let n = n as f64;
  MessageQuality {
    length: sum.length / n,
    fullstop: sum.fullstop / n,
    capital: sum.capital / n,
    average: sum.average / n,
  }
}
