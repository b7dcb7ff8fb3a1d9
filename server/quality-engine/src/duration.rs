//! Project duration as calendar years and months, and its banded score.
//!
//! The analysis record stores the duration as `"<Y> years and <M> months"`;
//! scoring parses the integers back out of that string.

use std::fmt;

use chrono::{DateTime, FixedOffset, Months, NaiveDateTime};
use lazy_static::lazy_static;
use regex::Regex;

use crate::config::BandTable;

/// Whole years and months elapsed between two instants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ProjectDuration {
  pub years: u32,
  /// 0..=11
  pub months: u32,
}

impl ProjectDuration {
  pub fn new(years: u32, months: u32) -> Self {
    Self {
      years: years + months / 12,
      months: months % 12,
    }
  }

  /// Calendar-aware difference; end-of-month dates clamp like a month add.
  pub fn between(earliest: &DateTime<FixedOffset>, latest: &DateTime<FixedOffset>) -> Self {
    let (a, b) = if earliest <= latest {
      (earliest.naive_utc(), latest.naive_utc())
    } else {
      (latest.naive_utc(), earliest.naive_utc())
    };
    let total = whole_months(a, b);
    Self::new(total / 12, total % 12)
  }

  pub fn fractional_years(&self) -> f64 {
    self.years as f64 + self.months as f64 / 12.0
  }

  /// Recover a duration from its formatted form. Missing parts read as zero.
  pub fn parse(s: &str) -> Self {
    lazy_static! {
      static ref YEARS_RE: Result<Regex, regex::Error> = Regex::new(r"(\d+)\s+years?");
      static ref MONTHS_RE: Result<Regex, regex::Error> = Regex::new(r"(\d+)\s+months?");
    }

    let capture = |re: &Result<Regex, regex::Error>| -> u32 {
      re.as_ref()
        .ok()
        .and_then(|re| re.captures(s))
        .and_then(|c| c.get(1))
        .and_then(|m| m.as_str().parse().ok())
        .unwrap_or(0)
    };

    Self {
      years: capture(&*YEARS_RE),
      months: capture(&*MONTHS_RE),
    }
  }
}

impl fmt::Display for ProjectDuration {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{} years and {} months", self.years, self.months)
  }
}

fn whole_months(a: NaiveDateTime, b: NaiveDateTime) -> u32 {
  use chrono::Datelike;

  let mut months =
    (b.year() - a.year()) * 12 + b.month() as i32 - a.month() as i32;
  while months > 0 {
    let reached = a
      .checked_add_months(Months::new(months as u32))
      .is_some_and(|d| d <= b);
    if reached {
      break;
    }
    months -= 1;
  }
  months.max(0) as u32
}

/// Banded score for a formatted duration string.
pub fn duration_score(formatted: &str, bands: &BandTable) -> f64 {
  bands.evaluate(ProjectDuration::parse(formatted).fractional_years())
}
