//! Binary entrypoint: read JSON lines from stdin, write JSON lines to stdout.
//!
//! Each input line is one repository's commit log
//! (`{"repository": ..., "commits": [...]}`). Output lines are either:
//! - An AnalysisRecord (keys are the summary table's column headers)
//! - An ErrorOutput (when the line is malformed or no commit is usable)

use quality_engine::normalize::normalize_table;
use quality_engine::types::{ErrorOutput, RepositoryCommits};
use quality_engine::{analyze, Config, EngineError};
use std::io::{self, BufRead, Write};

fn main() {
  let stdin = io::stdin();
  let stdout = io::stdout();
  let mut out = io::BufWriter::new(stdout.lock());
  let config = Config::default();

  for line in stdin.lock().lines() {
    let line = match line {
      Ok(l) => l,
      Err(e) => {
        let _ = writeln!(io::stderr(), "quality-engine: read error: {}", e);
        std::process::exit(1);
      }
    };

    // Skip blank lines.
    let trimmed = line.trim();
    if trimmed.is_empty() {
      continue;
    }

    let raw: RepositoryCommits = match serde_json::from_str(trimmed) {
      Ok(v) => v,
      Err(e) => {
        let err = ErrorOutput::new(format!("json parse: {}", e));
        let _ = serde_json::to_writer(&mut out, &err);
        let _ = writeln!(out);
        continue;
      }
    };

    let table = normalize_table(&raw.repository, raw.commits);
    match analyze(&table, &config) {
      Ok(record) => {
        let _ = serde_json::to_writer(&mut out, &record);
        let _ = writeln!(out);
      }
      Err(e) => {
        let err = match &e {
          EngineError::Validation { field, reason } => {
            ErrorOutput::new(reason.clone()).with_field(field.clone())
          }
          EngineError::EmptyTable { .. } => ErrorOutput::new(e.to_string()).with_field("commits"),
          _ => ErrorOutput::new(e.to_string()),
        };
        let _ = serde_json::to_writer(&mut out, &err);
        let _ = writeln!(out);
      }
    }
  }

  let _ = out.flush();
}
