//! Fixture builders shared by unit tests.

use crate::types::InboundCommit;

pub fn inbound(hash: &str, author: &str, date: &str) -> InboundCommit {
  InboundCommit {
    hash: hash.into(),
    message: "Fix parser\n\nLonger body.".into(),
    author_name: author.into(),
    author_email: format!("{}@example.com", author),
    committer_name: author.into(),
    committer_email: format!("{}@example.com", author),
    author_date: date.into(),
    author_timezone: 0,
    committer_date: date.into(),
    committer_timezone: 0,
    in_main_branch: true,
    merge: false,
    modified_files: vec!["src/lib.rs".into()],
    parents: vec![],
    insertions: 3,
    deletions: 1,
    lines: 4,
  }
}
