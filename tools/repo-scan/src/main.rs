//! repo-scan: batch analysis and quality scoring over a repository store
//!
//! Usage:
//!   repo-scan analyze <STORE>                     # write <repo>_analysis.json and _authors.json
//!   repo-scan score <STORE> [-c FILE] [-o FILE]   # write repository_quality_scores.json
//!   repo-scan summary <STORE>                     # corpus totals and top file types
//!
//! A store holds one folder per repository containing `<repo>_commits.json`
//! as written by the history extractor. Repositories with missing, empty or
//! unparsable files are reported and skipped; the batch always completes.

use std::path::{Path, PathBuf};
use std::process;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use log::{info, warn};
use rayon::prelude::*;
use walkdir::WalkDir;

use quality_engine::analysis::{self, AuthorImpact};
use quality_engine::corpus;
use quality_engine::store;
use quality_engine::{score_table, Config, CrossRepositoryTable, RepoOutcome};

#[derive(Parser, Debug)]
#[command(name = "repo-scan", version, about = "Score repository health from commit history")]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace). RUST_LOG overrides.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Analyze every repository folder's commit table.
    Analyze {
        store: PathBuf,
        /// Scoring model configuration (TOML).
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Score every analysis summary found under the store.
    Score {
        store: PathBuf,
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Output table (defaults to <STORE>/repository_quality_scores.json).
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Print corpus totals over repositories with both a summary and commits.
    Summary { store: PathBuf },
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default))
        .format_timestamp(None)
        .init();
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(p) => Config::load(p).with_context(|| format!("cannot load config {}", p.display())),
        None => Ok(Config::default()),
    }
}

/// Immediate subfolders of the store, sorted by name.
fn repository_dirs(store: &Path) -> Result<Vec<PathBuf>> {
    let mut dirs = Vec::new();
    let entries = std::fs::read_dir(store)
        .with_context(|| format!("cannot read store {}", store.display()))?;
    for entry in entries {
        let path = entry?.path();
        if path.is_dir() {
            dirs.push(path);
        }
    }
    dirs.sort();
    Ok(dirs)
}

/// Every `*_analysis.json` below the store, in file-name order.
fn discover_summaries(store: &Path) -> Vec<PathBuf> {
    WalkDir::new(store)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| match e {
            Ok(e) => Some(e),
            Err(err) => {
                warn!("skipping unreadable entry: {}", err);
                None
            }
        })
        .filter(|e| e.file_type().is_file())
        .filter(|e| e.file_name().to_string_lossy().ends_with(store::ANALYSIS_SUFFIX))
        .map(|e| e.into_path())
        .collect()
}

fn folder_of(path: &Path) -> String {
    path.parent()
        .map(store::repository_name)
        .unwrap_or_default()
}

fn print_authors(repository: &str, authors: &[AuthorImpact]) {
    println!("-- {} top authors --", repository);
    println!("  {:<32} {:>8} {:>10} {:>10}", "author", "commits", "insertions", "deletions");
    for a in authors {
        println!(
            "  {:<32} {:>8} {:>10} {:>10}",
            a.author, a.commits, a.insertions, a.deletions
        );
    }
}

fn analyze(store_dir: &Path, config_path: Option<&Path>) -> Result<()> {
    let config = load_config(config_path)?;
    let dirs = repository_dirs(store_dir)?;
    info!("analyzing {} repository folders", dirs.len());

    let outcomes: Vec<_> = dirs
        .par_iter()
        .map(|dir| {
            let repository = store::repository_name(dir);
            match store::read_commit_table(&store::commits_path(dir), &repository) {
                RepoOutcome::Analyzed(table) => {
                    let authors = analysis::top_authors(&table, analysis::TOP_AUTHORS);
                    match store::analyze_table(&table, &config) {
                        RepoOutcome::Analyzed(record) => RepoOutcome::Analyzed((record, authors)),
                        RepoOutcome::Skipped { repository, reason } => {
                            RepoOutcome::Skipped { repository, reason }
                        }
                    }
                }
                RepoOutcome::Skipped { repository, reason } => {
                    RepoOutcome::Skipped { repository, reason }
                }
            }
        })
        .collect();

    let mut written = 0;
    for (dir, outcome) in dirs.iter().zip(outcomes) {
        match outcome {
            RepoOutcome::Analyzed((record, authors)) => {
                let path = store::analysis_path(dir);
                let saved = store::write_analysis(&path, &record)
                    .and_then(|()| store::write_authors(&store::authors_path(dir), &authors));
                match saved {
                    Ok(()) => {
                        written += 1;
                        info!("{}: analysis written to {}", record.repository, path.display());
                    }
                    Err(e) => warn!("{}: {}", record.repository, e),
                }
                print_authors(&record.repository, &authors);
            }
            RepoOutcome::Skipped { repository, reason } => {
                println!("Skipped {}: {}", repository, reason);
            }
        }
    }

    println!("Analyzed {} of {} repositories", written, dirs.len());
    Ok(())
}

fn score(store_dir: &Path, config_path: Option<&Path>, output: Option<&Path>) -> Result<()> {
    let config = load_config(config_path)?;
    let paths = discover_summaries(store_dir);
    info!("scoring {} analysis summaries", paths.len());

    let outcomes: Vec<_> = paths
        .par_iter()
        .map(|path| {
            let folder = folder_of(path);
            match store::read_analysis(path, &folder) {
                RepoOutcome::Analyzed(mut record) => {
                    record.repository = folder;
                    RepoOutcome::Analyzed(record)
                }
                skipped => skipped,
            }
        })
        .collect();
    let table = CrossRepositoryTable::from_outcomes(outcomes);

    let scores = score_table(table.records(), &config).context("scoring model is misconfigured")?;

    let output = output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| store_dir.join(store::SCORES_FILE));
    store::write_scores(&output, &scores)
        .with_context(|| format!("cannot write {}", output.display()))?;

    println!("-- Repository Quality Scores --");
    for s in &scores {
        println!("{:<48} {:.3}", s.repository, s.overall);
    }
    for (repository, reason) in table.skipped() {
        println!("Skipped {}: {}", repository, reason);
    }
    println!("Saved {} scores to {}", scores.len(), output.display());
    Ok(())
}

fn summary(store_dir: &Path) -> Result<()> {
    let dirs = repository_dirs(store_dir)?;

    let tables: Vec<_> = dirs
        .par_iter()
        .filter_map(|dir| {
            if store::load_summary(dir).is_skipped() {
                return None;
            }
            match store::read_commit_table(&store::commits_path(dir), &store::repository_name(dir)) {
                RepoOutcome::Analyzed(table) => Some(table),
                RepoOutcome::Skipped { repository, reason } => {
                    info!("skipping {}: {}", repository, reason);
                    None
                }
            }
        })
        .collect();

    let summary = corpus::summarize(&tables);
    println!("----------------------------------------");
    println!("Total number of repositories: {}", summary.repositories);
    println!(
        "Total number of commits across all repositories: {}",
        summary.total_commits
    );
    println!("Most commonly changed file types:");
    for (ext, count) in &summary.top_extensions {
        println!("  {:<12} {}", ext, count);
    }
    println!("----------------------------------------");
    Ok(())
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Analyze { store, config } => analyze(&store, config.as_deref()),
        Command::Score {
            store,
            config,
            output,
        } => score(&store, config.as_deref(), output.as_deref()),
        Command::Summary { store } => summary(&store),
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("repo-scan: {:#}", e);
        process::exit(2);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn discovers_nested_summaries_in_order() {
        let root = TempDir::new().unwrap();
        for name in ["zeta", "alpha"] {
            let dir = root.path().join(name);
            fs::create_dir_all(&dir).unwrap();
            fs::write(store::analysis_path(&dir), "{}").unwrap();
            fs::write(dir.join("notes.txt"), "x").unwrap();
        }

        let found = discover_summaries(root.path());
        let folders: Vec<_> = found.iter().map(|p| folder_of(p)).collect();
        assert_eq!(folders, ["alpha", "zeta"]);
    }

    #[test]
    fn repository_dirs_ignore_files() {
        let root = TempDir::new().unwrap();
        fs::create_dir_all(root.path().join("b")).unwrap();
        fs::create_dir_all(root.path().join("a")).unwrap();
        fs::write(root.path().join("stray.json"), "[]").unwrap();

        let dirs = repository_dirs(root.path()).unwrap();
        let names: Vec<_> = dirs.iter().map(|d| store::repository_name(d)).collect();
        assert_eq!(names, ["a", "b"]);
    }

    #[test]
    fn cli_parses_score_options() {
        let cli = Cli::try_parse_from(["repo-scan", "-v", "score", "data", "-o", "out.json"]).unwrap();
        assert_eq!(cli.verbose, 1);
        match cli.command {
            Command::Score { store, output, config } => {
                assert_eq!(store, PathBuf::from("data"));
                assert_eq!(output, Some(PathBuf::from("out.json")));
                assert!(config.is_none());
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    const COMMITS: &str = r#"[
      {"hash": "a1", "msg": "Add parser", "author_name": "alice", "author_date": "2024-01-01T00:00:00Z", "insertions": 30, "deletions": 5, "lines": 35},
      {"hash": "a2", "msg": "Add lexer", "author_name": "alice", "author_date": "2024-03-01T00:00:00Z", "insertions": 10, "deletions": 2, "lines": 12},
      {"hash": "b1", "msg": "Fix typo", "author_name": "bob", "author_date": "unknown", "insertions": 1, "deletions": 1, "lines": 2}
    ]"#;

    fn read_value(path: &Path) -> serde_json::Value {
        serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
    }

    #[test]
    fn analyze_writes_summary_and_author_breakdown() {
        let root = TempDir::new().unwrap();
        let dir = root.path().join("acme");
        fs::create_dir_all(&dir).unwrap();
        fs::write(store::commits_path(&dir), COMMITS).unwrap();
        fs::create_dir_all(root.path().join("hollow")).unwrap();

        analyze(root.path(), None).unwrap();

        let summary = read_value(&store::analysis_path(&dir));
        assert_eq!(summary["Project Name"], "acme");
        assert_eq!(summary["Number of Contributors"], 2);

        let authors = read_value(&store::authors_path(&dir));
        assert_eq!(authors[0]["Author Name"], "alice");
        assert_eq!(authors[0]["Commits"], 2);
        assert_eq!(authors[0]["Insertions"], 40);
        assert_eq!(authors[0]["Deletions"], 7);
        assert_eq!(authors[1]["Author Name"], "bob");
        assert!(!store::analysis_path(&root.path().join("hollow")).exists());
    }

    #[test]
    fn score_keys_rows_by_folder_name() {
        let root = TempDir::new().unwrap();
        let dir = root.path().join("acme-widgets");
        fs::create_dir_all(&dir).unwrap();
        let summary = r#"{
          "Project Name": "renamed-upstream",
          "Project Duration (Years and Months)": "5 years and 2 months",
          "Gini Coefficient": 0.9,
          "Number of Contributors": 120,
          "Average Commits per Day": 3.5,
          "Average Commit Size": 140.0,
          "Average Score": 2.8
        }"#;
        fs::write(store::analysis_path(&dir), summary).unwrap();
        let output = root.path().join("scores.json");

        score(root.path(), None, Some(output.as_path())).unwrap();

        let rows = read_value(&output);
        assert_eq!(rows.as_array().unwrap().len(), 1);
        assert_eq!(rows[0]["Folder Name"], "acme-widgets");
        assert_eq!(rows[0]["Overall Quality Score"], 0.9);
        assert!(!root.path().join(store::SCORES_FILE).exists());
    }
}
