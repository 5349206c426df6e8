//! `herald` — inspect notification endpoint records.
//!
//! # Usage
//!
//! ```text
//! herald check endpoints/*.json
//! herald normalize slack.json > slack.canonical.json
//! cat batch.json | herald --config herald.toml check -
//! herald kinds
//! ```

mod report;
mod settings;

use std::{
  io::{self, Read, Write},
  path::{Path, PathBuf},
};

use anyhow::{Context as _, Result, bail};
use clap::{Parser, Subcommand};
use herald_core::Identity;
use report::RecordReport;
use settings::{OutputFormat, Settings};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "herald", version, about = "Inspect notification endpoint records")]
struct Cli {
  /// Path to a TOML settings file (default: ./herald.toml if present).
  #[arg(short, long, value_name = "FILE", global = true)]
  config: Option<PathBuf>,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
  /// Decode and validate records. A file may hold one record or an array.
  Check {
    /// Files to check; `-` reads stdin.
    #[arg(required = true)]
    files: Vec<PathBuf>,
  },
  /// Decode one record and print it in canonical form.
  Normalize {
    /// File to normalize; `-` reads stdin.
    file: PathBuf,
  },
  /// List the registered endpoint types.
  Kinds,
}

// ─── Entry point ──────────────────────────────────────────────────────────────

fn main() -> Result<()> {
  tracing_subscriber::fmt()
    .with_writer(io::stderr)
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();
  let settings = Settings::load(cli.config.as_deref())?;
  tracing::debug!(?settings, "loaded settings");

  match cli.command {
    Command::Check { files } => check(&settings, &files),
    Command::Normalize { file } => normalize(&settings, &file),
    Command::Kinds => {
      for tag in herald_codec::registered_tags() {
        println!("{tag}");
      }
      Ok(())
    }
  }
}

// ─── Commands ─────────────────────────────────────────────────────────────────

fn check(settings: &Settings, files: &[PathBuf]) -> Result<()> {
  let mut reports = Vec::new();
  for path in files {
    let raw = read_input(path)?;
    reports.extend(check_input(&path.display().to_string(), &raw));
  }

  let mut stdout = io::stdout().lock();
  for report in &reports {
    match settings.output {
      OutputFormat::Text => writeln!(stdout, "{report}")?,
      OutputFormat::Json => {
        serde_json::to_writer(&mut stdout, report)?;
        writeln!(stdout)?;
      }
    }
  }

  let failed = reports
    .iter()
    .filter(|r| r.is_failure(settings.require_valid))
    .count();
  if failed > 0 {
    bail!("{failed} of {} record(s) failed", reports.len());
  }
  Ok(())
}

/// Decode one input, which holds either a single record or an array of them.
fn check_input(source: &str, raw: &[u8]) -> Vec<RecordReport> {
  if !is_batch(raw) {
    return vec![RecordReport::new(
      source.to_string(),
      &herald_codec::decode(raw),
    )];
  }
  match herald_codec::decode_many(raw) {
    Ok(results) => results
      .iter()
      .enumerate()
      .map(|(i, decoded)| RecordReport::new(format!("{source}[{i}]"), decoded))
      .collect(),
    Err(e) => vec![RecordReport::failed(source.to_string(), &e)],
  }
}

fn is_batch(raw: &[u8]) -> bool {
  raw.iter().find(|b| !b.is_ascii_whitespace()) == Some(&b'[')
}

fn normalize(settings: &Settings, path: &Path) -> Result<()> {
  let raw = read_input(path)?;
  let endpoint = herald_codec::decode(&raw)
    .with_context(|| format!("failed to decode {}", path.display()))?;

  if let Err(e) = endpoint.valid() {
    if settings.require_valid {
      bail!("{} is not a valid endpoint: {e}", path.display());
    }
    tracing::warn!(path = %path.display(), error = %e, "normalizing invalid endpoint");
  }

  let encoded = if settings.pretty {
    herald_codec::encode_pretty(&endpoint)?
  } else {
    herald_codec::encode(&endpoint)?
  };
  let mut stdout = io::stdout().lock();
  stdout.write_all(&encoded)?;
  writeln!(stdout)?;
  Ok(())
}

fn read_input(path: &Path) -> Result<Vec<u8>> {
  if path == Path::new("-") {
    let mut buf = Vec::new();
    io::stdin()
      .lock()
      .read_to_end(&mut buf)
      .context("failed to read stdin")?;
    return Ok(buf);
  }
  std::fs::read(path).with_context(|| format!("failed to read {}", path.display()))
}

#[cfg(test)]
mod tests {
  use clap::CommandFactory;

  use super::*;
  use crate::report::Outcome;

  #[test]
  fn cli_definition_is_consistent() { Cli::command().debug_assert(); }

  #[test]
  fn batch_detection_skips_leading_whitespace() {
    assert!(is_batch(b"  \n[{}]"));
    assert!(!is_batch(br#"{"type": "slack"}"#));
    assert!(!is_batch(b""));
  }

  #[test]
  fn single_record_input_yields_one_report() {
    let raw = br#"{"type": "slack", "id": "1", "name": "a", "status": "active"}"#;
    let reports = check_input("one.json", raw);
    assert_eq!(reports.len(), 1);
    assert_eq!(reports[0].source, "one.json");
    assert_eq!(reports[0].outcome, Outcome::Valid);
  }

  #[test]
  fn batch_input_is_indexed_per_element() {
    let raw = br#"[
      {"type": "slack", "id": "1", "name": "a", "status": "active"},
      {"type": "smtp", "id": "", "name": "b", "status": "active"},
      {"type": "carrier-pigeon"}
    ]"#;
    let reports = check_input("batch.json", raw);
    let sources: Vec<_> = reports.iter().map(|r| r.source.as_str()).collect();
    assert_eq!(sources, ["batch.json[0]", "batch.json[1]", "batch.json[2]"]);
    assert_eq!(reports[0].outcome, Outcome::Valid);
    assert!(matches!(reports[1].outcome, Outcome::Invalid { .. }));
    assert!(matches!(reports[2].outcome, Outcome::DecodeFailed { .. }));
  }

  #[test]
  fn broken_batch_is_one_failure() {
    let reports = check_input("broken.json", b"[{");
    assert_eq!(reports.len(), 1);
    assert!(reports[0].is_failure(false));
  }
}
