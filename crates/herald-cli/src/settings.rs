//! Runtime settings, layered from defaults, an optional TOML file and
//! `HERALD_*` environment variables (later sources win).

use std::path::Path;

use anyhow::Context as _;
use config::{Config, ConfigBuilder, Environment, File, builder::DefaultState};
use serde::Deserialize;

/// How `check` prints its results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
  Text,
  /// One JSON object per record.
  Json,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
  pub output:        OutputFormat,
  /// Treat identity validation failures as errors.
  pub require_valid: bool,
  /// Indent the output of `normalize`.
  pub pretty:        bool,
}

impl Settings {
  /// Load settings from `path` if given, otherwise from `herald.toml` in the
  /// working directory when it exists.
  pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
    let file = match path {
      Some(path) => File::from(path).required(true),
      None => File::with_name("herald").required(false),
    };

    defaults()?
      .add_source(file)
      .add_source(Environment::with_prefix("HERALD"))
      .build()
      .context("failed to read configuration")?
      .try_deserialize()
      .context("failed to deserialise Settings")
  }
}

fn defaults() -> anyhow::Result<ConfigBuilder<DefaultState>> {
  Config::builder()
    .set_default("output", "text")?
    .set_default("require_valid", true)?
    .set_default("pretty", true)
    .context("invalid default settings")
}

#[cfg(test)]
mod tests {
  use std::collections::HashMap;

  use config::FileFormat;

  use super::*;

  fn from_toml(toml: &str) -> Settings {
    defaults()
      .unwrap()
      .add_source(File::from_str(toml, FileFormat::Toml))
      .build()
      .unwrap()
      .try_deserialize()
      .unwrap()
  }

  #[test]
  fn defaults_apply_when_file_is_empty() {
    let settings = from_toml("");
    assert_eq!(settings.output, OutputFormat::Text);
    assert!(settings.require_valid);
    assert!(settings.pretty);
  }

  #[test]
  fn file_overrides_defaults() {
    let settings = from_toml(
      r#"
        output = "json"
        require_valid = false
      "#,
    );
    assert_eq!(settings.output, OutputFormat::Json);
    assert!(!settings.require_valid);
    assert!(settings.pretty);
  }

  #[test]
  fn environment_overrides_file() {
    let env = HashMap::from([
      ("HERALD_REQUIRE_VALID".to_string(), "false".to_string()),
      ("HERALD_OUTPUT".to_string(), "json".to_string()),
    ]);
    let settings: Settings = defaults()
      .unwrap()
      .add_source(File::from_str("require_valid = true", FileFormat::Toml))
      .add_source(Environment::with_prefix("HERALD").source(Some(env)))
      .build()
      .unwrap()
      .try_deserialize()
      .unwrap();
    assert!(!settings.require_valid);
    assert_eq!(settings.output, OutputFormat::Json);
    assert!(settings.pretty);
  }

  #[test]
  fn unknown_output_format_is_rejected() {
    let result = defaults()
      .unwrap()
      .add_source(File::from_str(r#"output = "xml""#, FileFormat::Toml))
      .build()
      .unwrap()
      .try_deserialize::<Settings>();
    assert!(result.is_err());
  }
}
