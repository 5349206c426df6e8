//! Per-record results of `herald check`.

use std::fmt;

use herald_core::{EndpointKind, Identity, NotificationEndpoint};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Outcome {
  Valid,
  Invalid { reason: String },
  DecodeFailed { reason: String },
}

#[derive(Debug, Clone, Serialize)]
pub struct RecordReport {
  /// File name, with the array index for batch files (`alerts.json[2]`).
  pub source:  String,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub kind:    Option<EndpointKind>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub id:      Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub name:    Option<String>,
  #[serde(flatten)]
  pub outcome: Outcome,
}

impl RecordReport {
  pub fn new(
    source: String,
    decoded: &herald_codec::Result<NotificationEndpoint>,
  ) -> Self {
    match decoded {
      Ok(endpoint) => Self::decoded(source, endpoint),
      Err(e) => Self::failed(source, e),
    }
  }

  pub fn decoded(source: String, endpoint: &NotificationEndpoint) -> Self {
    let outcome = match endpoint.valid() {
      Ok(()) => Outcome::Valid,
      Err(e) => Outcome::Invalid {
        reason: e.to_string(),
      },
    };
    Self {
      source,
      kind: Some(endpoint.kind()),
      id: Some(endpoint.id().to_string()),
      name: Some(endpoint.name().to_string()),
      outcome,
    }
  }

  pub fn failed(source: String, error: &herald_codec::Error) -> Self {
    Self {
      source,
      kind: None,
      id: None,
      name: None,
      outcome: Outcome::DecodeFailed {
        reason: error.to_string(),
      },
    }
  }

  /// Whether this record should fail the run. Invalid records only count
  /// when `require_valid` is set.
  pub fn is_failure(&self, require_valid: bool) -> bool {
    match self.outcome {
      Outcome::Valid => false,
      Outcome::Invalid { .. } => require_valid,
      Outcome::DecodeFailed { .. } => true,
    }
  }
}

impl fmt::Display for RecordReport {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}:", self.source)?;
    if let (Some(kind), Some(id), Some(name)) = (&self.kind, &self.id, &self.name)
    {
      write!(f, " {kind} {id} {name:?}")?;
    }
    match &self.outcome {
      Outcome::Valid => write!(f, " ok"),
      Outcome::Invalid { reason } => write!(f, " invalid: {reason}"),
      Outcome::DecodeFailed { reason } => write!(f, " error: {reason}"),
    }
  }
}
