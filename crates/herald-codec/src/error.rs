//! Error types for the herald-codec decoder.

use herald_core::EndpointKind;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// The record is not JSON, or its `type` field is missing or not a string.
  #[error("unable to detect the notification endpoint type from json: {0}")]
  MalformedInput(String),

  #[error("invalid notification endpoint type {0:?}")]
  UnknownVariant(String),

  /// The tag resolved, but the body does not fit that variant's schema.
  #[error("failed to decode {kind} notification endpoint: {source}")]
  SchemaDecode {
    kind:   EndpointKind,
    #[source]
    source: serde_json::Error,
  },

  #[error("failed to encode notification endpoint: {0}")]
  Encode(#[from] serde_json::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
