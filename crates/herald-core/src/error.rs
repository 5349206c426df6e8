//! Error types for `herald-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("invalid id {0:?}: expected at most 16 hex digits")]
  InvalidId(String),
}

/// The first identity invariant an endpoint breaks, as reported by
/// [`Identity::valid`](crate::Identity::valid).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
  #[error("notification endpoint id is invalid")]
  InvalidId,

  #[error("notification endpoint name can't be empty")]
  EmptyName,

  #[error("invalid status {0:?}")]
  InvalidStatus(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
