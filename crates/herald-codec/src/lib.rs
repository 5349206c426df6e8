//! JSON codec for Herald notification endpoints.
//!
//! A record names its own variant in a `type` field. Decoding reads that tag
//! first, picks the matching variant from a fixed registry, then decodes the
//! whole record against that variant's schema. Pure synchronous; no I/O.
//!
//! # Quick start
//!
//! ```no_run
//! use herald_codec::decode;
//! use herald_core::Identity;
//!
//! let raw = br#"{"type":"slack","id":"1","name":"alerts","status":"active"}"#;
//! let endpoint = decode(raw).unwrap();
//! println!("{} {}", endpoint.kind(), endpoint.name());
//! assert!(endpoint.valid().is_ok());
//! ```

mod decode;
mod encode;
pub mod error;
pub mod registry;

pub use error::{Error, Result};
use herald_core::NotificationEndpoint;
pub use registry::{Constructor, constructor_for, registered_tags};
use serde_json::Value;

// ─── Public API ──────────────────────────────────────────────────────────────

/// Decode one endpoint record.
///
/// Fails with [`Error::MalformedInput`] if `raw` is not a JSON object with a
/// string `type`, [`Error::UnknownVariant`] if no variant is registered for
/// the tag, and [`Error::SchemaDecode`] if the body does not fit the
/// variant. The identity invariants are not checked.
pub fn decode(raw: &[u8]) -> Result<NotificationEndpoint> {
  decode::decode_slice(raw)
}

/// Decode one endpoint from an already-parsed JSON document.
pub fn decode_value(value: Value) -> Result<NotificationEndpoint> {
  decode::decode_value(value)
}

/// Decode a JSON array of endpoint records.
///
/// Each element is decoded independently; a bad element yields `Err(…)` in
/// the corresponding position without aborting the rest. Input that is not
/// an array fails as a whole with [`Error::MalformedInput`].
pub fn decode_many(raw: &[u8]) -> Result<Vec<Result<NotificationEndpoint>>> {
  decode::decode_many(raw)
}

/// Encode `endpoint` as compact JSON, including its `type` tag.
pub fn encode(endpoint: &NotificationEndpoint) -> Result<Vec<u8>> {
  encode::encode(endpoint)
}

/// Encode `endpoint` as indented JSON.
pub fn encode_pretty(endpoint: &NotificationEndpoint) -> Result<Vec<u8>> {
  encode::encode_pretty(endpoint)
}
