//! Two-phase decoding.
//!
//! Pipeline:
//!   raw record
//!     └─ Discriminator        → `type` tag only, everything else ignored
//!          └─ constructor_for() → Constructor for that variant
//!               └─ decode_*()     → full variant schema, one pass
//!
//! Identity invariants are not checked here; callers run
//! [`Identity::valid`](herald_core::Identity::valid) when they need to.

use std::{borrow::Cow, fmt};

use herald_core::{EndpointKind, NotificationEndpoint};
use serde::{
  Deserialize, Deserializer,
  de::{self, IgnoredAny, MapAccess, Visitor},
};
use serde_json::Value;

use crate::{
  error::{Error, Result},
  registry::{Constructor, constructor_for},
};

/// Only the tag. Other fields are skipped without being validated, and the
/// record must be an object.
struct Discriminator<'a> {
  tag: Cow<'a, str>,
}

#[derive(Deserialize)]
#[serde(field_identifier, rename_all = "lowercase")]
enum Key {
  Type,
  #[serde(other)]
  Other,
}

#[derive(Deserialize)]
#[serde(transparent)]
struct Tag<'a>(#[serde(borrow)] Cow<'a, str>);

impl<'de> Deserialize<'de> for Discriminator<'de> {
  fn deserialize<D: Deserializer<'de>>(
    deserializer: D,
  ) -> std::result::Result<Self, D::Error> {
    deserializer.deserialize_map(DiscriminatorVisitor)
  }
}

struct DiscriminatorVisitor;

impl<'de> Visitor<'de> for DiscriminatorVisitor {
  type Value = Discriminator<'de>;

  fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str("an object with a string `type` field")
  }

  fn visit_map<A: MapAccess<'de>>(
    self,
    mut map: A,
  ) -> std::result::Result<Self::Value, A::Error> {
    let mut tag = None;
    while let Some(key) = map.next_key::<Key>()? {
      match key {
        Key::Type if tag.is_some() => {
          return Err(de::Error::duplicate_field("type"));
        }
        Key::Type => tag = Some(map.next_value::<Tag<'de>>()?.0),
        Key::Other => {
          map.next_value::<IgnoredAny>()?;
        }
      }
    }
    let tag = tag.ok_or_else(|| de::Error::missing_field("type"))?;
    Ok(Discriminator { tag })
  }
}

pub(crate) fn decode_slice(raw: &[u8]) -> Result<NotificationEndpoint> {
  let Discriminator { tag } = serde_json::from_slice(raw).map_err(malformed)?;
  let ctor = lookup(&tag)?;
  finish(ctor.kind(), ctor.decode_slice(raw))
}

pub(crate) fn decode_value(value: Value) -> Result<NotificationEndpoint> {
  let ctor = {
    let Discriminator { tag } =
      Discriminator::deserialize(&value).map_err(malformed)?;
    lookup(&tag)?
  };
  finish(ctor.kind(), ctor.decode_value(value))
}

/// Decode every element of a JSON array independently.
pub(crate) fn decode_many(
  raw: &[u8],
) -> Result<Vec<Result<NotificationEndpoint>>> {
  let values: Vec<Value> = serde_json::from_slice(raw).map_err(|e| {
    tracing::debug!(error = %e, "notification endpoint batch is not an array");
    Error::MalformedInput(format!("expected an array of endpoints: {e}"))
  })?;
  Ok(values.into_iter().map(decode_value).collect())
}

fn malformed(e: serde_json::Error) -> Error {
  tracing::debug!(error = %e, "notification endpoint has no usable type tag");
  Error::MalformedInput(e.to_string())
}

fn lookup(tag: &str) -> Result<Constructor> {
  constructor_for(tag).ok_or_else(|| {
    tracing::debug!(tag, "unknown notification endpoint type");
    Error::UnknownVariant(tag.to_string())
  })
}

fn finish(
  kind: EndpointKind,
  decoded: serde_json::Result<NotificationEndpoint>,
) -> Result<NotificationEndpoint> {
  match decoded {
    Ok(endpoint) => {
      tracing::debug!(%kind, "decoded notification endpoint");
      Ok(endpoint)
    }
    Err(source) => {
      tracing::debug!(%kind, error = %source, "notification endpoint does not fit its schema");
      Err(Error::SchemaDecode { kind, source })
    }
  }
}

#[cfg(test)]
mod tests {
  use serde_json::json;

  use super::*;

  fn tag_of(raw: &str) -> serde_json::Result<String> {
    serde_json::from_str::<Discriminator<'_>>(raw).map(|d| d.tag.into_owned())
  }

  #[test]
  fn discriminator_ignores_unknown_fields() {
    let raw = r#"{"future": {"nested": [1, 2]}, "type": "slack", "x": null}"#;
    assert_eq!(tag_of(raw).unwrap(), "slack");
  }

  #[test]
  fn discriminator_handles_escaped_tags() {
    assert_eq!(tag_of(r#"{"type": "sl\u0061ck"}"#).unwrap(), "slack");
  }

  #[test]
  fn discriminator_requires_a_string_tag() {
    assert!(tag_of(r#"{"name": "x"}"#).is_err());
    assert!(tag_of(r#"{"type": 3}"#).is_err());
    assert!(tag_of(r#"{"type": null}"#).is_err());
    assert!(tag_of(r#"["slack"]"#).is_err());
    assert!(tag_of(r#"{"type": "slack", "type": "smtp"}"#).is_err());
  }

  #[test]
  fn value_path_matches_slice_path() {
    let record = json!({
      "type": "pagerduty",
      "id": "2",
      "name": "oncall",
      "status": "inactive",
      "clientURL": "https://alerts.example.com",
    });
    let from_value = decode_value(record.clone()).unwrap();
    let from_slice =
      decode_slice(&serde_json::to_vec(&record).unwrap()).unwrap();
    assert_eq!(from_value, from_slice);
  }

  #[test]
  fn value_path_reports_non_string_tag() {
    let err = decode_value(json!({ "type": false })).unwrap_err();
    assert!(matches!(err, Error::MalformedInput(_)));
  }
}
