//! The fixed table from wire tag to endpoint constructor.
//!
//! Built once on first use and never mutated afterwards, so lookups need no
//! synchronisation. Registering a new variant means adding an
//! [`EndpointKind`] and one arm to [`constructor`].

use std::{collections::HashMap, sync::OnceLock};

use herald_core::{
  EndpointKind, NotificationEndpoint,
  endpoint::{PagerDuty, Slack, Smtp, Webhook},
};
use serde::de::DeserializeOwned;
use serde_json::Value;
use strum::IntoEnumIterator;

// ─── Constructor ─────────────────────────────────────────────────────────────

/// Builds and decodes one endpoint variant.
#[derive(Clone, Copy)]
pub struct Constructor {
  kind:       EndpointKind,
  zero:       fn() -> NotificationEndpoint,
  from_slice: fn(&[u8]) -> serde_json::Result<NotificationEndpoint>,
  from_value: fn(Value) -> serde_json::Result<NotificationEndpoint>,
}

impl Constructor {
  fn of<T>(kind: EndpointKind) -> Self
  where
    T: Default + DeserializeOwned + Into<NotificationEndpoint>,
  {
    Self {
      kind,
      zero: zero::<T>,
      from_slice: from_slice::<T>,
      from_value: from_value::<T>,
    }
  }

  pub fn kind(&self) -> EndpointKind { self.kind }

  /// A fresh variant with every field at its zero value. Each call returns an
  /// independent instance.
  pub fn zero(&self) -> NotificationEndpoint { (self.zero)() }

  /// Decode a whole record against this variant's schema.
  pub fn decode_slice(
    &self,
    raw: &[u8],
  ) -> serde_json::Result<NotificationEndpoint> {
    (self.from_slice)(raw)
  }

  /// Like [`decode_slice`](Self::decode_slice), for an already-parsed record.
  pub fn decode_value(
    &self,
    value: Value,
  ) -> serde_json::Result<NotificationEndpoint> {
    (self.from_value)(value)
  }
}

impl std::fmt::Debug for Constructor {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("Constructor").field("kind", &self.kind).finish()
  }
}

fn zero<T>() -> NotificationEndpoint
where
  T: Default + Into<NotificationEndpoint>,
{
  T::default().into()
}

fn from_slice<T>(raw: &[u8]) -> serde_json::Result<NotificationEndpoint>
where
  T: DeserializeOwned + Into<NotificationEndpoint>,
{
  serde_json::from_slice::<T>(raw).map(Into::into)
}

fn from_value<T>(value: Value) -> serde_json::Result<NotificationEndpoint>
where
  T: DeserializeOwned + Into<NotificationEndpoint>,
{
  serde_json::from_value::<T>(value).map(Into::into)
}

// ─── Table ───────────────────────────────────────────────────────────────────

fn constructor(kind: EndpointKind) -> Constructor {
  match kind {
    EndpointKind::Slack => Constructor::of::<Slack>(kind),
    EndpointKind::Smtp => Constructor::of::<Smtp>(kind),
    EndpointKind::PagerDuty => Constructor::of::<PagerDuty>(kind),
    EndpointKind::Webhook => Constructor::of::<Webhook>(kind),
  }
}

fn registry() -> &'static HashMap<&'static str, Constructor> {
  static REGISTRY: OnceLock<HashMap<&'static str, Constructor>> =
    OnceLock::new();
  REGISTRY.get_or_init(|| {
    EndpointKind::iter()
      .map(|kind| {
        let tag: &'static str = kind.into();
        (tag, constructor(kind))
      })
      .collect()
  })
}

/// Look up the constructor registered for `tag`. Matching is exact and
/// case-sensitive; no normalisation is applied.
pub fn constructor_for(tag: &str) -> Option<Constructor> {
  registry().get(tag).copied()
}

/// Every registered tag, sorted.
pub fn registered_tags() -> Vec<&'static str> {
  let mut tags: Vec<_> = registry().keys().copied().collect();
  tags.sort_unstable();
  tags
}

#[cfg(test)]
mod tests {
  use herald_core::{Id, Identity};

  use super::*;

  #[test]
  fn every_kind_is_registered() {
    assert_eq!(
      registered_tags(),
      vec!["pagerduty", "slack", "smtp", "webhook"]
    );
    for kind in EndpointKind::iter() {
      let tag: &'static str = kind.into();
      let ctor = constructor_for(tag).expect("registered");
      assert_eq!(ctor.kind(), kind);
      assert_eq!(ctor.zero().kind(), kind);
    }
  }

  #[test]
  fn lookup_is_exact() {
    assert!(constructor_for("carrier-pigeon").is_none());
    assert!(constructor_for("Slack").is_none());
    assert!(constructor_for(" slack").is_none());
    assert!(constructor_for("").is_none());
  }

  #[test]
  fn zero_values_are_independent() {
    let ctor = constructor_for("webhook").unwrap();
    let mut first = ctor.zero();
    first.set_id(Id::new(5));
    first.set_name("changed".to_string());

    let second = ctor.zero();
    assert_eq!(second.id(), Id::ZERO);
    assert_eq!(second.name(), "");
  }

  #[test]
  fn concurrent_lookups_agree() {
    std::thread::scope(|scope| {
      let handles: Vec<_> = (0..8)
        .map(|_| {
          scope.spawn(|| {
            registered_tags()
              .into_iter()
              .map(|tag| constructor_for(tag).map(|c| c.kind()))
              .collect::<Vec<_>>()
          })
        })
        .collect();
      let results: Vec<_> =
        handles.into_iter().map(|h| h.join().unwrap()).collect();
      assert!(results.windows(2).all(|w| w[0] == w[1]));
    });
  }
}
