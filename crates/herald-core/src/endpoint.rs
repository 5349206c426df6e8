//! Notification endpoint variants.
//!
//! Each variant owns one [`Base`] plus its channel fields. Channel fields
//! default to their zero value when absent, so records written by older or
//! newer producers still decode. [`NotificationEndpoint`] is the closed sum of
//! all variants and serialises with a `type` tag.

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString, IntoStaticStr};

use crate::identity::{Base, Identity};

// ─── Kind ────────────────────────────────────────────────────────────────────

/// The wire tag of each endpoint variant. Must match the `rename_all`
/// serde tags on [`NotificationEndpoint`].
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Hash,
  PartialOrd,
  Ord,
  Serialize,
  Deserialize,
  AsRefStr,
  Display,
  EnumIter,
  EnumString,
  IntoStaticStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum EndpointKind {
  Slack,
  Smtp,
  PagerDuty,
  Webhook,
}

// ─── Shared sub-types ────────────────────────────────────────────────────────

/// A reference to a credential held in a secret store.
///
/// `value` is only ever populated in memory by the caller that resolved the
/// secret; it is never written back out.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecretField {
  pub key:   String,
  #[serde(default, skip_serializing)]
  pub value: Option<String>,
}

impl SecretField {
  pub fn new(key: impl Into<String>) -> Self {
    Self {
      key:   key.into(),
      value: None,
    }
  }
}

// ─── Variants ────────────────────────────────────────────────────────────────

/// Posts to a Slack incoming-webhook URL.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slack {
  #[serde(flatten)]
  base:      Base,
  #[serde(default)]
  pub url:   String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub token: Option<SecretField>,
}

/// Sends mail through an SMTP relay.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Smtp {
  #[serde(flatten)]
  base:         Base,
  #[serde(default)]
  pub host:     String,
  #[serde(default)]
  pub port:     u16,
  #[serde(default)]
  pub username: String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub password: Option<SecretField>,
  #[serde(default)]
  pub from:     String,
  #[serde(default)]
  pub to:       Vec<String>,
  #[serde(default)]
  pub tls:      bool,
}

/// Triggers PagerDuty events for a service.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PagerDuty {
  #[serde(flatten)]
  base:            Base,
  /// Link back to the alerting UI, included in the incident.
  #[serde(rename = "clientURL", default)]
  pub client_url:  String,
  #[serde(rename = "routingKey", default, skip_serializing_if = "Option::is_none")]
  pub routing_key: Option<SecretField>,
}

/// HTTP verb used by a [`Webhook`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
  #[default]
  Post,
  Get,
  Put,
}

/// How a [`Webhook`] authenticates against its target.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthMethod {
  #[default]
  None,
  Basic,
  Bearer,
}

/// Calls an arbitrary HTTP endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Webhook {
  #[serde(flatten)]
  base:                 Base,
  #[serde(default)]
  pub url:              String,
  #[serde(default)]
  pub method:           HttpMethod,
  #[serde(default)]
  pub auth_method:      AuthMethod,
  #[serde(default, skip_serializing_if = "String::is_empty")]
  pub username:         String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub password:         Option<SecretField>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub token:            Option<SecretField>,
  /// Body template; empty means the default JSON payload.
  #[serde(default, skip_serializing_if = "String::is_empty")]
  pub content_template: String,
}

macro_rules! variant {
  ($ty:ident, $kind:ident) => {
    impl $ty {
      pub const KIND: EndpointKind = EndpointKind::$kind;

      /// A variant with the given identity and zero-valued channel fields.
      pub fn new(base: Base) -> Self {
        Self {
          base,
          ..Self::default()
        }
      }
    }

    impl Identity for $ty {
      fn base(&self) -> &Base { &self.base }

      fn base_mut(&mut self) -> &mut Base { &mut self.base }
    }

    impl From<$ty> for NotificationEndpoint {
      fn from(v: $ty) -> Self { Self::$kind(v) }
    }

    impl TryFrom<NotificationEndpoint> for $ty {
      type Error = NotificationEndpoint;

      /// Recover the concrete variant, handing the endpoint back on mismatch.
      fn try_from(endpoint: NotificationEndpoint) -> Result<Self, Self::Error> {
        match endpoint {
          NotificationEndpoint::$kind(v) => Ok(v),
          other => Err(other),
        }
      }
    }
  };
}

variant!(Slack, Slack);
variant!(Smtp, Smtp);
variant!(PagerDuty, PagerDuty);
variant!(Webhook, Webhook);

// ─── NotificationEndpoint ────────────────────────────────────────────────────

/// Any notification endpoint, tagged by `type` on the wire.
///
/// Decoding is not derived: it goes through the tag registry in
/// `herald-codec`, which reports unknown and malformed tags precisely.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum NotificationEndpoint {
  Slack(Slack),
  Smtp(Smtp),
  PagerDuty(PagerDuty),
  Webhook(Webhook),
}

impl NotificationEndpoint {
  pub fn kind(&self) -> EndpointKind {
    match self {
      Self::Slack(_) => EndpointKind::Slack,
      Self::Smtp(_) => EndpointKind::Smtp,
      Self::PagerDuty(_) => EndpointKind::PagerDuty,
      Self::Webhook(_) => EndpointKind::Webhook,
    }
  }

  pub fn as_slack(&self) -> Option<&Slack> {
    match self {
      Self::Slack(v) => Some(v),
      _ => None,
    }
  }

  pub fn as_smtp(&self) -> Option<&Smtp> {
    match self {
      Self::Smtp(v) => Some(v),
      _ => None,
    }
  }

  pub fn as_pager_duty(&self) -> Option<&PagerDuty> {
    match self {
      Self::PagerDuty(v) => Some(v),
      _ => None,
    }
  }

  pub fn as_webhook(&self) -> Option<&Webhook> {
    match self {
      Self::Webhook(v) => Some(v),
      _ => None,
    }
  }
}

impl Identity for NotificationEndpoint {
  fn base(&self) -> &Base {
    match self {
      Self::Slack(v) => v.base(),
      Self::Smtp(v) => v.base(),
      Self::PagerDuty(v) => v.base(),
      Self::Webhook(v) => v.base(),
    }
  }

  fn base_mut(&mut self) -> &mut Base {
    match self {
      Self::Slack(v) => v.base_mut(),
      Self::Smtp(v) => v.base_mut(),
      Self::PagerDuty(v) => v.base_mut(),
      Self::Webhook(v) => v.base_mut(),
    }
  }
}

#[cfg(test)]
mod tests {
  use std::str::FromStr;

  use serde_json::json;
  use strum::IntoEnumIterator;

  use super::*;
  use crate::{Id, Status, ValidationError};

  #[test]
  fn kind_tags_match_serde_tags() {
    for kind in EndpointKind::iter() {
      let tag: &'static str = kind.into();
      assert_eq!(serde_json::to_value(kind).unwrap(), json!(tag));
      assert_eq!(EndpointKind::from_str(tag).unwrap(), kind);
    }
    assert_eq!(EndpointKind::PagerDuty.to_string(), "pagerduty");
  }

  #[test]
  fn kind_parsing_is_case_sensitive() {
    assert!(EndpointKind::from_str("Slack").is_err());
    assert!(EndpointKind::from_str("SMTP").is_err());
  }

  #[test]
  fn endpoint_serialises_with_type_tag() {
    let mut slack = Slack::new(Base::new("alerts").with_id(Id::new(1)));
    slack.url = "https://hooks.slack.com/services/x".to_string();
    let endpoint = NotificationEndpoint::from(slack);

    assert_eq!(
      serde_json::to_value(&endpoint).unwrap(),
      json!({
        "type": "slack",
        "id": "0000000000000001",
        "name": "alerts",
        "status": "active",
        "url": "https://hooks.slack.com/services/x",
      })
    );
    assert_eq!(endpoint.kind(), Slack::KIND);
  }

  #[test]
  fn secret_values_are_never_written() {
    let secret = SecretField {
      key:   "slack-token".to_string(),
      value: Some("xoxb-123".to_string()),
    };
    assert_eq!(
      serde_json::to_value(&secret).unwrap(),
      json!({ "key": "slack-token" })
    );
  }

  #[test]
  fn identity_forwards_to_the_variant_base() {
    let mut endpoint =
      NotificationEndpoint::from(Webhook::new(Base::new("hook")));
    assert_eq!(endpoint.valid(), Err(ValidationError::InvalidId));

    endpoint.set_id(Id::new(9));
    endpoint.set_status(Status::Inactive);
    assert_eq!(endpoint.valid(), Ok(()));

    let webhook = endpoint.as_webhook().unwrap();
    assert_eq!(webhook.id(), Id::new(9));
    assert_eq!(webhook.status(), &Status::Inactive);
  }

  #[test]
  fn type_tests_recover_the_concrete_variant() {
    let endpoint = NotificationEndpoint::from(Smtp::new(Base::new("mail")));
    assert!(endpoint.as_slack().is_none());
    assert!(endpoint.as_smtp().is_some());

    let endpoint = match Slack::try_from(endpoint) {
      Ok(_) => panic!("smtp endpoint converted to slack"),
      Err(endpoint) => endpoint,
    };
    let smtp = Smtp::try_from(endpoint).unwrap();
    assert_eq!(smtp.name(), "mail");
  }

  #[test]
  fn webhook_defaults() {
    let webhook: Webhook = serde_json::from_value(json!({})).unwrap();
    assert_eq!(webhook.method, HttpMethod::Post);
    assert_eq!(webhook.auth_method, AuthMethod::None);
  }
}
