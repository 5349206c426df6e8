//! The identity record shared by every notification endpoint.
//!
//! Each endpoint variant owns exactly one [`Base`]. Its fields are private;
//! callers read and change them through the [`Identity`] trait, which every
//! variant implements by forwarding to its base.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{ValidationError, id::Id};

// ─── Status ──────────────────────────────────────────────────────────────────

/// Whether an endpoint is in use.
///
/// Only `active` and `inactive` are meaningful. Any other wire value decodes
/// to [`Status::Unrecognized`] so the record can still be inspected, and is
/// then rejected by [`Identity::valid`]. Build statuses from text with
/// `Status::from`, which always yields the canonical variant.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Status {
  Active,
  Inactive,
  Unrecognized(UnknownStatus),
}

/// Status text that is neither `active` nor `inactive`. Only constructed by
/// `Status::from`, so it never holds a recognized value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct UnknownStatus(String);

impl UnknownStatus {
  pub fn as_str(&self) -> &str { &self.0 }
}

impl Status {
  pub fn as_str(&self) -> &str {
    match self {
      Self::Active => "active",
      Self::Inactive => "inactive",
      Self::Unrecognized(s) => s.as_str(),
    }
  }

  pub fn is_recognized(&self) -> bool { !matches!(self, Self::Unrecognized(_)) }
}

/// The zero status is the empty string, which is not a recognized status.
impl Default for Status {
  fn default() -> Self { Self::Unrecognized(UnknownStatus::default()) }
}

impl From<String> for Status {
  fn from(s: String) -> Self {
    match s.as_str() {
      "active" => Self::Active,
      "inactive" => Self::Inactive,
      _ => Self::Unrecognized(UnknownStatus(s)),
    }
  }
}

impl From<Status> for String {
  fn from(status: Status) -> Self {
    match status {
      Status::Unrecognized(UnknownStatus(s)) => s,
      known => known.as_str().to_string(),
    }
  }
}

impl fmt::Display for Status {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

// ─── Audit log ───────────────────────────────────────────────────────────────

/// Creation and last-modification timestamps.
///
/// Set by the persistence layer only. Decoding carries whatever timestamps the
/// record already holds and never stamps new ones.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CrudLog {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub created_at: Option<DateTime<Utc>>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub updated_at: Option<DateTime<Utc>>,
}

// ─── Base ────────────────────────────────────────────────────────────────────

/// The identity fields embedded in every endpoint variant.
///
/// Every field defaults to its zero value when absent from a record, so a
/// partially-built endpoint still decodes; [`Identity::valid`] decides
/// whether it is complete.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Base {
  #[serde(default, skip_serializing_if = "Id::is_zero")]
  id:          Id,
  #[serde(default)]
  name:        String,
  /// Empty means no description.
  #[serde(default, skip_serializing_if = "String::is_empty")]
  description: String,
  #[serde(rename = "orgID", default, skip_serializing_if = "Id::is_zero")]
  org_id:      Id,
  #[serde(default)]
  status:      Status,
  #[serde(flatten)]
  crud_log:    CrudLog,
}

impl Base {
  /// A new, active endpoint base with no id or organization assigned yet.
  pub fn new(name: impl Into<String>) -> Self {
    Self {
      name: name.into(),
      status: Status::Active,
      ..Self::default()
    }
  }

  pub fn with_id(mut self, id: Id) -> Self {
    self.id = id;
    self
  }

  pub fn with_org_id(mut self, org_id: Id) -> Self {
    self.org_id = org_id;
    self
  }

  pub fn with_description(mut self, description: impl Into<String>) -> Self {
    self.description = description.into();
    self
  }

  pub fn with_status(mut self, status: Status) -> Self {
    self.status = status;
    self
  }

  /// Attach timestamps when rehydrating a stored endpoint.
  pub fn with_crud_log(mut self, crud_log: CrudLog) -> Self {
    self.crud_log = crud_log;
    self
  }
}

// ─── Identity ────────────────────────────────────────────────────────────────

/// Uniform access to the identity fields of any endpoint.
///
/// Implementors only supply [`base`](Identity::base) and
/// [`base_mut`](Identity::base_mut). The setters touch nothing but the base's
/// own fields: they do not validate, persist, or notify.
pub trait Identity {
  fn base(&self) -> &Base;

  fn base_mut(&mut self) -> &mut Base;

  fn id(&self) -> Id { self.base().id }

  fn set_id(&mut self, id: Id) { self.base_mut().id = id; }

  fn name(&self) -> &str { &self.base().name }

  fn set_name(&mut self, name: String) { self.base_mut().name = name; }

  fn description(&self) -> Option<&str> {
    let description = &self.base().description;
    (!description.is_empty()).then_some(description.as_str())
  }

  fn set_description(&mut self, description: Option<String>) {
    self.base_mut().description = description.unwrap_or_default();
  }

  fn org_id(&self) -> Id { self.base().org_id }

  fn set_org_id(&mut self, org_id: Id) { self.base_mut().org_id = org_id; }

  fn status(&self) -> &Status { &self.base().status }

  fn set_status(&mut self, status: Status) { self.base_mut().status = status; }

  fn crud_log(&self) -> &CrudLog { &self.base().crud_log }

  /// Check the identity invariants, returning the first one violated.
  ///
  /// Checked in order: the id is assigned, the name is non-empty, the status
  /// is `active` or `inactive`.
  fn valid(&self) -> Result<(), ValidationError> {
    let base = self.base();
    if !base.id.is_valid() {
      return Err(ValidationError::InvalidId);
    }
    if base.name.is_empty() {
      return Err(ValidationError::EmptyName);
    }
    if let Status::Unrecognized(s) = &base.status {
      return Err(ValidationError::InvalidStatus(s.as_str().to_string()));
    }
    Ok(())
  }
}

impl Identity for Base {
  fn base(&self) -> &Base { self }

  fn base_mut(&mut self) -> &mut Base { self }
}
