//! Opaque 64-bit identifiers for endpoints and their owning organizations.
//!
//! On the wire an id is a hex string. Encoding always produces 16 lowercase
//! digits; decoding accepts anything from zero to 16 digits so that records
//! written before an id was assigned (`"id": ""`) still decode.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Deserializer, Serialize, Serializer, de};

use crate::{Error, Result};

const ENCODED_LEN: usize = 16;

/// An opaque identifier. The zero value means "not yet assigned" and is never
/// valid.
#[derive(
  Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash,
)]
pub struct Id(u64);

impl Id {
  pub const ZERO: Id = Id(0);

  pub const fn new(value: u64) -> Self { Self(value) }

  pub const fn get(self) -> u64 { self.0 }

  /// An id is valid once it has been assigned, i.e. it is non-zero.
  pub fn is_valid(self) -> bool { self.0 != 0 }

  /// Used by serde to omit unassigned ids when encoding.
  pub fn is_zero(&self) -> bool { self.0 == 0 }

  /// Decode an id from its hex form. The empty string decodes to
  /// [`Id::ZERO`].
  pub fn decode(s: &str) -> Result<Self> {
    if s.len() > ENCODED_LEN {
      return Err(Error::InvalidId(s.to_string()));
    }
    let padded = format!("{s:0>width$}", width = ENCODED_LEN);
    let mut bytes = [0u8; 8];
    hex::decode_to_slice(padded, &mut bytes)
      .map_err(|_| Error::InvalidId(s.to_string()))?;
    Ok(Self(u64::from_be_bytes(bytes)))
  }

  /// The canonical 16-digit lowercase hex form.
  pub fn encode(self) -> String { hex::encode(self.0.to_be_bytes()) }
}

impl From<u64> for Id {
  fn from(value: u64) -> Self { Self(value) }
}

impl fmt::Display for Id {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.encode())
  }
}

impl FromStr for Id {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self> { Self::decode(s) }
}

impl Serialize for Id {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&self.encode())
  }
}

impl<'de> Deserialize<'de> for Id {
  fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
    let s = String::deserialize(deserializer)?;
    Self::decode(&s).map_err(de::Error::custom)
  }
}
