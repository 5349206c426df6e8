//! JSON encoding. The output always carries the `type` tag, so anything
//! encoded here decodes back to an equal endpoint.

use herald_core::NotificationEndpoint;

use crate::Result;

pub(crate) fn encode(endpoint: &NotificationEndpoint) -> Result<Vec<u8>> {
  Ok(serde_json::to_vec(endpoint)?)
}

pub(crate) fn encode_pretty(endpoint: &NotificationEndpoint) -> Result<Vec<u8>> {
  Ok(serde_json::to_vec_pretty(endpoint)?)
}
