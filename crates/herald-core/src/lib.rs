//! Core types for Herald notification endpoints.
//!
//! Every endpoint variant owns a [`Base`](identity::Base) holding the fields
//! common to all channels, and exposes them through the
//! [`Identity`](identity::Identity) trait. This crate has no knowledge of how
//! endpoints are decoded; that lives in `herald-codec`.

pub mod endpoint;
pub mod error;
pub mod id;
pub mod identity;

pub use endpoint::{EndpointKind, NotificationEndpoint};
pub use error::{Error, Result, ValidationError};
pub use id::Id;
pub use identity::{Base, CrudLog, Identity, Status, UnknownStatus};
