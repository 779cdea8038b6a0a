//! Remote JSON-API resource service.
//!
//! Every entity this service touches lives in the remote back-office API. This
//! module is the only place that knows about its wire format: query strings,
//! JSON-API documents, and error payloads.

mod client;
mod document;
mod errors;
mod list_params;
mod query;

pub use client::{RemoteClient, RemoteConfig};
pub use document::{
    Document, FromResource, Identifier, Linkage, Meta, PrimaryData, Relationship, Resource,
};
pub use errors::{RemoteError, ValidationError, join_messages};
pub use list_params::ListParams;
pub use query::{Page, Query};
