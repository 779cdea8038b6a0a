//! Organizations

pub mod data;
pub mod errors;
pub mod reconcile;
pub mod records;
mod repositories;
pub mod service;

pub use errors::OrganizationsServiceError;
pub use service::*;

pub(crate) use repositories::{RemoteAppInstancesRepository, RemoteOrganizationsRepository};
