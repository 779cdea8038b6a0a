//! Organizations service errors.

use thiserror::Error;

use crate::{
    auth::Forbidden,
    remote::{RemoteError, ValidationError},
};

#[derive(Debug, Error)]
pub enum OrganizationsServiceError {
    #[error("organization not found")]
    NotFound,

    #[error("action not permitted")]
    Forbidden(#[from] Forbidden),

    #[error("invalid organization data")]
    Invalid(Vec<ValidationError>),

    #[error("remote service error")]
    Remote(#[source] RemoteError),
}

/// A remote 404 stays a [`Remote`](OrganizationsServiceError::Remote) error
/// here; only the organization lookup turns it into `NotFound`.
impl From<RemoteError> for OrganizationsServiceError {
    fn from(error: RemoteError) -> Self {
        match error {
            RemoteError::Validation(errors) => Self::Invalid(errors),
            other => Self::Remote(other),
        }
    }
}
