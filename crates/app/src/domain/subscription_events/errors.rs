//! Subscription events service errors.

use thiserror::Error;

use crate::{
    auth::Forbidden,
    remote::{RemoteError, ValidationError},
};

#[derive(Debug, Error)]
pub enum SubscriptionEventsServiceError {
    #[error("subscription event not found")]
    NotFound,

    #[error("action not permitted")]
    Forbidden(#[from] Forbidden),

    /// The remote refused the transition, e.g. approving a rejected event.
    #[error("invalid subscription event transition")]
    Invalid(Vec<ValidationError>),

    #[error("remote service error")]
    Remote(#[source] RemoteError),
}

impl From<RemoteError> for SubscriptionEventsServiceError {
    fn from(error: RemoteError) -> Self {
        match error {
            RemoteError::NotFound => Self::NotFound,
            RemoteError::Validation(errors) => Self::Invalid(errors),
            other => Self::Remote(other),
        }
    }
}
