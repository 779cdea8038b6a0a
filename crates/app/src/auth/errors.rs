//! Auth service errors.

use thiserror::Error;

use crate::remote::RemoteError;

#[derive(Debug, Error)]
pub enum AuthServiceError {
    /// Unknown, malformed, revoked or expired token.
    #[error("token not found")]
    NotFound,

    /// The token belongs to a user without a back-office role.
    #[error("user is not a back-office admin")]
    NotAdmin,

    #[error("remote service error")]
    Remote(#[source] RemoteError),
}

impl From<RemoteError> for AuthServiceError {
    fn from(error: RemoteError) -> Self {
        match error {
            RemoteError::NotFound => Self::NotFound,
            other => Self::Remote(other),
        }
    }
}
