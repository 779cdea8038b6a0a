//! Members service errors.

use thiserror::Error;

use crate::{
    auth::Forbidden,
    remote::{RemoteError, ValidationError},
};

#[derive(Debug, Error)]
pub enum MembersServiceError {
    #[error("organization not found")]
    OrganizationNotFound,

    #[error("member not found")]
    MemberNotFound,

    /// No user matched the id and no email was given to look for an invite.
    #[error("member email is required")]
    MissingMemberEmail,

    #[error("action not permitted")]
    Forbidden(#[from] Forbidden),

    #[error("invalid member data")]
    Invalid(Vec<ValidationError>),

    #[error("remote service error")]
    Remote(#[source] RemoteError),
}

impl From<RemoteError> for MembersServiceError {
    fn from(error: RemoteError) -> Self {
        match error {
            RemoteError::Validation(errors) => Self::Invalid(errors),
            other => Self::Remote(other),
        }
    }
}
