//! Auth data models.

use jiff::Timestamp;

use crate::{domain::users::records::UserUuid, uuids::TypedUuid};

/// API Token UUID
pub type ApiTokenUuid = TypedUuid<ApiTokenRecord>;

/// API token as stored on the remote service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiTokenRecord {
    pub uuid: ApiTokenUuid,

    /// Admin user the token authenticates as.
    pub user_uuid: UserUuid,

    /// SHA-256 verifier of the token secret material.
    pub token_hash: String,

    pub expires_at: Option<Timestamp>,
    pub revoked_at: Option<Timestamp>,
}

impl ApiTokenRecord {
    /// Not revoked and not expired at `now`.
    #[must_use]
    pub fn is_usable(&self, now: Timestamp) -> bool {
        self.revoked_at.is_none() && self.expires_at.is_none_or(|expires_at| expires_at > now)
    }
}

/// New API token persistence payload.
#[derive(Debug, Clone)]
pub struct NewApiToken {
    pub uuid: ApiTokenUuid,
    pub user_uuid: UserUuid,
    pub token_hash: String,
    pub expires_at: Option<Timestamp>,
}

/// API token issuance result with one-time raw token.
#[derive(Debug, Clone)]
pub struct IssuedApiToken {
    pub token: String,
    pub record: ApiTokenRecord,
}
