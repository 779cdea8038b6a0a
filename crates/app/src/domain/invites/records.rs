//! Orga Invite Records

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use crate::{
    domain::{members::role::MemberRole, organizations::records::OrganizationUuid},
    uuids::TypedUuid,
};

/// Orga Invite UUID
pub type OrgaInviteUuid = TypedUuid<OrgaInviteRecord>;

/// Invitation lifecycle.
///
/// Invites created by admins start `staged` and are moved on by the remote
/// service once sent, accepted or declined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InviteStatus {
    Staged,
    Pending,
    Accepted,
    Declined,
}

impl InviteStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Staged => "staged",
            Self::Pending => "pending",
            Self::Accepted => "accepted",
            Self::Declined => "declined",
        }
    }
}

/// Orga Invite Record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrgaInviteRecord {
    pub uuid: OrgaInviteUuid,
    pub organization_uuid: Option<OrganizationUuid>,
    pub user_email: String,
    pub role: MemberRole,
    pub status: InviteStatus,
    pub created_at: Option<Timestamp>,
}
