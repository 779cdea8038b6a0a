//! Orga Invite Data

use crate::domain::{
    members::role::MemberRole, organizations::records::OrganizationUuid,
    users::records::UserUuid,
};

/// New Orga Invite Data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOrgaInvite {
    pub organization_uuid: OrganizationUuid,
    pub user_email: String,
    pub role: MemberRole,

    /// Acting user recorded as the sender of the invite.
    pub referrer_uuid: UserUuid,
}
