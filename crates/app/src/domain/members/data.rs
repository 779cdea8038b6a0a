//! Member Data

use crate::domain::{
    invites::records::{InviteStatus, OrgaInviteRecord},
    members::role::MemberRole,
    organizations::records::{OrganizationMember, OrganizationRecord},
    users::records::{UserRecord, UserUuid},
};

/// Someone to invite into an organization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMember {
    pub email: String,
    pub name: Option<String>,
    pub surname: Option<String>,
    pub phone: Option<String>,
    pub role: MemberRole,
}

/// Result of an invitation.
///
/// Confirmed users are reported as the user itself; users who still have to
/// confirm their account are reported through the staged invite.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvitedMember {
    User(UserRecord),
    Invitation(OrgaInviteRecord),
}

/// How a client designates an existing member.
///
/// The id is tried first since a user with a pending email change can't be
/// found by email.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemberRef {
    pub user: Option<UserUuid>,
    pub email: Option<String>,
}

/// A resolved member: an organization user or a pending invite.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestedMember {
    User(UserRecord),
    Invite(OrgaInviteRecord),
}

/// One row of an organization's member list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MemberEntry {
    User(OrganizationMember),
    Invite(OrgaInviteRecord),
}

/// Users of the organization followed by its outstanding invites.
#[must_use]
pub fn member_entries(organization: &OrganizationRecord) -> Vec<MemberEntry> {
    let users = organization.members.iter().cloned().map(MemberEntry::User);

    let invites = organization
        .invites
        .iter()
        .filter(|invite| matches!(invite.status, InviteStatus::Staged | InviteStatus::Pending))
        .cloned()
        .map(MemberEntry::Invite);

    users.chain(invites).collect()
}
