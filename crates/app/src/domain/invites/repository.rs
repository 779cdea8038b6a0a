//! Orga Invites Repository

use jiff::Timestamp;
use reqwest::Method;
use serde::Deserialize;
use serde_json::json;

use crate::{
    domain::{
        invites::{
            data::NewOrgaInvite,
            records::{InviteStatus, OrgaInviteRecord, OrgaInviteUuid},
        },
        members::role::MemberRole,
    },
    remote::{Document, FromResource, RemoteClient, RemoteError, Resource},
};

#[derive(Debug, Clone)]
pub(crate) struct RemoteOrgaInvitesRepository {
    client: RemoteClient,
}

impl RemoteOrgaInvitesRepository {
    #[must_use]
    pub(crate) fn new(client: RemoteClient) -> Self {
        Self { client }
    }

    /// Create a `staged` invite; nothing is sent to the invitee.
    pub(crate) async fn create_invite(
        &self,
        invite: &NewOrgaInvite,
    ) -> Result<OrgaInviteRecord, RemoteError> {
        let attributes = json!({
            "organization_id": invite.organization_uuid.to_string(),
            "user_email": invite.user_email,
            "user_role": invite.role.as_str(),
            "referrer_id": invite.referrer_uuid.to_string(),
            "status": InviteStatus::Staged.as_str(),
        });

        self.client
            .create("/orga_invites", "orga_invites", attributes)
            .await?
            .decode_one()
    }

    pub(crate) async fn update_role(
        &self,
        invite: OrgaInviteUuid,
        role: MemberRole,
    ) -> Result<(), RemoteError> {
        let id = invite.to_string();

        self.client
            .update(
                &format!("/orga_invites/{id}"),
                "orga_invites",
                &id,
                json!({ "user_role": role.as_str() }),
            )
            .await?;

        Ok(())
    }

    pub(crate) async fn decline(&self, invite: OrgaInviteUuid) -> Result<(), RemoteError> {
        self.client
            .action(
                Method::PATCH,
                &format!("/orga_invites/{invite}/decline"),
                None,
            )
            .await?;

        Ok(())
    }
}

#[derive(Debug, Deserialize)]
struct OrgaInviteAttributes {
    user_email: String,
    user_role: MemberRole,
    status: InviteStatus,

    #[serde(default)]
    organization_id: Option<String>,

    #[serde(default)]
    created_at: Option<Timestamp>,
}

impl FromResource for OrgaInviteRecord {
    fn from_resource(resource: &Resource, _document: &Document) -> Result<Self, RemoteError> {
        let attributes: OrgaInviteAttributes = resource.attributes()?;

        let organization_uuid = match attributes.organization_id {
            Some(id) => Some(
                id.parse()
                    .map_err(|_err| RemoteError::InvalidIdentifier(id.clone()))?,
            ),
            None => resource
                .related_identifiers("organization")
                .first()
                .map(|identifier| identifier.uuid())
                .transpose()?,
        };

        Ok(Self {
            uuid: resource.uuid()?,
            organization_uuid,
            user_email: attributes.user_email,
            role: attributes.user_role,
            status: attributes.status,
            created_at: attributes.created_at,
        })
    }
}
