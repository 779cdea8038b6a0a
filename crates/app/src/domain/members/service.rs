//! Members service.

use async_trait::async_trait;
use mockall::automock;
use tracing::info;

use crate::{
    auth::{Gate, RequestContext, authorize},
    domain::{
        invites::{RemoteOrgaInvitesRepository, data::NewOrgaInvite, records::InviteStatus},
        members::{
            data::{InvitedMember, MemberEntry, MemberRef, NewMember, RequestedMember, member_entries},
            errors::MembersServiceError,
            role::MemberRole,
        },
        organizations::{
            RemoteOrganizationsRepository,
            records::{OrganizationRecord, OrganizationUuid},
        },
        users::{RemoteUsersRepository, data::NewUser, password::FriendlyToken, records::UserRecord},
    },
    remote::{Query, RemoteClient, RemoteError},
};

#[derive(Debug, Clone)]
pub struct RemoteMembersService {
    organizations: RemoteOrganizationsRepository,
    users: RemoteUsersRepository,
    invites: RemoteOrgaInvitesRepository,
}

impl RemoteMembersService {
    #[must_use]
    pub fn new(client: RemoteClient) -> Self {
        Self {
            organizations: RemoteOrganizationsRepository::new(client.clone()),
            users: RemoteUsersRepository::new(client.clone()),
            invites: RemoteOrgaInvitesRepository::new(client),
        }
    }

    /// Find or create the user, then stage an invite into `organization`.
    ///
    /// The organization is assumed to exist. User and invite creation are
    /// separate remote calls; a failing invite leaves the new user behind.
    pub(crate) async fn invite_into(
        &self,
        ctx: &RequestContext,
        organization: OrganizationUuid,
        member: NewMember,
    ) -> Result<InvitedMember, MembersServiceError> {
        let email = member.email.trim().to_lowercase();

        let user = match self.users.find_by_email(&email).await? {
            Some(user) => user,
            None => self.create_unconfirmed_user(email, &member).await?,
        };

        let invite = self
            .invites
            .create_invite(&NewOrgaInvite {
                organization_uuid: organization,
                user_email: user.email.clone(),
                role: member.role,
                referrer_uuid: ctx.actor.uuid,
            })
            .await?;

        info!(
            %organization,
            invite = %invite.uuid,
            user = %user.uuid,
            role = %member.role,
            "staged organization invite"
        );

        Ok(if user.is_confirmed() {
            InvitedMember::User(user)
        } else {
            InvitedMember::Invitation(invite)
        })
    }

    /// Create a user with a throwaway password and no confirmation
    /// notification, then clear its confirmation token so sending the invite
    /// later generates a fresh one.
    async fn create_unconfirmed_user(
        &self,
        email: String,
        member: &NewMember,
    ) -> Result<UserRecord, MembersServiceError> {
        let mut user = self
            .users
            .create_user(&NewUser {
                email,
                name: member.name.clone(),
                surname: member.surname.clone(),
                phone: member.phone.clone(),
                password: FriendlyToken::generate(),
            })
            .await?;

        self.users.clear_confirmation(user.uuid).await?;

        user.confirmation_sent_at = None;

        info!(user = %user.uuid, "created unconfirmed user for invite");

        Ok(user)
    }

    async fn find_organization(
        &self,
        ctx: &RequestContext,
        organization: OrganizationUuid,
    ) -> Result<OrganizationRecord, MembersServiceError> {
        self.organizations
            .find(organization, ctx.scoped(Query::new()))
            .await
            .map_err(|error| match error {
                RemoteError::NotFound => MembersServiceError::OrganizationNotFound,
                other => other.into(),
            })
    }

    async fn members(
        &self,
        ctx: &RequestContext,
        organization: OrganizationUuid,
    ) -> Result<Vec<MemberEntry>, MembersServiceError> {
        let organization = self.find_organization(ctx, organization).await?;

        Ok(member_entries(&organization))
    }
}

/// Resolve a member reference: user id among the organization's users first,
/// then email among its pending invites.
fn resolve_member(
    organization: &OrganizationRecord,
    member: &MemberRef,
) -> Result<RequestedMember, MembersServiceError> {
    let user = member.user.and_then(|uuid| {
        organization
            .members
            .iter()
            .find(|candidate| candidate.user.uuid == uuid)
    });

    if let Some(found) = user {
        return Ok(RequestedMember::User(found.user.clone()));
    }

    let email = member
        .email
        .as_deref()
        .map(str::trim)
        .filter(|email| !email.is_empty())
        .ok_or(MembersServiceError::MissingMemberEmail)?;

    organization
        .invites
        .iter()
        .find(|invite| {
            invite.status == InviteStatus::Pending && invite.user_email.eq_ignore_ascii_case(email)
        })
        .cloned()
        .map(RequestedMember::Invite)
        .ok_or(MembersServiceError::MemberNotFound)
}

#[async_trait]
impl MembersService for RemoteMembersService {
    async fn invite_member(
        &self,
        ctx: &RequestContext,
        organization: OrganizationUuid,
        member: NewMember,
    ) -> Result<InvitedMember, MembersServiceError> {
        authorize(ctx, Gate::Manage)?;

        let organization = self.find_organization(ctx, organization).await?;

        self.invite_into(ctx, organization.uuid, member).await
    }

    async fn update_member(
        &self,
        ctx: &RequestContext,
        organization: OrganizationUuid,
        member: MemberRef,
        role: MemberRole,
    ) -> Result<Vec<MemberEntry>, MembersServiceError> {
        authorize(ctx, Gate::Manage)?;

        let organization = self.find_organization(ctx, organization).await?;

        match resolve_member(&organization, &member)? {
            RequestedMember::User(user) => {
                self.organizations
                    .update_user_role(organization.uuid, user.uuid, role)
                    .await?;
            }
            RequestedMember::Invite(invite) => {
                self.invites.update_role(invite.uuid, role).await?;
            }
        }

        self.members(ctx, organization.uuid).await
    }

    async fn remove_member(
        &self,
        ctx: &RequestContext,
        organization: OrganizationUuid,
        member: MemberRef,
    ) -> Result<Vec<MemberEntry>, MembersServiceError> {
        authorize(ctx, Gate::Manage)?;

        let organization = self.find_organization(ctx, organization).await?;

        match resolve_member(&organization, &member)? {
            RequestedMember::User(user) => {
                self.organizations
                    .remove_user(organization.uuid, user.uuid)
                    .await?;

                info!(organization = %organization.uuid, user = %user.uuid, "removed member");
            }
            RequestedMember::Invite(invite) => {
                self.invites.decline(invite.uuid).await?;

                info!(organization = %organization.uuid, invite = %invite.uuid, "declined invite");
            }
        }

        self.members(ctx, organization.uuid).await
    }
}

#[automock]
#[async_trait]
pub trait MembersService: Send + Sync {
    /// Invite someone into an organization, creating their user if needed.
    async fn invite_member(
        &self,
        ctx: &RequestContext,
        organization: OrganizationUuid,
        member: NewMember,
    ) -> Result<InvitedMember, MembersServiceError>;

    /// Change the role of a user or pending invite. Returns the member list.
    async fn update_member(
        &self,
        ctx: &RequestContext,
        organization: OrganizationUuid,
        member: MemberRef,
        role: MemberRole,
    ) -> Result<Vec<MemberEntry>, MembersServiceError>;

    /// Remove a user from the organization, or decline their pending invite.
    async fn remove_member(
        &self,
        ctx: &RequestContext,
        organization: OrganizationUuid,
        member: MemberRef,
    ) -> Result<Vec<MemberEntry>, MembersServiceError>;
}

#[cfg(test)]
mod tests {
    use serde_json::{Value, json};
    use testresult::TestResult;
    use wiremock::{
        Mock, ResponseTemplate,
        matchers::{body_partial_json, method, path, path_regex},
    };

    use super::*;
    use crate::{
        domain::users::records::UserUuid,
        test::{TestContext, fixtures},
    };

    fn new_member(email: &str) -> NewMember {
        NewMember {
            email: email.to_owned(),
            name: Some("Jane".to_owned()),
            surname: Some("Doe".to_owned()),
            phone: None,
            role: MemberRole::Admin,
        }
    }

    async fn mount_organization(
        ctx: &TestContext,
        organization: OrganizationUuid,
        users: &[Value],
        invites: &[Value],
    ) {
        let document = fixtures::organization_document(organization, "Acme", &[], users, invites);

        Mock::given(method("GET"))
            .and(path(format!("/organizations/{organization}")))
            .respond_with(ResponseTemplate::new(200).set_body_json(document))
            .mount(&ctx.server)
            .await;
    }

    async fn mount_user_lookup(ctx: &TestContext, users: Vec<Value>) {
        Mock::given(method("GET"))
            .and(path("/users"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": users })))
            .mount(&ctx.server)
            .await;
    }

    async fn mount_invite_creation(ctx: &TestContext, organization: OrganizationUuid, email: &str) {
        let invite = fixtures::invite(&UserUuid::new().to_string(), email, "staged", "Admin");

        Mock::given(method("POST"))
            .and(path("/orga_invites"))
            .and(body_partial_json(json!({
                "data": { "attributes": {
                    "organization_id": organization.to_string(),
                    "user_email": email,
                    "user_role": "Admin",
                    "status": "staged"
                } }
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "data": invite })))
            .expect(1)
            .mount(&ctx.server)
            .await;
    }

    #[tokio::test]
    async fn unknown_email_creates_unconfirmed_user_and_staged_invite() -> TestResult {
        let ctx = TestContext::new().await?;
        let organization = OrganizationUuid::new();
        let created = UserUuid::new();

        mount_organization(&ctx, organization, &[], &[]).await;
        mount_user_lookup(&ctx, Vec::new()).await;
        mount_invite_creation(&ctx, organization, "new@acme.test").await;

        Mock::given(method("POST"))
            .and(path("/users"))
            .and(body_partial_json(json!({
                "data": { "attributes": {
                    "email": "new@acme.test",
                    "skip_confirmation_notification": true
                } }
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "data": fixtures::user(created, "new@acme.test", false)
            })))
            .expect(1)
            .mount(&ctx.server)
            .await;

        Mock::given(method("PATCH"))
            .and(path(format!("/users/{created}")))
            .and(body_partial_json(json!({
                "data": { "attributes": { "confirmation_token": null, "confirmation_sent_at": null } }
            })))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&ctx.server)
            .await;

        let service = RemoteMembersService::new(ctx.client.clone());

        let invited = service
            .invite_member(&TestContext::admin(), organization, new_member(" New@Acme.test "))
            .await?;

        assert!(matches!(
            invited,
            InvitedMember::Invitation(invite) if invite.status == InviteStatus::Staged
        ));

        Ok(())
    }

    #[tokio::test]
    async fn existing_confirmed_user_is_returned_without_creating_one() -> TestResult {
        let ctx = TestContext::new().await?;
        let organization = OrganizationUuid::new();
        let existing = UserUuid::new();

        mount_organization(&ctx, organization, &[], &[]).await;
        mount_user_lookup(&ctx, vec![fixtures::user(existing, "jane@acme.test", true)]).await;
        mount_invite_creation(&ctx, organization, "jane@acme.test").await;

        Mock::given(method("POST"))
            .and(path("/users"))
            .respond_with(ResponseTemplate::new(201))
            .expect(0)
            .mount(&ctx.server)
            .await;

        let service = RemoteMembersService::new(ctx.client.clone());

        let invited = service
            .invite_member(&TestContext::admin(), organization, new_member("jane@acme.test"))
            .await?;

        assert!(matches!(invited, InvitedMember::User(user) if user.uuid == existing));

        Ok(())
    }

    #[tokio::test]
    async fn duplicate_email_surfaces_validation_errors() -> TestResult {
        let ctx = TestContext::new().await?;
        let organization = OrganizationUuid::new();

        mount_organization(&ctx, organization, &[], &[]).await;
        mount_user_lookup(&ctx, Vec::new()).await;

        Mock::given(method("POST"))
            .and(path("/users"))
            .respond_with(ResponseTemplate::new(422).set_body_json(json!({
                "errors": [{
                    "title": "has already been taken",
                    "detail": "has already been taken",
                    "source": { "pointer": "/data/attributes/email" }
                }]
            })))
            .mount(&ctx.server)
            .await;

        Mock::given(method("POST"))
            .and(path("/orga_invites"))
            .respond_with(ResponseTemplate::new(201))
            .expect(0)
            .mount(&ctx.server)
            .await;

        let service = RemoteMembersService::new(ctx.client.clone());

        let result = service
            .invite_member(&TestContext::admin(), organization, new_member("jane@acme.test"))
            .await;

        assert!(matches!(result, Err(MembersServiceError::Invalid(errors)) if errors.len() == 1));

        Ok(())
    }

    #[tokio::test]
    async fn update_member_falls_back_to_pending_invite_by_email() -> TestResult {
        let ctx = TestContext::new().await?;
        let organization = OrganizationUuid::new();
        let invite = UserUuid::new().to_string();

        mount_organization(
            &ctx,
            organization,
            &[fixtures::user(UserUuid::new(), "jane@acme.test", true)],
            &[
                fixtures::invite(&UserUuid::new().to_string(), "bob@acme.test", "staged", "Member"),
                fixtures::invite(&invite, "bob@acme.test", "pending", "Member"),
            ],
        )
        .await;

        Mock::given(method("PATCH"))
            .and(path(format!("/orga_invites/{invite}")))
            .and(body_partial_json(json!({
                "data": { "attributes": { "user_role": "Power User" } }
            })))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&ctx.server)
            .await;

        let service = RemoteMembersService::new(ctx.client.clone());

        let members = service
            .update_member(
                &TestContext::admin(),
                organization,
                MemberRef {
                    user: Some(UserUuid::new()),
                    email: Some("Bob@acme.test".to_owned()),
                },
                MemberRole::PowerUser,
            )
            .await?;

        assert_eq!(members.len(), 3);

        Ok(())
    }

    #[tokio::test]
    async fn remove_member_removes_users_by_id() -> TestResult {
        let ctx = TestContext::new().await?;
        let organization = OrganizationUuid::new();
        let jane = UserUuid::new();

        mount_organization(
            &ctx,
            organization,
            &[fixtures::user(jane, "jane@acme.test", true)],
            &[],
        )
        .await;

        Mock::given(method("PATCH"))
            .and(path(format!("/organizations/{organization}/remove_user")))
            .and(body_partial_json(json!({
                "data": { "attributes": { "user_id": jane.to_string() } }
            })))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&ctx.server)
            .await;

        Mock::given(path_regex(r"^/orga_invites"))
            .respond_with(ResponseTemplate::new(204))
            .expect(0)
            .mount(&ctx.server)
            .await;

        let service = RemoteMembersService::new(ctx.client.clone());

        service
            .remove_member(
                &TestContext::admin(),
                organization,
                MemberRef {
                    user: Some(jane),
                    email: None,
                },
            )
            .await?;

        Ok(())
    }

    #[tokio::test]
    async fn vanished_invite_is_not_a_missing_organization() -> TestResult {
        let ctx = TestContext::new().await?;
        let organization = OrganizationUuid::new();
        let invite = UserUuid::new().to_string();

        mount_organization(
            &ctx,
            organization,
            &[],
            &[fixtures::invite(&invite, "bob@acme.test", "pending", "Member")],
        )
        .await;

        Mock::given(method("PATCH"))
            .and(path(format!("/orga_invites/{invite}/decline")))
            .respond_with(ResponseTemplate::new(404))
            .expect(1)
            .mount(&ctx.server)
            .await;

        let service = RemoteMembersService::new(ctx.client.clone());

        let result = service
            .remove_member(
                &TestContext::admin(),
                organization,
                MemberRef {
                    user: None,
                    email: Some("bob@acme.test".to_owned()),
                },
            )
            .await;

        assert!(matches!(
            result,
            Err(MembersServiceError::Remote(RemoteError::NotFound))
        ));

        Ok(())
    }

    #[tokio::test]
    async fn missing_organization_is_reported() -> TestResult {
        let ctx = TestContext::new().await?;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&ctx.server)
            .await;

        let service = RemoteMembersService::new(ctx.client.clone());

        let result = service
            .remove_member(
                &TestContext::admin(),
                OrganizationUuid::new(),
                MemberRef::default(),
            )
            .await;

        assert!(matches!(result, Err(MembersServiceError::OrganizationNotFound)));

        Ok(())
    }

    #[tokio::test]
    async fn unresolvable_members_are_reported() -> TestResult {
        let ctx = TestContext::new().await?;
        let organization = OrganizationUuid::new();

        mount_organization(&ctx, organization, &[], &[]).await;

        let service = RemoteMembersService::new(ctx.client.clone());
        let admin = TestContext::admin();

        let missing_email = service
            .remove_member(&admin, organization, MemberRef::default())
            .await;
        let unknown = service
            .remove_member(
                &admin,
                organization,
                MemberRef {
                    user: None,
                    email: Some("ghost@acme.test".to_owned()),
                },
            )
            .await;

        assert!(matches!(missing_email, Err(MembersServiceError::MissingMemberEmail)));
        assert!(matches!(unknown, Err(MembersServiceError::MemberNotFound)));

        Ok(())
    }
}
