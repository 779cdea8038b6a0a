//! Remove Member Handler

use std::sync::Arc;

use salvo::{
    oapi::extract::{JsonBody, PathParam},
    prelude::*,
};
use tracing::info;
use uuid::Uuid;

use crate::{
    extensions::*,
    organizations::{
        errors::member_status_error, requests::MemberRequest, responses::MembersResponse,
    },
    state::State,
};

/// Remove Member Handler
///
/// Removes a user from the organization, or declines their pending invite.
/// Served as both `remove_member` and `remove_user`.
#[endpoint(
    tags("organizations"),
    summary = "Remove Member",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Members"),
        (status_code = StatusCode::NOT_FOUND, description = "Organization or member not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
    ),
)]
pub(crate) async fn handler(
    organization: PathParam<Uuid>,
    json: JsonBody<MemberRequest>,
    depot: &mut Depot,
) -> Result<Json<MembersResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let ctx = depot.request_context_or_401()?;
    let organization = organization.into_inner();

    let members = state
        .app
        .members
        .remove_member(ctx, organization.into(), json.into_inner().member.member_ref())
        .await
        .map_err(member_status_error)?;

    info!(organization_uuid = %organization, remaining = members.len(), "removed member");

    Ok(Json(members.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use backoffice_app::domain::{
        invites::records::InviteStatus,
        members::{
            MembersServiceError,
            data::{MemberEntry, MemberRef},
        },
        organizations::records::OrganizationUuid,
    };

    use crate::{
        organizations::responses::MemberEntity,
        test_helpers::{Mocks, admin_service, make_invite},
    };

    use super::*;

    fn service(mocks: Mocks) -> Service {
        admin_service(
            mocks,
            Router::with_path("organizations/{organization}")
                .push(Router::with_path("remove_member").put(handler))
                .push(Router::with_path("remove_user").put(handler)),
        )
    }

    #[tokio::test]
    async fn test_remove_member_declines_invites_by_email() -> TestResult {
        let organization = OrganizationUuid::new();
        let remaining = make_invite(organization, "other@acme.test", InviteStatus::Pending);

        let mut mocks = Mocks::default();

        mocks
            .members
            .expect_remove_member()
            .once()
            .withf(move |_, uuid, member| {
                *uuid == organization
                    && *member
                        == MemberRef {
                            user: None,
                            email: Some("gone@acme.test".to_owned()),
                        }
            })
            .return_once(move |_, _, _| Ok(vec![MemberEntry::Invite(remaining)]));

        let response: MembersResponse = TestClient::put(format!(
            "http://example.com/organizations/{organization}/remove_member"
        ))
        .json(&json!({ "member": { "email": "gone@acme.test" } }))
        .send(&service(mocks))
        .await
        .take_json()
        .await?;

        let entities: Vec<MemberEntity> = response
            .members
            .iter()
            .map(|member| member.entity)
            .collect();

        assert_eq!(entities, vec![MemberEntity::Invite]);

        Ok(())
    }

    #[tokio::test]
    async fn test_remove_user_alias_is_served() -> TestResult {
        let mut mocks = Mocks::default();

        mocks
            .members
            .expect_remove_member()
            .once()
            .return_once(|_, _, _| Ok(vec![]));

        let res = TestClient::put(format!(
            "http://example.com/organizations/{}/remove_user",
            OrganizationUuid::new()
        ))
        .json(&json!({ "member": { "email": "gone@acme.test" } }))
        .send(&service(mocks))
        .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        Ok(())
    }

    #[tokio::test]
    async fn test_remove_without_email_or_match_returns_400() -> TestResult {
        let mut mocks = Mocks::default();

        mocks
            .members
            .expect_remove_member()
            .once()
            .return_once(|_, _, _| Err(MembersServiceError::MissingMemberEmail));

        let res = TestClient::put(format!(
            "http://example.com/organizations/{}/remove_member",
            OrganizationUuid::new()
        ))
        .json(&json!({ "member": {} }))
        .send(&service(mocks))
        .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
