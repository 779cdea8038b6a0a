//! Update Member Handler

use std::sync::Arc;

use salvo::{
    oapi::extract::{JsonBody, PathParam},
    prelude::*,
};
use uuid::Uuid;

use crate::{
    extensions::*,
    organizations::{
        errors::member_status_error, requests::MemberRequest, responses::MembersResponse,
    },
    state::State,
};

/// Update Member Handler
///
/// Changes the role of a user, looked up by id, or of a pending invite,
/// looked up by email. Returns the organization's members.
#[endpoint(
    tags("organizations"),
    summary = "Update Member Role",
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
    let request = json.into_inner().member;

    let role = request.required_role().or_400("Invalid member payload")?;

    let members = state
        .app
        .members
        .update_member(ctx, organization.into_inner().into(), request.member_ref(), role)
        .await
        .map_err(member_status_error)?;

    Ok(Json(members.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use backoffice_app::domain::{
        members::{
            MembersServiceError,
            data::{MemberEntry, MemberRef},
            role::MemberRole,
        },
        organizations::records::{OrganizationMember, OrganizationUuid},
        users::records::UserUuid,
    };

    use crate::test_helpers::{Mocks, admin_service, make_user};

    use super::*;

    fn route() -> Router {
        Router::with_path("organizations/{organization}/update_member").put(handler)
    }

    fn url(organization: OrganizationUuid) -> String {
        format!("http://example.com/organizations/{organization}/update_member")
    }

    #[tokio::test]
    async fn test_update_member_renders_members() -> TestResult {
        let organization = OrganizationUuid::new();
        let user = make_user("jane@acme.test", true);
        let user_uuid = user.uuid;

        let mut mocks = Mocks::default();

        mocks
            .members
            .expect_update_member()
            .once()
            .withf(move |_, uuid, member, role| {
                *uuid == organization
                    && *member
                        == MemberRef {
                            user: Some(user_uuid),
                            email: Some("jane@acme.test".to_owned()),
                        }
                    && *role == MemberRole::SuperAdmin
            })
            .return_once(move |_, _, _, _| {
                Ok(vec![MemberEntry::User(OrganizationMember {
                    user,
                    role: MemberRole::SuperAdmin,
                })])
            });

        let response: MembersResponse = TestClient::put(url(organization))
            .json(&json!({
                "member": {
                    "id": user_uuid.into_uuid(),
                    "email": "jane@acme.test",
                    "role": "Super Admin"
                }
            }))
            .send(&admin_service(mocks, route()))
            .await
            .take_json()
            .await?;

        let first = response.members.first().ok_or("no members")?;

        assert_eq!(first.role.as_deref(), Some("Super Admin"));

        Ok(())
    }

    #[tokio::test]
    async fn test_update_member_requires_role() -> TestResult {
        let mut mocks = Mocks::default();

        mocks.members.expect_update_member().never();

        let res = TestClient::put(url(OrganizationUuid::new()))
            .json(&json!({ "member": { "id": UserUuid::new().into_uuid() } }))
            .send(&admin_service(mocks, route()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_update_unknown_member_returns_404() -> TestResult {
        let mut mocks = Mocks::default();

        mocks
            .members
            .expect_update_member()
            .once()
            .return_once(|_, _, _, _| Err(MembersServiceError::MemberNotFound));

        let res = TestClient::put(url(OrganizationUuid::new()))
            .json(&json!({ "member": { "email": "ghost@acme.test", "role": "Admin" } }))
            .send(&admin_service(mocks, route()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
