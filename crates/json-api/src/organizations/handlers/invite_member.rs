//! Invite Member Handler

use std::sync::Arc;

use salvo::{
    oapi::extract::{JsonBody, PathParam},
    prelude::*,
};
use tracing::info;
use uuid::Uuid;

use backoffice_app::domain::members::data::NewMember;

use crate::{
    extensions::*,
    organizations::{
        errors::member_status_error, requests::InviteMemberRequest,
        responses::InvitedMemberResponse,
    },
    state::State,
};

/// Invite Member Handler
///
/// Stages an invite into the organization, creating an unconfirmed user when
/// nobody has the email yet. No email is sent. Confirmed users are returned
/// as themselves, anyone else through their invite.
#[endpoint(
    tags("organizations"),
    summary = "Invite Member",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Member invited"),
        (status_code = StatusCode::NOT_FOUND, description = "Organization not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::UNPROCESSABLE_ENTITY, description = "Rejected by the resource service"),
    ),
)]
pub(crate) async fn handler(
    organization: PathParam<Uuid>,
    json: JsonBody<InviteMemberRequest>,
    depot: &mut Depot,
) -> Result<Json<InvitedMemberResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let ctx = depot.request_context_or_401()?;
    let organization = organization.into_inner();

    let member =
        NewMember::try_from(json.into_inner().user).or_400("Invalid member payload")?;

    let invited = state
        .app
        .members
        .invite_member(ctx, organization.into(), member)
        .await
        .map_err(member_status_error)?;

    info!(organization_uuid = %organization, "invited member");

    Ok(Json(InvitedMemberResponse {
        user: invited.into(),
    }))
}
