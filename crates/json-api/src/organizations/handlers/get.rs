//! Get Organization Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{
    extensions::*,
    organizations::{errors::into_status_error, responses::OrganizationDetailResponse},
    state::State,
};

/// Get Organization Handler
///
/// Returns an organization with its members, instances and active apps.
#[endpoint(
    tags("organizations"),
    summary = "Get Organization",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Organization"),
        (status_code = StatusCode::NOT_FOUND, description = "Organization not found"),
        (status_code = StatusCode::FORBIDDEN, description = "Forbidden"),
    ),
)]
pub(crate) async fn handler(
    organization: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<OrganizationDetailResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let ctx = depot.request_context_or_401()?;

    let detail = state
        .app
        .organizations
        .get_organization(ctx, organization.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(detail.into()))
}
