//! Unfreeze Organization Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use tracing::info;
use uuid::Uuid;

use crate::{
    extensions::*,
    organizations::{errors::into_status_error, responses::OrganizationDetailResponse},
    state::State,
};

/// Unfreeze Organization Handler
#[endpoint(
    tags("organizations"),
    summary = "Unfreeze Organization",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Organization unfrozen"),
        (status_code = StatusCode::NOT_FOUND, description = "Organization not found"),
    ),
)]
pub(crate) async fn handler(
    organization: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<OrganizationDetailResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let ctx = depot.request_context_or_401()?;
    let organization = organization.into_inner();

    let detail = state
        .app
        .organizations
        .unfreeze_organization(ctx, organization.into())
        .await
        .map_err(into_status_error)?;

    info!(organization_uuid = %organization, "unfroze organization");

    Ok(Json(detail.into()))
}
