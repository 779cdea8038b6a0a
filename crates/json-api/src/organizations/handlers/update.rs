//! Update Organization Handler

use std::sync::Arc;

use salvo::{
    oapi::extract::{JsonBody, PathParam},
    prelude::*,
};
use uuid::Uuid;

use backoffice_app::domain::organizations::data::OrganizationUpdate;

use crate::{
    extensions::*,
    organizations::{
        errors::into_status_error, requests::OrganizationRequest,
        responses::OrganizationDetailResponse,
    },
    state::State,
};

/// Update Organization Handler
///
/// Reconciles the application list with `app_nids` when the key is present,
/// then updates the organization's attributes.
#[endpoint(
    tags("organizations"),
    summary = "Update Organization",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Organization updated"),
        (status_code = StatusCode::NOT_FOUND, description = "Organization not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::UNPROCESSABLE_ENTITY, description = "Rejected by the resource service"),
    ),
)]
#[tracing::instrument(
    name = "organizations.update",
    skip(organization, json, depot),
    fields(organization_uuid = tracing::field::Empty, app_nids = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    organization: PathParam<Uuid>,
    json: JsonBody<OrganizationRequest>,
    depot: &mut Depot,
) -> Result<Json<OrganizationDetailResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let ctx = depot.request_context_or_401()?;
    let organization = organization.into_inner();

    let update = OrganizationUpdate::try_from(json.into_inner().organization)
        .or_400("Invalid organization payload")?;

    let span = tracing::Span::current();

    span.record("organization_uuid", tracing::field::display(organization));

    if let Some(nids) = &update.app_nids {
        span.record("app_nids", tracing::field::display(nids.len()));
    }

    let detail = state
        .app
        .organizations
        .update_organization(ctx, organization.into(), update)
        .await
        .map_err(into_status_error)?;

    Ok(Json(detail.into()))
}
