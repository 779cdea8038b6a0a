//! Create Organization Handler

use std::sync::Arc;

use salvo::{http::header::LOCATION, oapi::extract::JsonBody, prelude::*};

use backoffice_app::domain::organizations::data::NewOrganization;

use crate::{
    extensions::*,
    organizations::{
        errors::into_status_error, requests::OrganizationRequest,
        responses::OrganizationDetailResponse,
    },
    state::State,
};

/// Create Organization Handler
///
/// Creates an organization, then provisions the applications listed in
/// `app_nids`.
#[endpoint(
    tags("organizations"),
    summary = "Create Organization",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Organization created"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::UNPROCESSABLE_ENTITY, description = "Rejected by the resource service"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<OrganizationRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<OrganizationDetailResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let ctx = depot.request_context_or_401()?;

    let organization = NewOrganization::try_from(json.into_inner().organization)
        .or_400("Invalid organization payload")?;

    let detail = state
        .app
        .organizations
        .create_organization(ctx, organization)
        .await
        .map_err(into_status_error)?;

    res.add_header(
        LOCATION,
        format!("/organizations/{}", detail.organization.uuid),
        true,
    )
    .or_500("failed to set location header")?
    .status_code(StatusCode::CREATED);

    Ok(Json(detail.into()))
}
