//! Organization Index Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    extensions::*,
    organizations::{
        X_TOTAL_COUNT, errors::into_status_error, requests::list_request,
        responses::OrganizationsResponse,
    },
    state::State,
};

/// Organization Index Handler
///
/// Lists organizations. `organization_external_id` looks up the caller's
/// support organization, `terms` (a JSON object) runs one search per entry
/// and unions the results; otherwise `limit`, `offset`, `order_by` and
/// `where[field]` page through every organization. Repeating a parameter is
/// rejected. The total is returned in `X-Total-Count`.
#[endpoint(
    tags("organizations"),
    summary = "List Organizations",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Organizations"),
        (status_code = StatusCode::BAD_REQUEST, description = "Invalid list parameters"),
        (status_code = StatusCode::FORBIDDEN, description = "Forbidden"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<OrganizationsResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let ctx = depot.request_context_or_401()?;

    let request = list_request(req.queries().iter_all().flat_map(|(key, values)| {
        values
            .iter()
            .map(move |value| (key.as_str(), value.as_str()))
    }))
    .or_400("Invalid list parameters")?;

    let page = state
        .app
        .organizations
        .list_organizations(ctx, request)
        .await
        .map_err(into_status_error)?;

    res.add_header(X_TOTAL_COUNT, page.total, true)
        .or_500("failed to set total count header")?;

    Ok(Json(OrganizationsResponse {
        organizations: page.organizations.into_iter().map(Into::into).collect(),
    }))
}
