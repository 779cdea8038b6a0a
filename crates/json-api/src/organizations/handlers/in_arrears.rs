//! Organizations In Arrears Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    extensions::*,
    organizations::{errors::into_status_error, responses::InArrearsResponse},
    state::State,
};

/// Organizations In Arrears Handler
///
/// Lists outstanding payments.
#[endpoint(
    tags("organizations"),
    summary = "List Arrears",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<InArrearsResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let ctx = depot.request_context_or_401()?;

    let arrears = state
        .app
        .organizations
        .list_arrears(ctx)
        .await
        .map_err(into_status_error)?;

    Ok(Json(InArrearsResponse {
        in_arrears: arrears.into_iter().map(Into::into).collect(),
    }))
}
