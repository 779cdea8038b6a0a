//! Get Subscription Event Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{
    extensions::*,
    state::State,
    subscription_events::{errors::into_status_error, responses::SubscriptionEventEnvelope},
};

/// Get Subscription Event Handler
#[endpoint(
    tags("subscription_events"),
    summary = "Get Subscription Event",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Subscription event"),
        (status_code = StatusCode::NOT_FOUND, description = "Subscription event not found"),
        (status_code = StatusCode::FORBIDDEN, description = "Forbidden"),
    ),
)]
pub(crate) async fn handler(
    organization: PathParam<Uuid>,
    subscription: PathParam<Uuid>,
    event: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<SubscriptionEventEnvelope>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let ctx = depot.request_context_or_401()?;

    let event = state
        .app
        .subscription_events
        .get_event(
            ctx,
            organization.into_inner().into(),
            subscription.into_inner().into(),
            event.into_inner().into(),
        )
        .await
        .map_err(into_status_error)?;

    Ok(Json(event.into()))
}
