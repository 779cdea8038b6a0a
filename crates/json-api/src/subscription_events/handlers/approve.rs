//! Approve Subscription Event Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use tracing::info;
use uuid::Uuid;

use crate::{
    extensions::*,
    state::State,
    subscription_events::{errors::into_status_error, responses::SubscriptionEventEnvelope},
};

/// Approve Subscription Event Handler
#[endpoint(
    tags("subscription_events"),
    summary = "Approve Subscription Event",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Subscription event approved"),
        (status_code = StatusCode::NOT_FOUND, description = "Subscription event not found"),
        (status_code = StatusCode::FORBIDDEN, description = "Forbidden"),
        (status_code = StatusCode::UNPROCESSABLE_ENTITY, description = "Transition refused"),
    ),
)]
pub(crate) async fn handler(
    event: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<SubscriptionEventEnvelope>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let ctx = depot.request_context_or_401()?;
    let event = event.into_inner();

    let approved = state
        .app
        .subscription_events
        .approve_event(ctx, event.into())
        .await
        .map_err(into_status_error)?;

    info!(event_uuid = %event, "approved subscription event");

    Ok(Json(approved.into()))
}
