//! Subscription Event Index Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{
    extensions::*,
    organizations::X_TOTAL_COUNT,
    state::State,
    subscription_events::{errors::into_status_error, responses::SubscriptionEventsResponse},
};

/// Subscription Event Index Handler
///
/// Lists the events of a subscription along with the subscription, its
/// organization and product, and the pricing involved. The number of events
/// is returned in `X-Total-Count`.
#[endpoint(
    tags("subscription_events"),
    summary = "List Subscription Events",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Subscription events"),
        (status_code = StatusCode::FORBIDDEN, description = "Forbidden"),
    ),
)]
pub(crate) async fn handler(
    organization: PathParam<Uuid>,
    subscription: PathParam<Uuid>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<SubscriptionEventsResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let ctx = depot.request_context_or_401()?;

    let events = state
        .app
        .subscription_events
        .list_events(
            ctx,
            organization.into_inner().into(),
            subscription.into_inner().into(),
        )
        .await
        .map_err(into_status_error)?;

    res.add_header(X_TOTAL_COUNT, events.len(), true)
        .or_500("failed to set total count header")?;

    Ok(Json(SubscriptionEventsResponse {
        subscription_events: events.into_iter().map(Into::into).collect(),
    }))
}
