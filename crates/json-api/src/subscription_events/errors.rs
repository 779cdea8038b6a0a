//! Subscription Event Errors

use salvo::http::StatusError;
use tracing::error;

use backoffice_app::{
    domain::subscription_events::SubscriptionEventsServiceError, remote::join_messages,
};

pub(crate) fn into_status_error(error: SubscriptionEventsServiceError) -> StatusError {
    match error {
        SubscriptionEventsServiceError::NotFound => {
            StatusError::not_found().brief("Subscription event not found")
        }
        SubscriptionEventsServiceError::Forbidden(_) => StatusError::forbidden(),
        SubscriptionEventsServiceError::Invalid(errors) => StatusError::unprocessable_entity()
            .brief("Subscription event can't transition")
            .detail(join_messages(&errors)),
        SubscriptionEventsServiceError::Remote(source) => {
            error!("subscription event request failed: {source}");

            StatusError::internal_server_error()
        }
    }
}
