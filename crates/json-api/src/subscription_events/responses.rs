//! Subscription event responses.

use std::string::ToString;

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use backoffice_app::domain::subscription_events::records::{
    RelatedSummary, SubscriptionEventRecord, SubscriptionSummary,
};

/// Id and name of a related resource.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct RelatedResponse {
    pub id: String,
    pub name: Option<String>,
}

impl From<RelatedSummary> for RelatedResponse {
    fn from(related: RelatedSummary) -> Self {
        RelatedResponse {
            id: related.id,
            name: related.name,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct SubscriptionResponse {
    pub id: String,
    pub status: Option<String>,
    pub organization: Option<RelatedResponse>,
    pub product: Option<RelatedResponse>,
}

impl From<SubscriptionSummary> for SubscriptionResponse {
    fn from(subscription: SubscriptionSummary) -> Self {
        SubscriptionResponse {
            id: subscription.id,
            status: subscription.status,
            organization: subscription.organization.map(Into::into),
            product: subscription.product.map(Into::into),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct SubscriptionEventResponse {
    pub id: Uuid,

    /// `provision`, `modify`, `suspend`, `reactivate` or `cancel`
    pub event_type: String,

    /// `requested`, `approved`, `rejected`, `fulfilled` or `failed`
    pub status: String,

    pub message: Option<String>,
    pub created_at: Option<String>,
    pub subscription: Option<SubscriptionResponse>,
    pub product_pricing: Option<RelatedResponse>,
}

impl From<SubscriptionEventRecord> for SubscriptionEventResponse {
    fn from(event: SubscriptionEventRecord) -> Self {
        SubscriptionEventResponse {
            id: event.uuid.into(),
            event_type: event.event_type.as_str().to_owned(),
            status: event.status.as_str().to_owned(),
            message: event.message,
            created_at: event.created_at.as_ref().map(ToString::to_string),
            subscription: event.subscription.map(Into::into),
            product_pricing: event.product_pricing.map(Into::into),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct SubscriptionEventsResponse {
    pub subscription_events: Vec<SubscriptionEventResponse>,
}

/// Single Subscription Event Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct SubscriptionEventEnvelope {
    pub subscription_event: SubscriptionEventResponse,
}

impl From<SubscriptionEventRecord> for SubscriptionEventEnvelope {
    fn from(event: SubscriptionEventRecord) -> Self {
        SubscriptionEventEnvelope {
            subscription_event: event.into(),
        }
    }
}
