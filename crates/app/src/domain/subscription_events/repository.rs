//! Subscription Events Repository

use jiff::Timestamp;
use reqwest::Method;
use serde::Deserialize;

use crate::{
    domain::subscription_events::records::{
        RelatedSummary, SubscriptionEventRecord, SubscriptionEventStatus, SubscriptionEventType,
        SubscriptionEventUuid, SubscriptionSummary,
    },
    remote::{Document, FromResource, Page, Query, RemoteClient, RemoteError, Resource},
};

/// Relationships rendered alongside events.
pub(crate) const INCLUDES: [&str; 4] = [
    "subscription",
    "subscription.organization",
    "subscription.product",
    "product_pricing",
];

#[derive(Debug, Clone)]
pub(crate) struct RemoteSubscriptionEventsRepository {
    client: RemoteClient,
}

impl RemoteSubscriptionEventsRepository {
    #[must_use]
    pub(crate) fn new(client: RemoteClient) -> Self {
        Self { client }
    }

    pub(crate) async fn list(
        &self,
        query: Query,
    ) -> Result<Vec<SubscriptionEventRecord>, RemoteError> {
        self.client
            .fetch("/subscription_events", &query.include(INCLUDES))
            .await?
            .decode_all()
    }

    /// First event matching `query` and `id`.
    pub(crate) async fn find(
        &self,
        event: SubscriptionEventUuid,
        query: Query,
    ) -> Result<SubscriptionEventRecord, RemoteError> {
        let query = query.filter("id", event.to_string()).page(Page::SINGLE);

        self.client
            .fetch("/subscription_events", &query)
            .await?
            .decode_one()
    }

    /// Run `approve` or `reject`. Returns the updated event when the remote
    /// sends it back.
    pub(crate) async fn transition(
        &self,
        event: SubscriptionEventUuid,
        action: &str,
    ) -> Result<Option<SubscriptionEventRecord>, RemoteError> {
        let document = self
            .client
            .action(
                Method::POST,
                &format!("/subscription_events/{event}/{action}"),
                None,
            )
            .await?;

        document
            .resources()
            .first()
            .map(|resource| SubscriptionEventRecord::from_resource(resource, &document))
            .transpose()
    }
}

#[derive(Debug, Deserialize)]
struct EventAttributes {
    event_type: SubscriptionEventType,
    status: SubscriptionEventStatus,

    #[serde(default)]
    message: Option<String>,

    #[serde(default)]
    created_at: Option<Timestamp>,
}

#[derive(Debug, Default, Deserialize)]
struct NamedAttributes {
    #[serde(default)]
    name: Option<String>,

    #[serde(default)]
    status: Option<String>,
}

fn named(resource: &Resource) -> Result<(RelatedSummary, Option<String>), RemoteError> {
    let attributes: NamedAttributes = resource.attributes()?;

    Ok((
        RelatedSummary {
            id: resource.id.clone(),
            name: attributes.name,
        },
        attributes.status,
    ))
}

fn related_summary(
    document: &Document,
    resource: &Resource,
    name: &str,
) -> Result<Option<RelatedSummary>, RemoteError> {
    document
        .related_one(resource, name)
        .map(|related| named(related).map(|(summary, _)| summary))
        .transpose()
}

impl FromResource for SubscriptionEventRecord {
    fn from_resource(resource: &Resource, document: &Document) -> Result<Self, RemoteError> {
        let attributes: EventAttributes = resource.attributes()?;

        let subscription = document
            .related_one(resource, "subscription")
            .map(|subscription| {
                let (summary, status) = named(subscription)?;

                Ok::<_, RemoteError>(SubscriptionSummary {
                    id: summary.id,
                    status,
                    organization: related_summary(document, subscription, "organization")?,
                    product: related_summary(document, subscription, "product")?,
                })
            })
            .transpose()?;

        Ok(Self {
            uuid: resource.uuid()?,
            event_type: attributes.event_type,
            status: attributes.status,
            message: attributes.message,
            created_at: attributes.created_at,
            subscription,
            product_pricing: related_summary(document, resource, "product_pricing")?,
        })
    }
}
