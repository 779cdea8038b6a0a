//! Subscription events service.

use async_trait::async_trait;
use mockall::automock;
use tracing::info;

use crate::{
    auth::{Gate, RequestContext, authorize},
    domain::{
        organizations::records::OrganizationUuid,
        subscription_events::{
            errors::SubscriptionEventsServiceError,
            records::{SubscriptionEventRecord, SubscriptionEventUuid, SubscriptionUuid},
            repository::{INCLUDES, RemoteSubscriptionEventsRepository},
        },
    },
    remote::{Query, RemoteClient},
};

#[derive(Debug, Clone)]
pub struct RemoteSubscriptionEventsService {
    repository: RemoteSubscriptionEventsRepository,
}

impl RemoteSubscriptionEventsService {
    #[must_use]
    pub fn new(client: RemoteClient) -> Self {
        Self {
            repository: RemoteSubscriptionEventsRepository::new(client),
        }
    }

    async fn transition(
        &self,
        ctx: &RequestContext,
        event: SubscriptionEventUuid,
        action: &str,
    ) -> Result<SubscriptionEventRecord, SubscriptionEventsServiceError> {
        authorize(ctx, Gate::Manage)?;

        let current = self.repository.find(event, Query::new()).await?;
        let updated = self.repository.transition(current.uuid, action).await?;

        info!(event = %current.uuid, action, "subscription event transitioned");

        Ok(updated.unwrap_or(current))
    }
}

/// Events of one subscription, scoped to the acting manager and organization.
fn subscription_query(
    ctx: &RequestContext,
    organization: OrganizationUuid,
    subscription: SubscriptionUuid,
) -> Query {
    ctx.scoped(Query::new())
        .filter("subscription.id", subscription.to_string())
        .metadata("organization_id", organization.to_string())
}

#[async_trait]
impl SubscriptionEventsService for RemoteSubscriptionEventsService {
    async fn list_events(
        &self,
        ctx: &RequestContext,
        organization: OrganizationUuid,
        subscription: SubscriptionUuid,
    ) -> Result<Vec<SubscriptionEventRecord>, SubscriptionEventsServiceError> {
        authorize(ctx, Gate::ReadSubscriptionEvents(organization))?;

        Ok(self
            .repository
            .list(subscription_query(ctx, organization, subscription))
            .await?)
    }

    async fn get_event(
        &self,
        ctx: &RequestContext,
        organization: OrganizationUuid,
        subscription: SubscriptionUuid,
        event: SubscriptionEventUuid,
    ) -> Result<SubscriptionEventRecord, SubscriptionEventsServiceError> {
        authorize(ctx, Gate::ReadSubscriptionEvents(organization))?;

        let query = subscription_query(ctx, organization, subscription).include(INCLUDES);

        Ok(self.repository.find(event, query).await?)
    }

    async fn approve_event(
        &self,
        ctx: &RequestContext,
        event: SubscriptionEventUuid,
    ) -> Result<SubscriptionEventRecord, SubscriptionEventsServiceError> {
        self.transition(ctx, event, "approve").await
    }

    async fn reject_event(
        &self,
        ctx: &RequestContext,
        event: SubscriptionEventUuid,
    ) -> Result<SubscriptionEventRecord, SubscriptionEventsServiceError> {
        self.transition(ctx, event, "reject").await
    }
}

#[automock]
#[async_trait]
pub trait SubscriptionEventsService: Send + Sync {
    async fn list_events(
        &self,
        ctx: &RequestContext,
        organization: OrganizationUuid,
        subscription: SubscriptionUuid,
    ) -> Result<Vec<SubscriptionEventRecord>, SubscriptionEventsServiceError>;

    async fn get_event(
        &self,
        ctx: &RequestContext,
        organization: OrganizationUuid,
        subscription: SubscriptionUuid,
        event: SubscriptionEventUuid,
    ) -> Result<SubscriptionEventRecord, SubscriptionEventsServiceError>;

    async fn approve_event(
        &self,
        ctx: &RequestContext,
        event: SubscriptionEventUuid,
    ) -> Result<SubscriptionEventRecord, SubscriptionEventsServiceError>;

    async fn reject_event(
        &self,
        ctx: &RequestContext,
        event: SubscriptionEventUuid,
    ) -> Result<SubscriptionEventRecord, SubscriptionEventsServiceError>;
}

#[cfg(test)]
mod tests {
    use serde_json::{Value, json};
    use testresult::TestResult;
    use wiremock::{
        Mock, ResponseTemplate,
        matchers::{method, path, query_param},
    };

    use super::*;
    use crate::{
        domain::subscription_events::records::{SubscriptionEventStatus, SubscriptionEventType},
        test::TestContext,
    };

    fn event_document(event: SubscriptionEventUuid, subscription: SubscriptionUuid) -> Value {
        json!({
            "data": [{
                "id": event.to_string(),
                "type": "subscription_events",
                "attributes": { "event_type": "provision", "status": "requested" },
                "relationships": {
                    "subscription": { "data": { "type": "subscriptions", "id": subscription.to_string() } },
                    "product_pricing": { "data": { "type": "product_pricings", "id": "pp-1" } }
                }
            }],
            "included": [
                {
                    "id": subscription.to_string(),
                    "type": "subscriptions",
                    "attributes": { "status": "pending" },
                    "relationships": {
                        "organization": { "data": { "type": "organizations", "id": "org-1" } },
                        "product": { "data": { "type": "products", "id": "prod-1" } }
                    }
                },
                { "id": "org-1", "type": "organizations", "attributes": { "name": "Acme" } },
                { "id": "prod-1", "type": "products", "attributes": { "name": "Xero" } },
                { "id": "pp-1", "type": "product_pricings", "attributes": { "name": "Monthly" } }
            ]
        })
    }

    #[tokio::test]
    async fn list_filters_by_subscription_and_scopes_metadata() -> TestResult {
        let ctx = TestContext::new().await?;
        let admin = TestContext::admin();
        let organization = OrganizationUuid::new();
        let subscription = SubscriptionUuid::new();
        let event = SubscriptionEventUuid::new();

        Mock::given(method("GET"))
            .and(path("/subscription_events"))
            .and(query_param("filter[subscription.id]", subscription.to_string()))
            .and(query_param("_metadata[act_as_manager]", admin.actor.uuid.to_string()))
            .and(query_param("_metadata[organization_id]", organization.to_string()))
            .and(query_param(
                "include",
                "subscription,subscription.organization,subscription.product,product_pricing",
            ))
            .respond_with(ResponseTemplate::new(200).set_body_json(event_document(event, subscription)))
            .expect(1)
            .mount(&ctx.server)
            .await;

        let service = RemoteSubscriptionEventsService::new(ctx.client.clone());

        let events = service.list_events(&admin, organization, subscription).await?;
        let first = events.first().ok_or("no events")?;

        assert_eq!(first.uuid, event);
        assert_eq!(first.event_type, SubscriptionEventType::Provision);
        assert_eq!(first.status, SubscriptionEventStatus::Requested);

        let summary = first.subscription.as_ref().ok_or("no subscription")?;

        assert_eq!(summary.status.as_deref(), Some("pending"));
        assert_eq!(
            summary.product.as_ref().and_then(|p| p.name.as_deref()),
            Some("Xero")
        );
        assert_eq!(
            first.product_pricing.as_ref().and_then(|p| p.name.as_deref()),
            Some("Monthly")
        );

        Ok(())
    }

    #[tokio::test]
    async fn show_requests_single_page_and_reports_missing_events() -> TestResult {
        let ctx = TestContext::new().await?;

        Mock::given(method("GET"))
            .and(path("/subscription_events"))
            .and(query_param("page[size]", "1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": [] })))
            .expect(1)
            .mount(&ctx.server)
            .await;

        let service = RemoteSubscriptionEventsService::new(ctx.client.clone());

        let result = service
            .get_event(
                &TestContext::admin(),
                OrganizationUuid::new(),
                SubscriptionUuid::new(),
                SubscriptionEventUuid::new(),
            )
            .await;

        assert!(matches!(result, Err(SubscriptionEventsServiceError::NotFound)));

        Ok(())
    }

    #[tokio::test]
    async fn approve_fetches_then_posts_action() -> TestResult {
        let ctx = TestContext::new().await?;
        let event = SubscriptionEventUuid::new();

        Mock::given(method("GET"))
            .and(path("/subscription_events"))
            .and(query_param("filter[id]", event.to_string()))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(event_document(event, SubscriptionUuid::new())),
            )
            .expect(1)
            .mount(&ctx.server)
            .await;

        Mock::given(method("POST"))
            .and(path(format!("/subscription_events/{event}/approve")))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&ctx.server)
            .await;

        let service = RemoteSubscriptionEventsService::new(ctx.client.clone());

        let approved = service.approve_event(&TestContext::admin(), event).await?;

        assert_eq!(approved.uuid, event);

        Ok(())
    }

    #[tokio::test]
    async fn support_users_cannot_transition_events() -> TestResult {
        let ctx = TestContext::new().await?;
        let organization = OrganizationUuid::new();

        let service = RemoteSubscriptionEventsService::new(ctx.client.clone());
        let support = TestContext::support(organization, "EXT-1");

        let result = service
            .reject_event(&support, SubscriptionEventUuid::new())
            .await;

        assert!(matches!(result, Err(SubscriptionEventsServiceError::Forbidden(_))));

        Ok(())
    }
}
