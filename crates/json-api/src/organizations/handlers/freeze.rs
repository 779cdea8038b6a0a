//! Freeze Organization Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use tracing::info;
use uuid::Uuid;

use crate::{
    extensions::*,
    organizations::{errors::into_status_error, responses::OrganizationDetailResponse},
    state::State,
};

/// Freeze Organization Handler
#[endpoint(
    tags("organizations"),
    summary = "Freeze Organization",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Organization frozen"),
        (status_code = StatusCode::NOT_FOUND, description = "Organization not found"),
    ),
)]
pub(crate) async fn handler(
    organization: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<OrganizationDetailResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let ctx = depot.request_context_or_401()?;
    let organization = organization.into_inner();

    let detail = state
        .app
        .organizations
        .freeze_organization(ctx, organization.into())
        .await
        .map_err(into_status_error)?;

    info!(organization_uuid = %organization, "froze organization");

    Ok(Json(detail.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use backoffice_app::domain::organizations::{
        OrganizationsServiceError, data::OrganizationDetail, records::OrganizationUuid,
    };

    use crate::test_helpers::{Mocks, admin_service, make_organization};

    use super::*;

    fn route() -> Router {
        Router::with_path("organizations/{organization}/freeze").put(handler)
    }

    #[tokio::test]
    async fn test_freeze_renders_frozen_organization() -> TestResult {
        let uuid = OrganizationUuid::new();

        let mut mocks = Mocks::default();

        mocks
            .organizations
            .expect_freeze_organization()
            .once()
            .withf(move |_, organization| *organization == uuid)
            .return_once(move |_, _| {
                let mut organization = make_organization(uuid, "Acme");
                organization.account_frozen = true;

                Ok(OrganizationDetail {
                    organization,
                    active_apps: vec![],
                })
            });

        let response: OrganizationDetailResponse =
            TestClient::put(format!("http://example.com/organizations/{uuid}/freeze"))
                .send(&admin_service(mocks, route()))
                .await
                .take_json()
                .await?;

        assert!(response.organization.account_frozen);

        Ok(())
    }

    #[tokio::test]
    async fn test_freeze_missing_organization_returns_404() -> TestResult {
        let mut mocks = Mocks::default();

        mocks
            .organizations
            .expect_freeze_organization()
            .once()
            .return_once(|_, _| Err(OrganizationsServiceError::NotFound));

        let res = TestClient::put(format!(
            "http://example.com/organizations/{}/freeze",
            OrganizationUuid::new()
        ))
        .send(&admin_service(mocks, route()))
        .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
