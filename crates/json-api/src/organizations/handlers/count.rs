//! Organization Count Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    extensions::*,
    organizations::{errors::into_status_error, responses::CountResponse},
    state::State,
};

/// Organization Count Handler
///
/// Returns the number of organizations visible to the caller.
#[endpoint(
    tags("organizations"),
    summary = "Count Organizations",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<CountResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let ctx = depot.request_context_or_401()?;

    let count = state
        .app
        .organizations
        .count_organizations(ctx)
        .await
        .map_err(into_status_error)?;

    Ok(Json(CountResponse { count }))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use backoffice_app::{
        auth::Forbidden,
        domain::organizations::{OrganizationsServiceError, records::OrganizationUuid},
    };

    use crate::test_helpers::{Mocks, admin_service, service_as, support_context};

    use super::*;

    fn route() -> Router {
        Router::with_path("organizations/count").get(handler)
    }

    #[tokio::test]
    async fn test_count_returns_reported_total() -> TestResult {
        let mut mocks = Mocks::default();

        mocks
            .organizations
            .expect_count_organizations()
            .once()
            .return_once(|_| Ok(17));

        let response: CountResponse = TestClient::get("http://example.com/organizations/count")
            .send(&admin_service(mocks, route()))
            .await
            .take_json()
            .await?;

        assert_eq!(response.count, 17);

        Ok(())
    }

    #[tokio::test]
    async fn test_count_is_forbidden_for_support_users() -> TestResult {
        let mut mocks = Mocks::default();

        mocks
            .organizations
            .expect_count_organizations()
            .once()
            .return_once(|_| Err(OrganizationsServiceError::Forbidden(Forbidden)));

        let res = TestClient::get("http://example.com/organizations/count")
            .send(&service_as(
                support_context(OrganizationUuid::new(), "EXT-1"),
                mocks,
                route(),
            ))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::FORBIDDEN));

        Ok(())
    }
}
