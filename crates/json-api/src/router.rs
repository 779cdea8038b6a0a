//! App Router

use salvo::Router;

use crate::{auth, organizations, subscription_events};

pub fn app_router() -> Router {
    Router::new()
        .hoop(auth::middleware::handler)
        .push(
            Router::with_path("organizations")
                .get(organizations::index::handler)
                .post(organizations::create::handler)
                .push(Router::with_path("count").get(organizations::count::handler))
                .push(Router::with_path("in_arrears").get(organizations::in_arrears::handler))
                .push(
                    Router::with_path("download_batch_example")
                        .get(organizations::batch_example::handler),
                )
                .push(
                    Router::with_path("{organization}")
                        .get(organizations::get::handler)
                        .patch(organizations::update::handler)
                        .push(Router::with_path("users").post(organizations::invite_member::handler))
                        .push(
                            Router::with_path("update_member")
                                .put(organizations::update_member::handler),
                        )
                        .push(
                            Router::with_path("remove_member")
                                .put(organizations::remove_member::handler),
                        )
                        .push(
                            Router::with_path("remove_user")
                                .put(organizations::remove_member::handler),
                        )
                        .push(Router::with_path("freeze").put(organizations::freeze::handler))
                        .push(Router::with_path("unfreeze").put(organizations::unfreeze::handler))
                        .push(
                            Router::with_path("subscriptions/{subscription}/subscription_events")
                                .get(subscription_events::index::handler)
                                .push(
                                    Router::with_path("{event}")
                                        .get(subscription_events::get::handler),
                                ),
                        ),
                ),
        )
        .push(
            Router::with_path("organization/batch_import")
                .post(organizations::batch_import::handler),
        )
        .push(
            Router::with_path("subscription_events/{event}")
                .push(Router::with_path("approve").post(subscription_events::approve::handler))
                .push(Router::with_path("reject").post(subscription_events::reject::handler)),
        )
}

#[cfg(test)]
mod tests {
    use salvo::{affix_state::inject, http::header::AUTHORIZATION, prelude::*, test::TestClient};
    use testresult::TestResult;

    use crate::test_helpers::{Mocks, admin_actor, state_with};

    use super::*;

    fn service(mocks: Mocks) -> Service {
        Service::new(
            Router::new()
                .hoop(inject(state_with(mocks)))
                .push(app_router()),
        )
    }

    #[tokio::test]
    async fn test_routes_require_a_bearer_token() -> TestResult {
        let mut mocks = Mocks::default();

        mocks.auth.expect_authenticate_bearer().never();
        mocks.organizations.expect_count_organizations().never();

        let res = TestClient::get("http://example.com/organizations/count")
            .send(&service(mocks))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));

        Ok(())
    }

    #[tokio::test]
    async fn test_static_segments_win_over_organization_ids() -> TestResult {
        let mut mocks = Mocks::default();

        mocks
            .auth
            .expect_authenticate_bearer()
            .once()
            .return_once(|_| Ok(admin_actor()));

        mocks
            .organizations
            .expect_count_organizations()
            .once()
            .return_once(|_| Ok(7));

        mocks.organizations.expect_get_organization().never();

        let res = TestClient::get("http://example.com/organizations/count")
            .add_header(AUTHORIZATION, "Bearer abc123", true)
            .send(&service(mocks))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        Ok(())
    }
}
