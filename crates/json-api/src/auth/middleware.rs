//! Auth middleware.

use std::sync::Arc;

use backoffice_app::auth::{AuthServiceError, RequestContext};
use salvo::{http::header::AUTHORIZATION, prelude::*};
use tracing::error;

use crate::{
    extensions::*,
    observability::{AuthOutcome, observe_auth},
    state::State,
};

#[salvo::handler]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    let Some(token) = extract_bearer_token(req) else {
        observe_auth(AuthOutcome::MissingToken);
        res.render(StatusError::unauthorized().brief("Missing or invalid Authorization header"));

        return;
    };

    let state = match depot.obtain::<Arc<State>>() {
        Ok(state) => Arc::clone(state),
        Err(_error) => {
            res.render(StatusError::internal_server_error());

            return;
        }
    };

    let actor = match state.app.auth.authenticate_bearer(token).await {
        Ok(actor) => actor,
        Err(AuthServiceError::NotFound) => {
            observe_auth(AuthOutcome::InvalidToken);
            res.render(StatusError::unauthorized().brief("Invalid API token"));

            return;
        }
        Err(AuthServiceError::NotAdmin) => {
            observe_auth(AuthOutcome::NotAdmin);
            res.render(StatusError::forbidden().brief("Back-office access required"));

            return;
        }
        Err(AuthServiceError::Remote(source)) => {
            error!("failed to validate api token: {source}");
            observe_auth(AuthOutcome::Failed);

            res.render(StatusError::internal_server_error());

            return;
        }
    };

    observe_auth(AuthOutcome::Authenticated);
    depot.insert_request_context(RequestContext::new(actor, state.support_enabled));

    ctrl.call_next(req, depot, res).await;
}

fn extract_bearer_token(req: &Request) -> Option<&str> {
    let value = req.headers().get(AUTHORIZATION)?.to_str().ok()?;
    let mut parts = value.splitn(2, ' ');

    let scheme = parts.next()?;
    let token = parts.next()?.trim();

    if !scheme.eq_ignore_ascii_case("bearer") || token.is_empty() {
        return None;
    }

    Some(token)
}
