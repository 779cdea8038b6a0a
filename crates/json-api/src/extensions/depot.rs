//! Depot helper extensions.

use std::any::Any;

use backoffice_app::auth::RequestContext;
use salvo::prelude::{Depot, StatusError};

/// Helpers for mapping depot extraction failures to HTTP errors.
pub(crate) trait DepotExt {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError>;

    fn insert_request_context(&mut self, ctx: RequestContext);

    /// The authenticated request context, or 401 when the auth middleware
    /// did not run.
    fn request_context_or_401(&self) -> Result<&RequestContext, StatusError>;
}

impl DepotExt for Depot {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError> {
        self.obtain::<T>()
            .map_err(|_ignored| StatusError::internal_server_error())
    }

    fn insert_request_context(&mut self, ctx: RequestContext) {
        self.inject(ctx);
    }

    fn request_context_or_401(&self) -> Result<&RequestContext, StatusError> {
        self.obtain::<RequestContext>()
            .map_err(|_ignored| StatusError::unauthorized())
    }
}
