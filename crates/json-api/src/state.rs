//! State

use std::sync::Arc;

use backoffice_app::context::AppContext;

#[derive(Clone)]
pub(crate) struct State {
    pub(crate) app: AppContext,

    /// Whether support staff may use the admin panel.
    pub(crate) support_enabled: bool,
}

impl State {
    #[must_use]
    pub(crate) fn new(app: AppContext, support_enabled: bool) -> Self {
        Self {
            app,
            support_enabled,
        }
    }

    #[must_use]
    pub(crate) fn from_app_context(app: AppContext, support_enabled: bool) -> Arc<Self> {
        Arc::new(Self::new(app, support_enabled))
    }
}
