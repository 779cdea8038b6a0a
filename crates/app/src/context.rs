//! App Context

use std::sync::Arc;

use thiserror::Error;

use crate::{
    auth::{AuthService, RemoteAuthService},
    domain::{
        imports::{ImportService, RemoteImportService},
        members::{MembersService, RemoteMembersService},
        organizations::{OrganizationsService, RemoteOrganizationsService},
        subscription_events::{RemoteSubscriptionEventsService, SubscriptionEventsService},
    },
    remote::{RemoteClient, RemoteConfig, RemoteError},
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to build remote service client")]
    Remote(#[source] RemoteError),
}

#[derive(Clone)]
pub struct AppContext {
    pub organizations: Arc<dyn OrganizationsService>,
    pub members: Arc<dyn MembersService>,
    pub subscription_events: Arc<dyn SubscriptionEventsService>,
    pub imports: Arc<dyn ImportService>,
    pub auth: Arc<dyn AuthService>,
}

impl AppContext {
    /// Build application context against the remote resource service.
    ///
    /// # Errors
    ///
    /// Returns an error when the HTTP client can't be built.
    pub fn from_remote_config(config: RemoteConfig) -> Result<Self, AppInitError> {
        let client = RemoteClient::new(config).map_err(AppInitError::Remote)?;

        Ok(Self::from_client(&client))
    }

    #[must_use]
    pub fn from_client(client: &RemoteClient) -> Self {
        Self {
            organizations: Arc::new(RemoteOrganizationsService::new(client.clone())),
            members: Arc::new(RemoteMembersService::new(client.clone())),
            subscription_events: Arc::new(RemoteSubscriptionEventsService::new(client.clone())),
            imports: Arc::new(RemoteImportService::new(client.clone())),
            auth: Arc::new(RemoteAuthService::new(client.clone())),
        }
    }
}
