//! Server configuration module

use clap::Parser;

use crate::config::{
    admin::AdminPanelConfig,
    observability::{LoggingConfig, ObservabilityConfig},
    remote::RemoteServiceConfig,
    server::ServerRuntimeConfig,
};

pub(crate) mod admin;
pub(crate) mod observability;
pub(crate) mod remote;
pub(crate) mod server;

/// Back-office JSON API Server configuration
#[derive(Debug, Parser)]
#[command(name = "backoffice-json", about = "Back-office JSON API Server", long_about = None)]
pub struct ServerConfig {
    /// Server network settings.
    #[command(flatten)]
    pub server: ServerRuntimeConfig,

    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,

    /// Observability (traces/metrics) settings.
    #[command(flatten)]
    pub observability: ObservabilityConfig,

    /// Remote resource service settings.
    #[command(flatten)]
    pub remote: RemoteServiceConfig,

    /// Admin panel settings.
    #[command(flatten)]
    pub admin: AdminPanelConfig,
}

impl ServerConfig {
    /// Load configuration from environment and CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be parsed
    pub fn load() -> Result<Self, clap::Error> {
        // Load .env file if present (ignore if missing)
        _ = dotenvy::dotenv();

        Self::try_parse()
    }

    /// Get the socket address for binding
    #[must_use]
    pub fn socket_addr(&self) -> String {
        self.server.socket_addr()
    }
}
