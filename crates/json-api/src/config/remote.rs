//! Remote Service Config

use std::time::Duration;

use backoffice_app::remote::RemoteConfig;
use clap::Args;

/// Remote resource service settings.
#[derive(Debug, Args)]
pub struct RemoteServiceConfig {
    /// Remote resource service base URL
    #[arg(long, env = "REMOTE_API_URL")]
    pub remote_api_url: String,

    /// Remote resource service API key
    #[arg(long, env = "REMOTE_API_KEY", hide_env_values = true)]
    pub remote_api_key: String,

    /// Remote resource service API secret
    #[arg(long, env = "REMOTE_API_SECRET", hide_env_values = true)]
    pub remote_api_secret: String,

    /// Remote request timeout in seconds
    #[arg(long, env = "REMOTE_API_TIMEOUT_SECONDS", default_value_t = 30_u64)]
    pub remote_api_timeout_seconds: u64,
}

impl RemoteServiceConfig {
    /// Client configuration for the remote service.
    #[must_use]
    pub fn remote_config(&self) -> RemoteConfig {
        RemoteConfig {
            base_url: self.remote_api_url.clone(),
            api_key: self.remote_api_key.clone(),
            api_secret: self.remote_api_secret.clone(),
            timeout: Duration::from_secs(self.remote_api_timeout_seconds),
        }
    }
}
