use std::time::Duration;

use backoffice_app::remote::{RemoteClient, RemoteConfig};
use clap::Args;

#[derive(Debug, Args)]
pub(crate) struct RemoteArgs {
    /// Remote resource service base URL
    #[arg(long, env = "REMOTE_API_URL")]
    remote_api_url: String,

    /// Remote resource service API key
    #[arg(long, env = "REMOTE_API_KEY", hide_env_values = true)]
    remote_api_key: String,

    /// Remote resource service API secret
    #[arg(long, env = "REMOTE_API_SECRET", hide_env_values = true)]
    remote_api_secret: String,

    /// Request timeout in seconds
    #[arg(long, env = "REMOTE_API_TIMEOUT_SECONDS", default_value_t = 30)]
    remote_api_timeout_seconds: u64,
}

impl RemoteArgs {
    pub(crate) fn client(self) -> Result<RemoteClient, String> {
        RemoteClient::new(RemoteConfig {
            base_url: self.remote_api_url,
            api_key: self.remote_api_key,
            api_secret: self.remote_api_secret,
            timeout: Duration::from_secs(self.remote_api_timeout_seconds),
        })
        .map_err(|error| format!("failed to build remote client: {error}"))
    }
}
