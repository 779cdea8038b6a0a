//! Admin Panel Config

use clap::Args;

/// Admin panel settings.
#[derive(Debug, Args)]
pub struct AdminPanelConfig {
    /// Let support staff look up and view their own organization.
    #[arg(long, env = "ADMIN_SUPPORT_ENABLED", default_value_t = false, action = clap::ArgAction::Set)]
    pub support_enabled: bool,
}
