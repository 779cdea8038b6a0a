use backoffice_app::auth::{AuthService, RemoteAuthService};
use clap::Args;

use crate::cli::remote::RemoteArgs;

#[derive(Debug, Args)]
pub(crate) struct VerifyTokenArgs {
    #[command(flatten)]
    remote: RemoteArgs,

    /// API token to check
    #[arg(long, env = "BACKOFFICE_API_TOKEN", hide_env_values = true)]
    token: String,
}

pub(crate) async fn run(args: VerifyTokenArgs) -> Result<(), String> {
    let service = RemoteAuthService::new(args.remote.client()?);

    let actor = service
        .authenticate_bearer(&args.token)
        .await
        .map_err(|error| format!("token rejected: {error}"))?;

    println!("user_uuid: {}", actor.uuid);
    println!("email: {}", actor.email);
    println!("admin_role: {:?}", actor.admin_role);

    if let Some(organization) = actor.support_organization {
        if let Some(uuid) = organization.uuid {
            println!("support_organization: {uuid}");
        }
        if let Some(external_id) = organization.external_id {
            println!("support_external_id: {external_id}");
        }
    }

    Ok(())
}
