use backoffice_app::{
    auth::{RemoteAuthService, TOKEN_VERSION},
    domain::users::records::UserUuid,
};
use clap::Args;
use jiff::Timestamp;
use uuid::Uuid;

use crate::cli::remote::RemoteArgs;

#[derive(Debug, Args)]
pub(crate) struct CreateTokenArgs {
    #[command(flatten)]
    remote: RemoteArgs,

    /// Back-office admin user the token authenticates as
    #[arg(long)]
    user: Uuid,

    /// Optional token expiration timestamp (RFC 3339)
    #[arg(long)]
    token_expires_at: Option<String>,
}

pub(crate) async fn run(args: CreateTokenArgs) -> Result<(), String> {
    let token_expires_at = parse_token_expires_at(args.token_expires_at.as_deref())?;

    if let Some(expires_at) = token_expires_at.as_ref()
        && *expires_at <= Timestamp::now()
    {
        return Err("token-expires-at must be in the future".to_string());
    }

    let service = RemoteAuthService::new(args.remote.client()?);

    let issued = service
        .issue_api_token(UserUuid::from_uuid(args.user), token_expires_at)
        .await
        .map_err(|error| format!("failed to create token: {error}"))?;

    println!("token_uuid: {}", issued.record.uuid);
    println!("user_uuid: {}", issued.record.user_uuid);
    println!("token_version: {TOKEN_VERSION}");
    if let Some(expires_at) = issued.record.expires_at {
        println!("token_expires_at: {expires_at}");
    }
    println!("api_token: {}", issued.token);
    println!("store this token now; it is only shown once");

    Ok(())
}

fn parse_token_expires_at(raw: Option<&str>) -> Result<Option<Timestamp>, String> {
    raw.map(|value| {
        value
            .parse::<Timestamp>()
            .map_err(|error| format!("invalid token-expires-at timestamp: {error}"))
    })
    .transpose()
}
