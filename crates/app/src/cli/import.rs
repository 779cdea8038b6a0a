use std::path::PathBuf;

use backoffice_app::{
    auth::RequestContext,
    domain::{
        imports::{ImportError, ImportService, RemoteImportService},
        members::data::InvitedMember,
        users::records::UserUuid,
    },
};
use clap::Args;
use uuid::Uuid;

use crate::cli::remote::RemoteArgs;

#[derive(Debug, Args)]
pub(crate) struct ImportArgs {
    #[command(flatten)]
    remote: RemoteArgs,

    /// CSV file to import
    #[arg(long)]
    file: PathBuf,

    /// User recorded as the referrer of every staged invite
    #[arg(long)]
    referrer: Uuid,
}

pub(crate) async fn run(args: ImportArgs) -> Result<(), String> {
    let input = tokio::fs::read(&args.file)
        .await
        .map_err(|error| format!("failed to read {}: {error}", args.file.display()))?;

    let service = RemoteImportService::new(args.remote.client()?);
    let ctx = RequestContext::operator(UserUuid::from_uuid(args.referrer));

    let report = match service.import_csv(&ctx, &input).await {
        Ok(report) => report,
        Err(ImportError::Invalid(errors)) => {
            for error in &errors {
                match &error.field {
                    Some(field) => eprintln!("row {}: {field} {}", error.row, error.message),
                    None => eprintln!("row {}: {}", error.row, error.message),
                }
            }

            return Err(format!("import rejected with {} error(s)", errors.len()));
        }
        Err(error) => return Err(format!("import failed: {error}")),
    };

    for organization in &report.organizations {
        let outcome = if organization.created { "created" } else { "reused" };

        println!("organization {outcome}: {} ({})", organization.name, organization.uuid);
    }

    for imported in &report.members {
        let member = match &imported.member {
            InvitedMember::User(user) => format!("user {}", user.email),
            InvitedMember::Invitation(invite) => format!("invite {}", invite.user_email),
        };

        println!("row {}: {member} -> {}", imported.row, imported.organization);
    }

    Ok(())
}
