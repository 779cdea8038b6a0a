use clap::{Args, Subcommand};

mod create;
mod verify;

#[derive(Debug, Args)]
pub(crate) struct TokenCommand {
    #[command(subcommand)]
    command: TokenSubcommand,
}

#[derive(Debug, Subcommand)]
enum TokenSubcommand {
    /// Issue an API token for a back-office user
    Create(create::CreateTokenArgs),

    /// Check which back-office user a token authenticates as
    Verify(verify::VerifyTokenArgs),
}

pub(crate) async fn run(command: TokenCommand) -> Result<(), String> {
    match command.command {
        TokenSubcommand::Create(args) => create::run(args).await,
        TokenSubcommand::Verify(args) => verify::run(args).await,
    }
}
