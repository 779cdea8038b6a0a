use clap::{Parser, Subcommand};

mod import;
mod remote;
mod token;

#[derive(Debug, Parser)]
#[command(name = "backoffice-app", about = "Back-office CLI", long_about = None)]
pub(crate) struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    Token(token::TokenCommand),
    Import(import::ImportArgs),
}

impl Cli {
    pub(crate) async fn run(self) -> Result<(), String> {
        match self.command {
            Commands::Token(command) => token::run(command).await,
            Commands::Import(args) => import::run(args).await,
        }
    }
}
