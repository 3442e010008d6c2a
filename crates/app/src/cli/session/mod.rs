use clap::{Args, Subcommand};

mod prune;
mod revoke;

#[derive(Debug, Args)]
pub(crate) struct SessionCommand {
    #[command(subcommand)]
    command: SessionSubcommand,
}

#[derive(Debug, Subcommand)]
enum SessionSubcommand {
    Revoke(revoke::RevokeSessionArgs),

    /// Delete expired and revoked sessions
    Prune(prune::PruneSessionsArgs),
}

pub(crate) async fn run(command: SessionCommand) -> Result<(), String> {
    match command.command {
        SessionSubcommand::Revoke(args) => revoke::run(args).await,
        SessionSubcommand::Prune(args) => prune::run(args).await,
    }
}
