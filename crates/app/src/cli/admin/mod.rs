use clap::{Args, Subcommand};

mod create;
mod list;
mod remove;

#[derive(Debug, Args)]
pub(crate) struct AdminCommand {
    #[command(subcommand)]
    command: AdminSubcommand,
}

#[derive(Debug, Subcommand)]
enum AdminSubcommand {
    Create(create::CreateAdminArgs),
    List(list::ListAdminsArgs),
    Remove(remove::RemoveAdminArgs),
}

pub(crate) async fn run(command: AdminCommand) -> Result<(), String> {
    match command.command {
        AdminSubcommand::Create(args) => create::run(args).await,
        AdminSubcommand::List(args) => list::run(args).await,
        AdminSubcommand::Remove(args) => remove::run(args).await,
    }
}
