use clap::Args;
use temple_app::domain::admins::{AdminsService, AdminsServiceError, PgAdminsService};

use crate::cli::DatabaseArgs;

#[derive(Debug, Args)]
pub(crate) struct RemoveAdminArgs {
    #[command(flatten)]
    database: DatabaseArgs,

    /// Email address to remove from the allow-list
    #[arg(long)]
    email: String,
}

pub(crate) async fn run(args: RemoveAdminArgs) -> Result<(), String> {
    let service = PgAdminsService::new(args.database.connect().await?);

    match service.remove_admin(&args.email).await {
        Ok(()) => println!("removed {} from the allow-list", args.email),
        Err(AdminsServiceError::NotFound) => {
            println!("{} was not on the allow-list", args.email);
        }
        Err(error) => return Err(format!("failed to remove admin: {error}")),
    }

    Ok(())
}
