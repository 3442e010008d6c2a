use clap::Args;
use temple_app::domain::admins::{AdminsService, PgAdminsService};

use crate::cli::DatabaseArgs;

#[derive(Debug, Args)]
pub(crate) struct ListAdminsArgs {
    #[command(flatten)]
    database: DatabaseArgs,
}

pub(crate) async fn run(args: ListAdminsArgs) -> Result<(), String> {
    let admins = PgAdminsService::new(args.database.connect().await?)
        .list_admins()
        .await
        .map_err(|error| format!("failed to list admins: {error}"))?;

    if admins.is_empty() {
        println!("no admins on the allow-list");
    }

    for admin in admins {
        println!("{}\t{}\t{}", admin.uuid, admin.email, admin.name);
    }

    Ok(())
}
