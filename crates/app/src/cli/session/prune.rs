use clap::Args;
use temple_app::auth::PgAuthRepository;

use crate::cli::DatabaseArgs;

#[derive(Debug, Args)]
pub(crate) struct PruneSessionsArgs {
    #[command(flatten)]
    database: DatabaseArgs,
}

pub(crate) async fn run(args: PruneSessionsArgs) -> Result<(), String> {
    let pruned = PgAuthRepository::new(args.database.connect().await?)
        .prune_sessions()
        .await
        .map_err(|error| format!("failed to prune sessions: {error}"))?;

    println!("pruned {pruned} expired or revoked sessions");

    Ok(())
}
