use clap::Args;
use temple_app::{
    auth::{AuthServiceError, PgAuthService},
    domain::admins::{AdminsService, PgAdminsService, data::NewAdmin},
};

use crate::cli::{DatabaseArgs, OpenBaoArgs};

#[derive(Debug, Args)]
pub(crate) struct CreateAdminArgs {
    #[command(flatten)]
    database: DatabaseArgs,

    #[command(flatten)]
    openbao: OpenBaoArgs,

    /// Email address to add to the allow-list
    #[arg(long)]
    email: String,

    /// Display name
    #[arg(long)]
    name: String,

    /// Login password; when omitted only the allow-list entry is created
    #[arg(long, env = "ADMIN_PASSWORD", hide_env_values = true)]
    password: Option<String>,
}

pub(crate) async fn run(args: CreateAdminArgs) -> Result<(), String> {
    if args.email.trim().is_empty() {
        return Err("email cannot be empty".to_string());
    }

    let pool = args.database.connect().await?;

    if let Some(password) = args.password.as_deref() {
        if password.is_empty() {
            return Err("password cannot be empty".to_string());
        }

        let auth = PgAuthService::new(pool.clone(), args.openbao.client());

        match auth.create_account(&args.email, password).await {
            Ok(account) => println!("account_uuid: {}", account.uuid),
            Err(AuthServiceError::AccountExists) => {
                println!("account already exists; keeping its password");
            }
            Err(error) => return Err(format!("failed to create account: {error}")),
        }
    }

    let admin = PgAdminsService::new(pool)
        .create_admin(NewAdmin::new(&args.email, &args.name))
        .await
        .map_err(|error| format!("failed to add admin: {error}"))?;

    println!("admin_uuid: {}", admin.uuid);
    println!("admin_email: {}", admin.email);
    println!("admin_name: {}", admin.name);

    Ok(())
}
