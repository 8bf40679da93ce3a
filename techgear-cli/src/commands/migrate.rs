//! Schema creation command

use anyhow::Result;
use clap::Parser;

use super::DatabaseArgs;

/// Arguments for the migrate command
#[derive(Parser, Debug)]
pub struct MigrateArgs {
    #[command(flatten)]
    pub db: DatabaseArgs,
}

/// Create the schema in the configured database and exit
pub async fn run_migrate(args: MigrateArgs) -> Result<()> {
    let pool = args.db.open().await?;
    pool.close().await;

    tracing::info!("Schema ready in {}", args.db.database.display());
    println!("Database ready: {}", args.db.database.display());
    Ok(())
}
