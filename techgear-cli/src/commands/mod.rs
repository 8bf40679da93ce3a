//! Subcommand implementations

pub mod migrate;
pub mod serve;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use sqlx::SqlitePool;

use techgear_server::db::{create_pool, migrations};

pub use migrate::run_migrate;
pub use serve::run_serve;

/// Database location shared by every subcommand
#[derive(Args, Debug)]
pub struct DatabaseArgs {
    /// SQLite database file (created if missing)
    #[arg(long, short = 'd', env = "TECHGEAR_DATABASE", default_value = "TechGearWebShop.db")]
    pub database: PathBuf,
}

impl DatabaseArgs {
    /// Open the database and make sure the schema exists.
    pub async fn open(&self) -> Result<SqlitePool> {
        let pool = create_pool(&self.database)
            .await
            .with_context(|| format!("Failed to open database {}", self.database.display()))?;

        migrations::run(&pool)
            .await
            .context("Failed to create database schema")?;

        Ok(pool)
    }
}
