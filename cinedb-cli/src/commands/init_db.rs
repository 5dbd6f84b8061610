//! Create the tables and indexes without starting the server.

use anyhow::{Context, Result};
use clap::Parser;

use cinedb_server::db::{self, schema};

/// Arguments for the init-db command
#[derive(Parser, Debug)]
pub struct InitDbArgs {
    /// Database URL (overrides environment)
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,
}

pub async fn run_init_db(args: InitDbArgs) -> Result<()> {
    let database_url = args
        .database_url
        .context("DATABASE_URL not set. Set via --database-url, DATABASE_URL env, or .env")?;

    // Schema setup runs its statements one at a time
    let pool = db::connect(&database_url, 1)
        .await
        .context("Failed to create database pool")?;

    schema::ensure(&pool)
        .await
        .context("Failed to prepare database schema")?;

    tracing::info!("Database schema ready");
    pool.close().await;

    Ok(())
}
