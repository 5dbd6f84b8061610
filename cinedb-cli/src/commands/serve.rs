//! HTTP server command
//!
//! Connects to PostgreSQL, makes sure the tables exist, then serves the
//! movie API until Ctrl+C or SIGTERM.

use anyhow::{Context, Result};
use clap::Parser;
use std::net::SocketAddr;

use cinedb_server::db::{self, schema, DEFAULT_MAX_CONNECTIONS};
use cinedb_server::http::{run_server, ServerConfig};

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Address to bind to (default: 127.0.0.1:3030)
    #[arg(long, short = 'b', env = "CINEDB_BIND", default_value = "127.0.0.1:3030")]
    pub bind: SocketAddr,

    /// Allow permissive CORS (all origins) - use with caution
    #[arg(long)]
    pub cors_permissive: bool,

    /// Database URL (overrides environment)
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,

    /// Maximum number of pooled database connections
    #[arg(long, env = "CINEDB_MAX_CONNECTIONS", default_value_t = DEFAULT_MAX_CONNECTIONS)]
    pub max_connections: u32,
}

/// Run the HTTP server
pub async fn run_serve(args: ServeArgs) -> Result<()> {
    let database_url = args
        .database_url
        .context("DATABASE_URL not set. Set via --database-url, DATABASE_URL env, or .env")?;

    tracing::info!("Starting cinedb server on {}", args.bind);

    let pool = db::connect(&database_url, args.max_connections)
        .await
        .context("Failed to create database pool")?;

    schema::ensure(&pool)
        .await
        .context("Failed to prepare database schema")?;

    let config = ServerConfig {
        bind_addr: args.bind,
        cors_permissive: args.cors_permissive,
    };

    // Blocks until shutdown
    run_server(pool, config).await.context("Server error")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Parser, Debug)]
    struct Wrapper {
        #[command(flatten)]
        args: ServeArgs,
    }

    #[test]
    fn defaults() {
        let parsed = Wrapper::try_parse_from(["serve", "--database-url", "postgres://x/db"])
            .unwrap()
            .args;
        assert_eq!(parsed.bind, SocketAddr::from(([127, 0, 0, 1], 3030)));
        assert!(!parsed.cors_permissive);
        assert_eq!(parsed.database_url.as_deref(), Some("postgres://x/db"));
    }

    #[test]
    fn rejects_bad_bind_address() {
        assert!(Wrapper::try_parse_from(["serve", "--bind", "not-an-address"]).is_err());
    }
}
