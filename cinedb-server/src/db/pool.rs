//! PostgreSQL pool shared by every repository

use std::time::Duration;

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use super::DbError;

/// Pool size used when none is configured.
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// How long a request waits for a free connection before failing.
const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(10);

/// Connect to `database_url` with at most `max_connections` pooled
/// connections (never fewer than one).
pub async fn connect(database_url: &str, max_connections: u32) -> Result<PgPool, DbError> {
    let pool = PgPoolOptions::new()
        .max_connections(max_connections.max(1))
        .acquire_timeout(ACQUIRE_TIMEOUT)
        .connect(database_url)
        .await?;

    tracing::debug!(
        max_connections = pool.options().get_max_connections(),
        "Database pool ready"
    );
    Ok(pool)
}

#[cfg(test)]
mod tests {
    use super::*;

    // Run with: DATABASE_URL=postgres://... cargo test -p cinedb-server -- --ignored

    #[tokio::test]
    #[ignore = "requires database"]
    async fn pool_runs_queries() {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");
        let pool = connect(&url, DEFAULT_MAX_CONNECTIONS)
            .await
            .expect("pool creation failed");

        let one: i32 = sqlx::query_scalar("SELECT 1")
            .fetch_one(&pool)
            .await
            .expect("query failed");
        assert_eq!(one, 1);
        assert_eq!(pool.options().get_max_connections(), DEFAULT_MAX_CONNECTIONS);
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn zero_max_connections_is_raised_to_one() {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");
        let pool = connect(&url, 0).await.expect("pool creation failed");

        assert_eq!(pool.options().get_max_connections(), 1);
    }

    #[tokio::test]
    async fn unreachable_database_is_a_db_error() {
        let err = connect("postgres://cinedb@127.0.0.1:1/cinedb", 1)
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::Sqlx(_)));
    }
}
