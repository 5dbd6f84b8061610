//! Table definitions for stars, movies and the `play` association
//!
//! Tables are created idempotently at startup. Foreign keys carry the delete
//! rules: removing a star clears the director reference on its movies and
//! drops its cast entries; removing a movie drops its cast entries.

use sqlx::PgPool;

use super::DbError;

/// Create all tables and indexes if they do not exist yet.
pub async fn ensure(pool: &PgPool) -> Result<(), DbError> {
    tracing::info!("Ensuring database schema...");

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS stars (
            id SERIAL PRIMARY KEY,
            name VARCHAR(150) NOT NULL,
            birthdate DATE NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS movies (
            id SERIAL PRIMARY KEY,
            title VARCHAR(400) NOT NULL,
            year SMALLINT NOT NULL,
            duration SMALLINT,
            id_director INTEGER REFERENCES stars(id) ON DELETE SET NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    // One row per (movie, actor); position keeps the cast in the order it was given
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS play (
            id_actor INTEGER NOT NULL REFERENCES stars(id) ON DELETE CASCADE,
            id_movie INTEGER NOT NULL REFERENCES movies(id) ON DELETE CASCADE,
            position INTEGER NOT NULL DEFAULT 0,
            PRIMARY KEY (id_movie, id_actor)
        )
        "#,
    )
    .execute(pool)
    .await?;

    create_indexes(pool).await?;

    tracing::info!("Database schema ready");
    Ok(())
}

async fn create_indexes(pool: &PgPool) -> Result<(), DbError> {
    sqlx::query("CREATE INDEX IF NOT EXISTS idx_movies_year ON movies(year)")
        .execute(pool)
        .await?;
    sqlx::query("CREATE INDEX IF NOT EXISTS idx_movies_director ON movies(id_director)")
        .execute(pool)
        .await?;
    sqlx::query("CREATE INDEX IF NOT EXISTS idx_play_actor ON play(id_actor)")
        .execute(pool)
        .await?;
    sqlx::query("CREATE INDEX IF NOT EXISTS idx_stars_name ON stars(name)")
        .execute(pool)
        .await?;

    Ok(())
}
