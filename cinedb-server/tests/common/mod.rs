//! Shared setup for database tests.
//!
//! Each test gets a private PostgreSQL schema so tests can run in parallel
//! against the same database without seeing each other's rows.
//! Run with: DATABASE_URL=postgres://... cargo test -p cinedb-server -- --ignored

#![allow(dead_code)]

use chrono::NaiveDate;
use cinedb_server::db::{schema, LinkOutcome, Movie, MovieRepo, Star, StarRepo};
use cinedb_server::models::{MovieDraft, StarDraft};
use sqlx::postgres::PgPoolOptions;
use sqlx::{Executor, PgPool};
use uuid::Uuid;

pub struct TestDb {
    pub pool: PgPool,
    admin: PgPool,
    schema: String,
}

impl TestDb {
    pub async fn new() -> Self {
        let _ = tracing_subscriber::fmt()
            .with_env_filter("cinedb_server=debug")
            .with_test_writer()
            .try_init();

        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");
        let schema_name = format!("cinedb_test_{}", Uuid::new_v4().simple());

        let admin = PgPool::connect(&url).await.expect("admin connection failed");
        admin
            .execute(format!("CREATE SCHEMA {}", schema_name).as_str())
            .await
            .expect("create schema failed");

        let search_path = schema_name.clone();
        let pool = PgPoolOptions::new()
            .max_connections(4)
            .after_connect(move |conn, _meta| {
                let sql = format!("SET search_path TO {}", search_path);
                Box::pin(async move {
                    conn.execute(sql.as_str()).await?;
                    Ok(())
                })
            })
            .connect(&url)
            .await
            .expect("pool creation failed");

        schema::ensure(&pool).await.expect("schema setup failed");

        Self {
            pool,
            admin,
            schema: schema_name,
        }
    }

    pub async fn cleanup(self) {
        self.pool.close().await;
        self.admin
            .execute(format!("DROP SCHEMA {} CASCADE", self.schema).as_str())
            .await
            .expect("drop schema failed");
    }

    pub async fn movie(&self, title: &str, year: i16, duration: Option<i16>) -> Movie {
        let draft = MovieDraft::new(title, year, duration).expect("valid movie");
        MovieRepo::new(&self.pool)
            .create(&draft)
            .await
            .expect("create movie failed")
    }

    pub async fn star(&self, name: &str, birthdate: &str) -> Star {
        let draft = StarDraft::new(name, date(birthdate)).expect("valid star");
        StarRepo::new(&self.pool)
            .create(&draft)
            .await
            .expect("create star failed")
    }
}

pub fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").expect("valid date")
}

/// Unwrap a successful cast write.
pub fn linked<T>(outcome: LinkOutcome<T>) -> T {
    match outcome {
        LinkOutcome::Linked(value) => value,
        LinkOutcome::MovieNotFound => panic!("expected link, movie not found"),
        LinkOutcome::StarsNotFound(ids) => panic!("expected link, stars not found: {:?}", ids),
    }
}
